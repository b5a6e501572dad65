//! `qc-gen` - Seeded pseudo-random Q8.8 matrices for exercising the qc engine.

pub mod generator;

pub use generator::MatrixGenerator;
