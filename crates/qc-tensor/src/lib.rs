//! `qc-tensor` - Q8.8 fixed-point numerics for the qc convolution engine.
//!
//! This crate provides:
//! - `Q8_8`, a 16-bit signed fixed-point word with 8 fractional bits, and
//!   its codec to and from `f32`
//! - A row-major `Matrix` of `Q8_8` values
//!
//! All arithmetic on `Q8_8` is modular over the 16-bit two's-complement
//! domain. Nothing saturates and nothing widens.

pub mod error;
pub mod fixed;
pub mod matrix;

// Re-export primary types at the crate root for convenience.
pub use error::{Result, TensorError};
pub use fixed::Q8_8;
pub use matrix::Matrix;
