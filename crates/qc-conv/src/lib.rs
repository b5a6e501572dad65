//! `qc-conv` - Tiled im2col + GEMM convolution for the qc engine.
//!
//! This crate provides:
//! - `ConvConfig` and the row-major `TileGrid` over the output
//! - `Im2colBuffer`, the reusable patch scratch, and its bounded `PatchView`
//! - A `GemmBackend` trait for the accelerator side, with a reference
//!   `CpuGemm` implementation
//! - A `CycleCounter` trait for fenced cycle measurement, with a
//!   `HardwareCounter` and deterministic counters for tests
//! - `ConvolutionEngine`, which ties these together tile by tile

pub mod config;
pub mod engine;
pub mod error;
pub mod gemm;
pub mod im2col;
pub mod report;
pub mod tile;
pub mod timer;

// Re-export primary types at the crate root for convenience.
pub use config::ConvConfig;
pub use engine::{conv2d, conv2d_direct, ConvolutionEngine};
pub use error::{ConvError, Result};
pub use gemm::{CpuGemm, GemmBackend};
pub use im2col::{Im2colBuffer, PatchView};
pub use report::{ConvOutput, TimingRecord, TimingSummary};
pub use tile::{Tile, TileGrid};
pub use timer::{CycleCounter, CycleTimer, HardwareCounter, ScriptedCounter, StepCounter};
