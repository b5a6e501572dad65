use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvError {
    #[error("tile size must be positive")]
    InvalidTileSize,
    #[error("kernel size must be positive")]
    InvalidKernelSize,
    #[error("kernel size {kernel_size} exceeds input size {input_size}")]
    KernelTooLarge {
        kernel_size: usize,
        input_size: usize,
    },
    #[error("kernel must be square, got {rows}x{cols}")]
    NonSquareKernel { rows: usize, cols: usize },
    #[error("input must be square, got {rows}x{cols}")]
    NonSquareInput { rows: usize, cols: usize },
    #[error("{what}: expected {expected}x{expected}, got {rows}x{cols}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        rows: usize,
        cols: usize,
    },
    #[error("gemm length mismatch: {0}")]
    GemmMismatch(String),
    #[error("tensor error: {0}")]
    Tensor(#[from] qc_tensor::TensorError),
}

pub type Result<T> = std::result::Result<T, ConvError>;
