use clap::Parser;

/// Tiled im2col + GEMM Q8.8 convolution with cycle timing.
#[derive(Parser, Debug, Clone)]
#[command(name = "qconv", version, about)]
pub struct Args {
    /// Side length of the square input matrix.
    #[arg(long, default_value_t = 8)]
    pub input_size: usize,

    /// Side length of the square kernel.
    #[arg(long, default_value_t = 3)]
    pub kernel_size: usize,

    /// Side length of an output tile.
    #[arg(long, default_value_t = 2)]
    pub tile_size: usize,

    /// Block size of the UART matrix dump.
    #[arg(long, default_value_t = 2)]
    pub chunk: usize,

    /// Seed for the input and kernel generator.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Skip the per-tile cycle report.
    #[arg(long)]
    pub no_timing: bool,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            input_size: 8,
            kernel_size: 3,
            tile_size: 2,
            chunk: 2,
            seed: 42,
            no_timing: false,
        }
    }
}
