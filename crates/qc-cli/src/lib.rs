//! `qc-cli` - Command-line entry point and UART-style telemetry for qc.

pub mod args;
pub mod uart;

use std::io::Write;

use anyhow::{Context, Result};
use qc_conv::{ConvConfig, ConvOutput, ConvolutionEngine};
use qc_gen::MatrixGenerator;

pub use args::Args;

/// Generate the operands, run the convolution and write the UART dump.
///
/// The input is drawn before the kernel from a single generator seeded
/// with `args.seed`.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<ConvOutput> {
    let config = ConvConfig::new(args.input_size, args.kernel_size, args.tile_size)
        .context("invalid convolution configuration")?;

    let mut generator = MatrixGenerator::new(args.seed);
    let input = generator.square(config.input_size);
    let kernel = generator.square(config.kernel_size);
    log::debug!(
        "generated {}x{} input and {}x{} kernel (seed {})",
        input.rows(),
        input.cols(),
        kernel.rows(),
        kernel.cols(),
        args.seed
    );

    let mut engine = ConvolutionEngine::with_hardware(config)?;
    let result = engine.run(&input, &kernel)?;

    if !args.no_timing {
        uart::write_timing(out, &result).context("failed to write timing")?;
    }
    uart::write_matrix(out, &result.output, args.chunk).context("failed to write output")?;
    Ok(result)
}
