use qc_tensor::{Matrix, Q8_8};

use crate::config::ConvConfig;
use crate::error::{ConvError, Result};
use crate::gemm::{dot_q8_8, flatten_kernel, CpuGemm, GemmBackend};
use crate::im2col::Im2colBuffer;
use crate::report::{ConvOutput, TimingRecord, TimingSummary};
use crate::tile::TileGrid;
use crate::timer::{CycleCounter, CycleTimer, HardwareCounter};

/// Tiled im2col + GEMM convolution.
///
/// Owns the im2col scratch buffer, the cycle counter and the GEMM backend.
/// Each [`run`](Self::run) walks the output tiles in row-major order and
/// takes every tile through four steps:
///
/// 1. EXTRACT: im2col into the scratch buffer, timed.
/// 2. COMPUTE: patch GEMM over the valid part of the buffer, timed.
/// 3. WRITE: copy the tile's results into the output matrix.
/// 4. REPORT: log the tile's cycle counts and add them to the totals.
///
/// The output depends only on the operands; cycle counts come from the
/// injected counter and are not part of that guarantee.
#[derive(Debug)]
pub struct ConvolutionEngine {
    config: ConvConfig,
    counter: Box<dyn CycleCounter>,
    backend: Box<dyn GemmBackend>,
    buffer: Im2colBuffer,
}

impl ConvolutionEngine {
    /// Create an engine for `config`, timing with `counter` and computing
    /// with `backend`.
    pub fn new(
        config: ConvConfig,
        counter: Box<dyn CycleCounter>,
        backend: Box<dyn GemmBackend>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(ConvolutionEngine {
            config,
            counter,
            backend,
            buffer: Im2colBuffer::new(config.effective_tile_size(), config.kernel_size),
        })
    }

    /// Engine using the platform cycle counter and the CPU GEMM backend.
    pub fn with_hardware(config: ConvConfig) -> Result<Self> {
        Self::new(
            config,
            Box::new(HardwareCounter::new()),
            Box::new(CpuGemm::new()),
        )
    }

    pub fn config(&self) -> &ConvConfig {
        &self.config
    }

    pub fn counter(&self) -> &dyn CycleCounter {
        self.counter.as_ref()
    }

    pub fn backend(&self) -> &dyn GemmBackend {
        self.backend.as_ref()
    }

    /// Convolve `input` with `kernel`.
    ///
    /// # Errors
    /// Returns a configuration error if the operands are not square or do
    /// not match the configured sizes, or a backend error from the GEMM.
    pub fn run(&mut self, input: &Matrix, kernel: &Matrix) -> Result<ConvOutput> {
        self.check_operands(input, kernel)?;

        let out_size = self.config.output_size();
        let tile_size = self.config.effective_tile_size();
        let kernel_flat = flatten_kernel(kernel);

        let mut output = Matrix::zeros(out_size, out_size);
        let mut results = vec![Q8_8::ZERO; tile_size * tile_size];
        let n_tiles = self.config.tiles_per_axis().pow(2);
        let mut records = Vec::with_capacity(n_tiles);
        let mut summary = TimingSummary::default();

        log::debug!(
            "conv {}x{} * {}x{} -> {}x{} in {} tiles of {} (counter={}, backend={})",
            self.config.input_size,
            self.config.input_size,
            self.config.kernel_size,
            self.config.kernel_size,
            out_size,
            out_size,
            n_tiles,
            tile_size,
            self.counter.name(),
            self.backend.name()
        );

        let capacity = self.buffer.capacity();
        for tile in TileGrid::new(out_size, tile_size) {
            let timer = CycleTimer::start(self.counter.as_mut());
            let patches = self.buffer.extract(input, tile);
            let extraction_cycles = timer.stop();
            log::trace!(
                "im2col tile {} ({}x{}): {} of {} entries",
                tile,
                tile.height,
                tile.width,
                patches.as_slice().len(),
                capacity
            );

            let tile_out = &mut results[..tile.cells()];
            let timer = CycleTimer::start(self.counter.as_mut());
            let computed = self.backend.patch_dot(&patches, &kernel_flat, tile_out);
            let compute_cycles = timer.stop();
            computed?;

            for i in 0..tile.height {
                let src = &tile_out[i * tile.width..(i + 1) * tile.width];
                output.row_mut(tile.row + i)[tile.col..tile.col + tile.width]
                    .copy_from_slice(src);
            }

            let record = TimingRecord {
                tile,
                extraction_cycles,
                compute_cycles,
            };
            log::debug!(
                "tile {}: im2col {} cycles, gemm {} cycles",
                tile,
                extraction_cycles,
                compute_cycles
            );
            summary.record(&record);
            records.push(record);
        }

        log::info!(
            "conv done: {} tiles, im2col {} cycles, gemm {} cycles",
            summary.tiles,
            summary.extraction_cycles,
            summary.compute_cycles
        );

        Ok(ConvOutput {
            output,
            tiles: records,
            summary,
        })
    }

    fn check_operands(&self, input: &Matrix, kernel: &Matrix) -> Result<()> {
        check_square(input, kernel)?;
        if input.rows() != self.config.input_size {
            return Err(ConvError::DimensionMismatch {
                what: "input",
                expected: self.config.input_size,
                rows: input.rows(),
                cols: input.cols(),
            });
        }
        if kernel.rows() != self.config.kernel_size {
            return Err(ConvError::DimensionMismatch {
                what: "kernel",
                expected: self.config.kernel_size,
                rows: kernel.rows(),
                cols: kernel.cols(),
            });
        }
        Ok(())
    }
}

fn check_square(input: &Matrix, kernel: &Matrix) -> Result<()> {
    if !kernel.is_square() {
        return Err(ConvError::NonSquareKernel {
            rows: kernel.rows(),
            cols: kernel.cols(),
        });
    }
    if !input.is_square() {
        return Err(ConvError::NonSquareInput {
            rows: input.rows(),
            cols: input.cols(),
        });
    }
    Ok(())
}

/// One-shot tiled convolution on the platform cycle counter.
///
/// Sizes are taken from the operands; `tile_size` sets the tiling.
pub fn conv2d(input: &Matrix, kernel: &Matrix, tile_size: usize) -> Result<ConvOutput> {
    check_square(input, kernel)?;
    let config = ConvConfig::new(input.rows(), kernel.rows(), tile_size)?;
    ConvolutionEngine::with_hardware(config)?.run(input, kernel)
}

/// Untiled valid convolution with the same 16-bit accumulator, one output
/// cell at a time. Reference for checking the tiled path.
pub fn conv2d_direct(input: &Matrix, kernel: &Matrix) -> Result<Matrix> {
    check_square(input, kernel)?;
    let config = ConvConfig::new(input.rows(), kernel.rows(), 1)?;
    let k = config.kernel_size;
    let out_size = config.output_size();
    let kernel_flat = flatten_kernel(kernel);

    let mut output = Matrix::zeros(out_size, out_size);
    let mut window = Vec::with_capacity(k * k);
    for r in 0..out_size {
        for c in 0..out_size {
            window.clear();
            for ki in 0..k {
                window.extend_from_slice(&input.row(r + ki)[c..c + k]);
            }
            output.row_mut(r)[c] = dot_q8_8(&window, &kernel_flat);
        }
    }
    Ok(output)
}
