use crate::error::{ConvError, Result};

/// Dimensions of one convolution run.
///
/// The input and kernel are square; the output is the valid (unpadded)
/// convolution of size `input_size - kernel_size + 1` per axis, processed in
/// `tile_size x tile_size` tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvConfig {
    /// Side length of the square input matrix.
    pub input_size: usize,
    /// Side length of the square kernel.
    pub kernel_size: usize,
    /// Nominal side length of an output tile.
    pub tile_size: usize,
}

impl ConvConfig {
    /// Build and validate a configuration.
    pub fn new(input_size: usize, kernel_size: usize, tile_size: usize) -> Result<Self> {
        let config = ConvConfig {
            input_size,
            kernel_size,
            tile_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the preconditions the tiling arithmetic relies on.
    ///
    /// Rejects a zero tile size, a zero kernel and a kernel larger than the
    /// input, any of which would produce empty or negative ranges.
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(ConvError::InvalidTileSize);
        }
        if self.kernel_size == 0 {
            return Err(ConvError::InvalidKernelSize);
        }
        if self.kernel_size > self.input_size {
            return Err(ConvError::KernelTooLarge {
                kernel_size: self.kernel_size,
                input_size: self.input_size,
            });
        }
        Ok(())
    }

    /// Side length of the output: `input_size - kernel_size + 1`.
    ///
    /// Only meaningful on a validated configuration.
    pub fn output_size(&self) -> usize {
        self.input_size - self.kernel_size + 1
    }

    /// Side length of the largest tile actually processed.
    ///
    /// A nominal tile larger than the output is clipped to a single tile, so
    /// scratch storage never needs more than `output_size` per side.
    pub fn effective_tile_size(&self) -> usize {
        self.tile_size.min(self.output_size())
    }

    /// Number of elements in one flattened kernel patch (`k^2`).
    pub fn patch_len(&self) -> usize {
        self.kernel_size * self.kernel_size
    }

    /// Tiles per output axis, counting the clipped edge tile.
    pub fn tiles_per_axis(&self) -> usize {
        self.output_size().div_ceil(self.tile_size)
    }
}

impl Default for ConvConfig {
    fn default() -> Self {
        ConvConfig {
            input_size: 8,
            kernel_size: 3,
            tile_size: 2,
        }
    }
}
