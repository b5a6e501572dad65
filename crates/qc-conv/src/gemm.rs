use std::fmt::Debug;

use qc_tensor::{Matrix, Q8_8};

use crate::error::{ConvError, Result};
use crate::im2col::PatchView;

/// The compute side of the convolution: the accelerator seam.
///
/// A backend takes a tile's extracted patches and the flattened kernel and
/// produces one output word per patch. Implementations must reproduce the
/// 16-bit accumulator exactly: every product and every partial sum wraps
/// modulo `2^16`, with no widening and no saturation.
pub trait GemmBackend: Debug {
    /// Returns the name of this backend (e.g., "cpu").
    fn name(&self) -> &str;

    /// Patch-by-kernel dot products.
    ///
    /// - `patches`: `patch_count()` patches of `patch_len()` words
    /// - `kernel`: row-major flattened kernel, length `patch_len()`
    /// - `out`: receives one word per patch, length `patch_count()`
    fn patch_dot(&self, patches: &PatchView<'_>, kernel: &[Q8_8], out: &mut [Q8_8]) -> Result<()>;
}

/// Pure-Rust reference GEMM backend.
///
/// Straightforward loops over the patches, accumulating in a single
/// [`Q8_8`] word with [`Q8_8::mac`].
#[derive(Debug, Clone, Default)]
pub struct CpuGemm;

impl CpuGemm {
    pub fn new() -> Self {
        CpuGemm
    }
}

impl GemmBackend for CpuGemm {
    fn name(&self) -> &str {
        "cpu"
    }

    fn patch_dot(&self, patches: &PatchView<'_>, kernel: &[Q8_8], out: &mut [Q8_8]) -> Result<()> {
        if kernel.len() != patches.patch_len() {
            return Err(ConvError::GemmMismatch(format!(
                "kernel.len()={} but patch_len={}",
                kernel.len(),
                patches.patch_len()
            )));
        }
        if out.len() != patches.patch_count() {
            return Err(ConvError::GemmMismatch(format!(
                "out.len()={} but patch_count={}",
                out.len(),
                patches.patch_count()
            )));
        }

        for (dst, patch) in out.iter_mut().zip(patches.patches()) {
            *dst = dot_q8_8(patch, kernel);
        }
        Ok(())
    }
}

/// Fixed-point inner product with a 16-bit wrapping accumulator.
pub fn dot_q8_8(a: &[Q8_8], b: &[Q8_8]) -> Q8_8 {
    a.iter()
        .zip(b)
        .fold(Q8_8::ZERO, |acc, (&x, &w)| acc.mac(x, w))
}

/// Flatten a kernel matrix in row-major order.
pub fn flatten_kernel(kernel: &Matrix) -> Vec<Q8_8> {
    kernel.as_slice().to_vec()
}
