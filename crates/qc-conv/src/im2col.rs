//! Patch extraction (im2col) for one output tile.
//!
//! For every output cell of a tile, the `k x k` input window that produces
//! it is copied into a flat buffer, one patch after another. The layout is
//! row-major by local output position `(i, j)` and, inside a patch,
//! row-major by kernel element:
//!
//! ```text
//! buf[((i * width + j) * k + ki) * k + kj] = input[row + i + ki][col + j + kj]
//! ```

use qc_tensor::{Matrix, Q8_8};

use crate::tile::Tile;

/// Copy the patches of `tile` out of `input` into the front of `out`.
///
/// Writes exactly `tile.height * tile.width * k^2` entries and returns that
/// count. Anything in `out` past the returned length is left untouched.
///
/// # Panics
/// Panics if `out` is too short or if the tile's windows reach outside
/// `input`. Both are guaranteed by a validated [`crate::ConvConfig`].
pub fn im2col(input: &Matrix, kernel_size: usize, tile: Tile, out: &mut [Q8_8]) -> usize {
    let k = kernel_size;
    let len = tile.cells() * k * k;
    assert!(
        out.len() >= len,
        "im2col: buffer holds {} entries, tile needs {}",
        out.len(),
        len
    );

    let mut idx = 0;
    for i in 0..tile.height {
        for j in 0..tile.width {
            let col = tile.col + j;
            for ki in 0..k {
                let src = &input.row(tile.row + i + ki)[col..col + k];
                out[idx..idx + k].copy_from_slice(src);
                idx += k;
            }
        }
    }
    debug_assert_eq!(idx, len);
    len
}

/// Scratch storage for extracted patches, reused across tiles.
///
/// Sized once for a full tile (`tile_size^2 * k^2`). Callers pass the
/// effective tile size ([`crate::ConvConfig::effective_tile_size`]), never a
/// nominal size larger than the output. Each
/// [`extract`](Self::extract) overwrites only the prefix the current tile
/// needs and hands back a [`PatchView`] bounded to that prefix, so entries
/// left over from a larger earlier tile are never observable.
#[derive(Debug, Clone)]
pub struct Im2colBuffer {
    data: Vec<Q8_8>,
    kernel_size: usize,
}

impl Im2colBuffer {
    pub fn new(tile_size: usize, kernel_size: usize) -> Self {
        let capacity = tile_size * tile_size * kernel_size * kernel_size;
        Im2colBuffer {
            data: vec![Q8_8::ZERO; capacity],
            kernel_size,
        }
    }

    /// Total number of entries the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn kernel_size(&self) -> usize {
        self.kernel_size
    }

    /// Extract the patches of `tile` and return a view over them.
    ///
    /// # Panics
    /// Panics under the same conditions as [`im2col`].
    pub fn extract(&mut self, input: &Matrix, tile: Tile) -> PatchView<'_> {
        let len = im2col(input, self.kernel_size, tile, &mut self.data);
        PatchView {
            data: &self.data[..len],
            patch_len: self.kernel_size * self.kernel_size,
            height: tile.height,
            width: tile.width,
        }
    }
}

/// The valid portion of an [`Im2colBuffer`] for one tile.
///
/// Holds `height * width` patches of `patch_len` entries each, in row-major
/// order of the tile's output cells.
#[derive(Debug, Clone, Copy)]
pub struct PatchView<'a> {
    data: &'a [Q8_8],
    patch_len: usize,
    height: usize,
    width: usize,
}

impl<'a> PatchView<'a> {
    /// Wrap an already laid-out patch slice.
    ///
    /// # Panics
    /// Panics if `data.len() != height * width * patch_len`.
    pub fn new(data: &'a [Q8_8], patch_len: usize, height: usize, width: usize) -> Self {
        assert_eq!(
            data.len(),
            height * width * patch_len,
            "patch view of {}x{} patches of {} needs {} entries",
            height,
            width,
            patch_len,
            height * width * patch_len
        );
        PatchView {
            data,
            patch_len,
            height,
            width,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Entries per patch (`k^2`).
    pub fn patch_len(&self) -> usize {
        self.patch_len
    }

    /// Number of patches (`height * width`).
    pub fn patch_count(&self) -> usize {
        self.height * self.width
    }

    /// The `idx`-th patch.
    pub fn patch(&self, idx: usize) -> &'a [Q8_8] {
        let start = idx * self.patch_len;
        &self.data[start..start + self.patch_len]
    }

    /// Iterator over patches in row-major output order.
    pub fn patches(&self) -> impl Iterator<Item = &'a [Q8_8]> + 'a {
        let patch_len = self.patch_len;
        let data = self.data;
        (0..self.patch_count()).map(move |p| &data[p * patch_len..(p + 1) * patch_len])
    }

    pub fn as_slice(&self) -> &'a [Q8_8] {
        self.data
    }
}
