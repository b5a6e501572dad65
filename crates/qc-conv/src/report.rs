use qc_tensor::Matrix;

use crate::tile::Tile;

/// Cycle counts for one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingRecord {
    pub tile: Tile,
    /// Cycles spent in im2col extraction (general-purpose core).
    pub extraction_cycles: u64,
    /// Cycles spent in the patch GEMM (accelerator).
    pub compute_cycles: u64,
}

/// Running totals over all tiles of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimingSummary {
    pub tiles: usize,
    pub extraction_cycles: u64,
    pub compute_cycles: u64,
}

impl TimingSummary {
    /// Fold one tile's record into the totals.
    pub fn record(&mut self, rec: &TimingRecord) {
        self.tiles += 1;
        self.extraction_cycles += rec.extraction_cycles;
        self.compute_cycles += rec.compute_cycles;
    }

    pub fn total_cycles(&self) -> u64 {
        self.extraction_cycles + self.compute_cycles
    }
}

/// Everything a convolution run produces.
///
/// The output matrix is the result proper; the timing data is plain values
/// for whatever sink wants to render it.
#[derive(Debug, Clone)]
pub struct ConvOutput {
    pub output: Matrix,
    pub tiles: Vec<TimingRecord>,
    pub summary: TimingSummary,
}
