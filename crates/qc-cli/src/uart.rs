//! UART-style text rendering of convolution results.
//!
//! Mirrors what the board streams over its debug UART: the output matrix in
//! `chunk x chunk` blocks, and one line of cycle counts per tile followed by
//! the two totals.

use std::io::{self, Write};

use qc_conv::ConvOutput;
use qc_tensor::Matrix;

pub const OUTPUT_START: &str = "=== UART OUTPUT START ===";
pub const OUTPUT_END: &str = "=== UART OUTPUT END ===";
pub const CHUNK_END: &str = "--- CHUNK END ---";

/// Write `matrix` block by block.
///
/// Blocks are visited row-major; inside a block each row is printed as
/// space-terminated values with two decimals.
///
/// # Errors
/// Returns `InvalidInput` for a zero `chunk`, or any error from `w`.
pub fn write_matrix<W: Write>(w: &mut W, matrix: &Matrix, chunk: usize) -> io::Result<()> {
    if chunk == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "chunk size must be positive",
        ));
    }

    writeln!(w, "{}", OUTPUT_START)?;
    for i in (0..matrix.rows()).step_by(chunk) {
        for j in (0..matrix.cols()).step_by(chunk) {
            for ii in i..(i + chunk).min(matrix.rows()) {
                let row = matrix.row(ii);
                for q in &row[j..(j + chunk).min(matrix.cols())] {
                    write!(w, "{} ", q)?;
                }
                writeln!(w)?;
            }
            writeln!(w, "{}", CHUNK_END)?;
        }
    }
    writeln!(w, "{}", OUTPUT_END)
}

/// Write the per-tile cycle counts and the run totals.
pub fn write_timing<W: Write>(w: &mut W, result: &ConvOutput) -> io::Result<()> {
    for rec in &result.tiles {
        writeln!(
            w,
            "UART TILE {} CPU: {} cycles, GEMM: {} cycles",
            rec.tile, rec.extraction_cycles, rec.compute_cycles
        )?;
    }
    writeln!(
        w,
        "UART Final CPU (im2col): {} cycles",
        result.summary.extraction_cycles
    )?;
    writeln!(
        w,
        "UART Final FPGA (GEMM): {} cycles",
        result.summary.compute_cycles
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_conv::{Tile, TimingRecord, TimingSummary};

    fn render(m: &Matrix, chunk: usize) -> String {
        let mut buf = Vec::new();
        write_matrix(&mut buf, m, chunk).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_matrix_blocks() {
        let m = Matrix::from_f32(&[0.5, -0.25, 1.0, 0.0], 2, 2).unwrap();
        let text = render(&m, 1);
        let expected = "\
=== UART OUTPUT START ===
0.50 
--- CHUNK END ---
-0.25 
--- CHUNK END ---
1.00 
--- CHUNK END ---
0.00 
--- CHUNK END ---
=== UART OUTPUT END ===
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_ragged_edge_blocks() {
        let m = Matrix::from_f32(&[1.0; 9], 3, 3).unwrap();
        let text = render(&m, 2);
        let lines: Vec<&str> = text.lines().collect();
        // 4 blocks: 2x2, 2x1, 1x2, 1x1
        assert_eq!(lines.iter().filter(|l| **l == CHUNK_END).count(), 4);
        assert_eq!(lines[1], "1.00 1.00 ");
        assert_eq!(lines[4], "1.00 ");
        assert_eq!(lines.last(), Some(&OUTPUT_END));
    }

    #[test]
    fn test_whole_matrix_single_block() {
        let m = Matrix::from_f32(&[0.1, 0.2, 0.3, 0.4], 2, 2).unwrap();
        let text = render(&m, 8);
        assert_eq!(text.matches(CHUNK_END).count(), 1);
        // 0.1 truncates to 25/256 = 0.0977
        assert!(text.contains("0.10 0.20 \n"));
    }

    #[test]
    fn test_zero_chunk_rejected() {
        let m = Matrix::zeros(2, 2);
        let err = write_matrix(&mut Vec::<u8>::new(), &m, 0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_timing_lines() {
        let tile = Tile::clipped(0, 2, 2, 4);
        let rec = TimingRecord {
            tile,
            extraction_cycles: 120,
            compute_cycles: 45,
        };
        let mut summary = TimingSummary::default();
        summary.record(&rec);
        let result = ConvOutput {
            output: Matrix::zeros(4, 4),
            tiles: vec![rec],
            summary,
        };

        let mut buf = Vec::new();
        write_timing(&mut buf, &result).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "UART TILE [0,2] CPU: 120 cycles, GEMM: 45 cycles\n\
             UART Final CPU (im2col): 120 cycles\n\
             UART Final FPGA (GEMM): 45 cycles\n"
        );
    }
}
