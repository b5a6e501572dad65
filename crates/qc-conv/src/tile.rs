use std::fmt;

/// A rectangular region of the output grid processed as one unit.
///
/// `row`/`col` are the origin in output coordinates. `height`/`width` are
/// the nominal tile size clipped against the output edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
}

impl Tile {
    /// The tile at origin `(row, col)`, clipped to an `out_size x out_size` grid.
    pub fn clipped(row: usize, col: usize, tile_size: usize, out_size: usize) -> Self {
        Tile {
            row,
            col,
            height: tile_size.min(out_size - row),
            width: tile_size.min(out_size - col),
        }
    }

    /// Number of output cells covered.
    pub fn cells(&self) -> usize {
        self.height * self.width
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

/// Row-major walk over the tiles of a square output grid.
///
/// Outer loop: tile-row origin stepping by `tile_size` from 0 to `out_size`.
/// Inner loop: tile-column origin likewise.
#[derive(Debug, Clone)]
pub struct TileGrid {
    out_size: usize,
    tile_size: usize,
    next_row: usize,
    next_col: usize,
}

impl TileGrid {
    /// # Panics
    /// Panics if `tile_size` is zero.
    pub fn new(out_size: usize, tile_size: usize) -> Self {
        assert!(tile_size > 0, "tile_size must be positive");
        TileGrid {
            out_size,
            tile_size,
            next_row: 0,
            next_col: 0,
        }
    }
}

impl Iterator for TileGrid {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.next_row >= self.out_size {
            return None;
        }
        let tile = Tile::clipped(self.next_row, self.next_col, self.tile_size, self.out_size);

        self.next_col = self.next_col.saturating_add(self.tile_size);
        if self.next_col >= self.out_size {
            self.next_col = 0;
            self.next_row = self.next_row.saturating_add(self.tile_size);
        }
        Some(tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_grid() {
        let tiles: Vec<Tile> = TileGrid::new(4, 2).collect();
        let origins: Vec<(usize, usize)> = tiles.iter().map(|t| (t.row, t.col)).collect();
        assert_eq!(origins, vec![(0, 0), (0, 2), (2, 0), (2, 2)]);
        assert!(tiles.iter().all(|t| t.height == 2 && t.width == 2));
    }

    #[test]
    fn test_edge_tiles_clip() {
        let tiles: Vec<Tile> = TileGrid::new(6, 4).collect();
        assert_eq!(tiles.len(), 4);
        assert_eq!((tiles[0].height, tiles[0].width), (4, 4));
        assert_eq!((tiles[1].height, tiles[1].width), (4, 2));
        assert_eq!((tiles[2].height, tiles[2].width), (2, 4));
        assert_eq!((tiles[3].height, tiles[3].width), (2, 2));
        assert_eq!((tiles[3].row, tiles[3].col), (4, 4));
    }

    #[test]
    fn test_tiles_cover_grid_once() {
        for (out, ts) in [(6, 1), (6, 4), (7, 3), (5, 5), (5, 8)] {
            let mut hits = vec![0u32; out * out];
            for t in TileGrid::new(out, ts) {
                for r in t.row..t.row + t.height {
                    for c in t.col..t.col + t.width {
                        hits[r * out + c] += 1;
                    }
                }
            }
            assert!(hits.iter().all(|&h| h == 1), "out={} tile={}", out, ts);
        }
    }

    #[test]
    fn test_oversized_tile_is_single_clipped_tile() {
        let tiles: Vec<Tile> = TileGrid::new(3, 10).collect();
        assert_eq!(tiles, vec![Tile { row: 0, col: 0, height: 3, width: 3 }]);
    }

    #[test]
    fn test_huge_tile_size_does_not_overflow() {
        let tiles: Vec<Tile> = TileGrid::new(6, usize::MAX).collect();
        assert_eq!(tiles, vec![Tile { row: 0, col: 0, height: 6, width: 6 }]);
        assert_eq!(TileGrid::new(6, usize::MAX - 3).count(), 1);
    }

    #[test]
    fn test_empty_grid() {
        assert_eq!(TileGrid::new(0, 2).count(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Tile::clipped(2, 4, 2, 6).to_string(), "[2,4]");
    }
}
