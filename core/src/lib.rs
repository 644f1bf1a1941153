//! Board engine and game session for a lives-based minesweeper variant.
//!
//! Tiles are addressed by `(row, col)` and reported back through flat
//! row-major indexes (`row * cols + col`), so a renderer can redraw only the
//! tiles a move touched.

use serde::{Deserialize, Serialize};

pub use error::*;
pub use generator::*;
pub use grid::*;
pub use presets::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod error;
mod generator;
mod grid;
mod presets;
mod session;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl GridConfig {
    pub const fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// Checks the board can be generated: non-empty and at least one safe tile.
    pub fn validate(&self) -> Result<Self> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::EmptyBoard);
        }

        let tiles = self.total_tiles();
        if self.mines >= tiles {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                tiles,
            });
        }

        Ok(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_full_board() {
        assert_eq!(
            GridConfig::new(3, 3, 9).validate(),
            Err(GameError::TooManyMines { mines: 9, tiles: 9 })
        );
    }

    #[test]
    fn config_rejects_empty_board() {
        assert_eq!(
            GridConfig::new(0, 5, 0).validate(),
            Err(GameError::EmptyBoard)
        );
    }

    #[test]
    fn config_accepts_one_safe_tile() {
        let config = GridConfig::new(3, 3, 8);
        assert_eq!(config.validate(), Ok(config));
    }
}
