use thiserror::Error;

use crate::{CellCount, Coord, TileIndex};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Tile not found for row index {row} and col index {col}")]
    TileNotFound { row: Coord, col: Coord },
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Too many mines, requested {mines} but the board has {tiles} tiles")]
    TooManyMines { mines: CellCount, tiles: CellCount },
    #[error("A game needs at least one life")]
    NoLives,
    #[error("Mine index {index} is outside the board")]
    InvalidMineIndex { index: TileIndex },
    #[error("Unknown difficulty preset {0:?}")]
    UnknownPreset(String),
    #[error("Invalid difficulty presets: {0}")]
    InvalidPresets(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
