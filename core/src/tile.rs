use serde::{Deserialize, Serialize};

/// State of a single board tile.
///
/// `adjacent_mines` is fixed once the board is generated, mine tiles included.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    revealed: bool,
    has_mine: bool,
    has_flag: bool,
    adjacent_mines: u8,
}

impl Tile {
    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn has_mine(self) -> bool {
        self.has_mine
    }

    pub const fn has_flag(self) -> bool {
        self.has_flag
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Whether flood fill keeps expanding past this tile.
    pub const fn is_empty(self) -> bool {
        !self.has_mine && self.adjacent_mines == 0
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn toggle_flag(&mut self) {
        self.has_flag = !self.has_flag;
    }

    pub(crate) fn set_mine(&mut self) {
        self.has_mine = true;
    }

    pub(crate) fn add_adjacent_mine(&mut self) {
        self.adjacent_mines += 1;
    }
}
