use core::fmt;

use super::*;

/// Text rendering of a [`Grid`], one line per row.
///
/// `_` hidden, `F` flag, `X` mine, digits for revealed counts.
#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: &'a Grid,
    reveal_all: bool,
}

impl Grid {
    /// Renders the board; with `reveal_all` hidden tiles are drawn as if revealed.
    pub fn display(&self, reveal_all: bool) -> GridDisplay<'_> {
        GridDisplay {
            grid: self,
            reveal_all,
        }
    }
}

impl fmt::Display for GridDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.tiles.rows() {
            for tile in row {
                if tile.is_revealed() || self.reveal_all {
                    if tile.has_mine() {
                        write!(f, " X ")?;
                    } else {
                        write!(f, " {} ", tile.adjacent_mines())?;
                    }
                } else if tile.has_flag() {
                    write!(f, " F ")?;
                } else {
                    write!(f, " _ ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
