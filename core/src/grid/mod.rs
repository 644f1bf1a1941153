use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;
pub use display::*;

mod display;
mod flood;

/// Aggregate counters, recomputed from the tiles on every call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridStats {
    pub tiles_revealed: CellCount,
    pub mines_revealed: CellCount,
    pub flags_placed: CellCount,
}

/// The board: dimensions, mine count and the tiles in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    tiles: Array2<Tile>,
    size: Coord2,
    mine_count: CellCount,
}

impl Grid {
    /// All-hidden board without mines, to be filled by `place_mine`.
    pub(crate) fn empty(size: Coord2, mine_count: CellCount) -> Self {
        Self {
            tiles: Array2::default(size.to_nd_index()),
            size,
            mine_count,
        }
    }

    /// Builds a board from explicit mine positions, without any initial reveal.
    ///
    /// Duplicate indexes count once.
    pub fn from_mine_indexes(rows: Coord, cols: Coord, mines: &[TileIndex]) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut grid = Self::empty((rows, cols), 0);
        for &index in mines {
            if index >= grid.tiles.len() {
                return Err(GameError::InvalidMineIndex { index });
            }
            if grid.place_mine(index) {
                grid.mine_count += 1;
            }
        }

        Ok(grid)
    }

    pub fn rows(&self) -> Coord {
        self.size.0
    }

    pub fn cols(&self) -> Coord {
        self.size.1
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> Coord2 {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn safe_tile_count(&self) -> CellCount {
        self.total_tiles() - self.mine_count
    }

    pub fn validate_coords(&self, row: Coord, col: Coord) -> Result<Coord2> {
        if row < self.size.0 && col < self.size.1 {
            Ok((row, col))
        } else {
            Err(GameError::TileNotFound { row, col })
        }
    }

    /// Flat index of `(row, col)`. Coordinates are not bounds checked.
    pub fn index_of(&self, row: Coord, col: Coord) -> TileIndex {
        usize::from(row) * usize::from(self.size.1) + usize::from(col)
    }

    /// Inverse of [`Grid::index_of`].
    ///
    /// # Panics
    ///
    /// When `index` is not below [`Grid::total_tiles`].
    pub fn coords_of(&self, index: TileIndex) -> Coord2 {
        assert!(
            index < self.tiles.len(),
            "tile index {index} outside a board of {} tiles",
            self.tiles.len()
        );
        let cols = usize::from(self.size.1);
        // both parts are below the u16 dimensions for in-range indexes
        ((index / cols) as Coord, (index % cols) as Coord)
    }

    pub fn tile_at(&self, row: Coord, col: Coord) -> Result<Tile> {
        let coords = self.validate_coords(row, col)?;
        Ok(self.tiles[coords.to_nd_index()])
    }

    /// Iterates tiles in flat index order.
    pub fn tiles(&self) -> impl Iterator<Item = (TileIndex, Tile)> + '_ {
        self.tiles.iter().copied().enumerate()
    }

    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats::default();

        for tile in self.tiles.iter() {
            if tile.has_flag() {
                stats.flags_placed += 1;
            }
            if tile.is_revealed() {
                stats.tiles_revealed += 1;
                if tile.has_mine() {
                    stats.mines_revealed += 1;
                }
            }
        }

        stats
    }

    /// Reveals the patch around `(row, col)`, returning the newly revealed indexes.
    ///
    /// Flagged and already revealed tiles are left alone and not reported.
    /// The returned indexes have no meaningful order.
    pub fn reveal_tile(&mut self, row: Coord, col: Coord) -> Result<Vec<TileIndex>> {
        let (row, col) = self.validate_coords(row, col)?;
        Ok(self.reveal_patch(self.index_of(row, col)))
    }

    /// Flips the flag on an unrevealed tile; revealed tiles are left unchanged.
    pub fn toggle_flag(&mut self, row: Coord, col: Coord) -> Result<()> {
        let coords = self.validate_coords(row, col)?;
        let tile = &mut self.tiles[coords.to_nd_index()];

        if !tile.is_revealed() {
            tile.toggle_flag();
            log::trace!("Toggled flag at {:?}, flagged: {}", coords, tile.has_flag());
        }

        Ok(())
    }

    /// Chords a revealed tile: when at least as many neighbours are flagged as
    /// the tile's number, reveals the tile and every unflagged hidden neighbour.
    ///
    /// Hidden targets and under-flagged targets are no-ops with an empty result.
    pub fn process_adjacent_tiles(&mut self, row: Coord, col: Coord) -> Result<Vec<TileIndex>> {
        let coords = self.validate_coords(row, col)?;
        let target = self.tiles[coords.to_nd_index()];

        if !target.is_revealed() {
            return Ok(Vec::new());
        }

        let mut adjacent_flags: u8 = 0;
        let mut candidates: SmallVec<[TileIndex; 9]> = smallvec![self.index_of(row, col)];
        for pos in self.tiles.iter_neighbors(coords) {
            let tile = self.tiles[pos.to_nd_index()];
            if tile.is_revealed() {
                continue;
            }
            if tile.has_flag() {
                adjacent_flags += 1;
                continue;
            }
            candidates.push(self.index_of(pos.0, pos.1));
        }

        if target.adjacent_mines() > adjacent_flags {
            log::trace!(
                "Not chording {:?}, needs {} flags, found {}",
                coords,
                target.adjacent_mines(),
                adjacent_flags
            );
            return Ok(Vec::new());
        }

        // each reveal only reports tiles it flipped, so the union has no duplicates
        let mut revealed = Vec::new();
        for candidate in candidates {
            revealed.extend(self.reveal_patch(candidate));
        }
        log::trace!("Chord at {:?} revealed {} tiles", coords, revealed.len());

        Ok(revealed)
    }

    fn reveal_patch(&mut self, start: TileIndex) -> Vec<TileIndex> {
        let patch = self.find_patch(start);
        let mut revealed = Vec::with_capacity(patch.len());

        for index in patch {
            let coords = self.coords_of(index);
            let tile = &mut self.tiles[coords.to_nd_index()];
            if tile.has_flag() || tile.is_revealed() {
                continue;
            }
            tile.reveal();
            revealed.push(index);
        }
        log::trace!(
            "Revealed {} tiles from {:?}",
            revealed.len(),
            self.coords_of(start)
        );

        revealed
    }

    /// Marks every tile of a precomputed patch revealed, flags notwithstanding.
    pub(crate) fn reveal_indexes(&mut self, indexes: &[TileIndex]) {
        for &index in indexes {
            let coords = self.coords_of(index);
            self.tiles[coords.to_nd_index()].reveal();
        }
    }

    /// Places a mine and bumps the counters of its neighbours.
    ///
    /// Returns `false` when the tile already holds a mine.
    pub(crate) fn place_mine(&mut self, index: TileIndex) -> bool {
        let coords = self.coords_of(index);
        let tile = &mut self.tiles[coords.to_nd_index()];
        if tile.has_mine() {
            return false;
        }
        tile.set_mine();

        for pos in self.tiles.iter_neighbors(coords) {
            self.tiles[pos.to_nd_index()].add_adjacent_mine();
        }

        true
    }

    pub(crate) fn tile_by_index(&self, index: TileIndex) -> Tile {
        self.tiles[self.coords_of(index).to_nd_index()]
    }
}
