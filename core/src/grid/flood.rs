use std::collections::VecDeque;

use super::*;

impl Grid {
    /// Computes the patch of `start`: breadth-first over 8-connectivity, only
    /// expanding past empty tiles. Numbered and mine tiles are included as the
    /// border but never expanded.
    ///
    /// `start` is always part of the patch. Reveal and flag state are ignored.
    pub(crate) fn find_patch(&self, start: TileIndex) -> Vec<TileIndex> {
        let mut visited = vec![false; self.tiles.len()];
        let mut to_visit = VecDeque::from([start]);
        let mut patch = Vec::new();
        visited[start] = true;

        while let Some(index) = to_visit.pop_front() {
            patch.push(index);

            let coords = self.coords_of(index);
            if !self.tiles[coords.to_nd_index()].is_empty() {
                continue;
            }

            for pos in self.tiles.iter_neighbors(coords) {
                let neighbor = self.index_of(pos.0, pos.1);
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    to_visit.push_back(neighbor);
                }
            }
        }

        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_patch(grid: &Grid, start: TileIndex) -> Vec<TileIndex> {
        let mut patch = grid.find_patch(start);
        patch.sort_unstable();
        patch
    }

    #[test]
    fn numbered_start_is_its_own_patch() {
        let grid = Grid::from_mine_indexes(3, 3, &[0]).unwrap();

        assert_eq!(grid.find_patch(4), vec![4]);
    }

    #[test]
    fn mine_start_is_its_own_patch_even_with_zero_count() {
        let grid = Grid::from_mine_indexes(3, 3, &[0]).unwrap();

        assert_eq!(grid.tile_at(0, 0).unwrap().adjacent_mines(), 0);
        assert_eq!(grid.find_patch(0), vec![0]);
    }

    #[test]
    fn patch_stops_at_numbered_border() {
        // column 2 is all mines, column 1 is the numbered border
        let grid = Grid::from_mine_indexes(3, 4, &[2, 6, 10]).unwrap();

        assert_eq!(sorted_patch(&grid, 0), vec![0, 1, 4, 5, 8, 9]);
    }

    #[test]
    fn patch_crosses_diagonal_gaps() {
        // the two empty quadrants only touch diagonally, between (1, 1) and (2, 2)
        let grid = Grid::from_mine_indexes(4, 4, &[3, 12]).unwrap();

        let patch = sorted_patch(&grid, 0);

        assert!(patch.contains(&10));
        assert!(patch.contains(&15));
        assert!(!patch.contains(&3));
        assert!(!patch.contains(&12));
    }

    #[test]
    fn patch_has_no_duplicates() {
        let grid = Grid::from_mine_indexes(6, 6, &[]).unwrap();

        let patch = sorted_patch(&grid, 14);

        assert_eq!(patch, (0..36).collect::<Vec<_>>());
    }
}
