use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Counted attempts at finding a large enough opening.
pub const INITIAL_PATCH_MAX_ITERATIONS: u32 = 10;

/// Smallest accepted opening, as a fraction of `rows + cols`.
pub const INITIAL_PATCH_MIN_COVERAGE: f32 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitialReveal {
    /// Leave the whole board hidden.
    Hidden,
    /// Try to open a random zero patch.
    Patch,
}

/// Rejection-sampling generator: mines are drawn first, then the candidates
/// for the initial patch, all from a single seeded RNG.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
    initial_reveal: InitialReveal,
}

impl RandomGridGenerator {
    pub fn new(seed: u64, initial_reveal: InitialReveal) -> Self {
        Self {
            seed,
            initial_reveal,
        }
    }

    pub fn generate(self, config: GridConfig) -> Result<Grid> {
        let config = config.validate()?;
        log::debug!(
            "Generating {}x{} grid with {} mines, seed {}",
            config.rows,
            config.cols,
            config.mines,
            self.seed
        );

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut grid = Grid::empty(config.size(), config.mines);

        place_mines(&mut grid, &mut rng);

        match self.initial_reveal {
            InitialReveal::Hidden => {}
            InitialReveal::Patch => match reveal_initial_patch(&mut grid, &mut rng) {
                Some(size) => log::debug!("Initial patch revealed {} tiles", size),
                None => log::debug!("No initial patch, board left hidden"),
            },
        }

        Ok(grid)
    }
}

/// Draws tile indexes until `grid.mine_count()` distinct mines are placed.
///
/// The caller guarantees at least one tile stays free.
fn place_mines(grid: &mut Grid, rng: &mut SmallRng) {
    let total = grid.total_tiles() as TileIndex;
    let mut placed: CellCount = 0;

    while placed < grid.mine_count() {
        let index = rng.random_range(0..total);
        if grid.place_mine(index) {
            placed += 1;
        }
    }
}

/// Reveals a random zero patch covering at least
/// `INITIAL_PATCH_MIN_COVERAGE * (rows + cols)` tiles.
///
/// Draws that land on a mine or a numbered tile are redrawn without using up
/// an attempt. Returns the patch size when one was revealed.
fn reveal_initial_patch(grid: &mut Grid, rng: &mut SmallRng) -> Option<usize> {
    // redraws are free, so without any empty tile the loop would never end
    if !grid.tiles().any(|(_, tile)| tile.is_empty()) {
        return None;
    }

    let total = grid.total_tiles() as TileIndex;
    let (rows, cols) = grid.dimensions();
    let min_size = INITIAL_PATCH_MIN_COVERAGE * (u32::from(rows) + u32::from(cols)) as f32;

    let mut iterations = 0;
    while iterations < INITIAL_PATCH_MAX_ITERATIONS {
        let index = rng.random_range(0..total);
        if !grid.tile_by_index(index).is_empty() {
            continue;
        }
        iterations += 1;

        let patch = grid.find_patch(index);
        if (patch.len() as f32) < min_size {
            log::trace!(
                "Patch of {} tiles from {:?} too small, attempt {}",
                patch.len(),
                grid.coords_of(index),
                iterations
            );
            continue;
        }

        grid.reveal_indexes(&patch);
        return Some(patch.len());
    }

    None
}
