use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Derived from the board on every query, never stored.
///
/// Valid transitions:
/// - OnGoing -> Win
/// - OnGoing -> Loss
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    OnGoing,
    Win,
    Loss,
}

impl GameState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(flatten)]
    pub grid: GridConfig,
    pub flags_enabled: bool,
    /// Revealed mines tolerated before the game is lost is `lives - 1`.
    pub lives: CellCount,
}

impl SessionConfig {
    pub const fn new(grid: GridConfig, flags_enabled: bool, lives: CellCount) -> Self {
        Self {
            grid,
            flags_enabled,
            lives,
        }
    }

    pub fn validate(&self) -> Result<Self> {
        self.grid.validate()?;
        if self.lives == 0 {
            return Err(GameError::NoLives);
        }
        Ok(*self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Goes negative when more flags than mines are placed.
    pub remaining_mines: i64,
    pub remaining_lives: i64,
}

/// A single game from start to finish.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    grid: Grid,
    lives: CellCount,
    flags_enabled: bool,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn generate(config: SessionConfig, seed: impl Into<Seed>) -> Result<Self> {
        let config = config.validate()?;
        let grid = Grid::generate(config.grid, seed)?;
        Self::new(grid, config.flags_enabled, config.lives)
    }

    /// Starts a session on an existing board.
    pub fn new(grid: Grid, flags_enabled: bool, lives: CellCount) -> Result<Self> {
        if lives == 0 {
            return Err(GameError::NoLives);
        }

        let now = Utc::now();
        log::debug!("Session started at {}", now);
        let mut session = Self {
            grid,
            lives,
            flags_enabled,
            started_at: now,
            ended_at: None,
        };
        // an initial reveal can already cover every safe tile
        session.mark_ended_if_final();

        Ok(session)
    }

    pub fn config(&self) -> SessionConfig {
        SessionConfig {
            grid: GridConfig::new(self.grid.rows(), self.grid.cols(), self.grid.mine_count()),
            flags_enabled: self.flags_enabled,
            lives: self.lives,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> GameState {
        let stats = self.grid.stats();

        if stats.mines_revealed >= self.lives {
            return GameState::Loss;
        }

        let safe_revealed = stats.tiles_revealed - stats.mines_revealed;
        if safe_revealed == self.grid.safe_tile_count() {
            return GameState::Win;
        }

        GameState::OnGoing
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_final()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Time spent so far, frozen once the game ends.
    pub fn elapsed(&self) -> TimeDelta {
        self.ended_at.unwrap_or_else(Utc::now) - self.started_at
    }

    pub fn tile_at(&self, row: Coord, col: Coord) -> Result<Tile> {
        self.grid.tile_at(row, col)
    }

    pub fn session_stats(&self) -> SessionStats {
        let stats = self.grid.stats();

        SessionStats {
            started_at: self.started_at,
            ended_at: self.ended_at,
            remaining_mines: i64::from(self.grid.mine_count()) - i64::from(stats.flags_placed),
            remaining_lives: i64::from(self.lives) - i64::from(stats.mines_revealed),
        }
    }

    /// Reveals a tile and its patch. No-op once the game has ended.
    pub fn reveal_tile(&mut self, row: Coord, col: Coord) -> Result<Vec<TileIndex>> {
        if self.is_finished() {
            return Ok(Vec::new());
        }

        let revealed = self.grid.reveal_tile(row, col)?;
        self.mark_ended_if_final();

        Ok(revealed)
    }

    /// Toggles a flag. No-op when flags are disabled or the game has ended.
    pub fn toggle_flag(&mut self, row: Coord, col: Coord) -> Result<()> {
        if !self.flags_enabled || self.is_finished() {
            return Ok(());
        }

        self.grid.toggle_flag(row, col)
    }

    /// Chords a revealed tile. No-op once the game has ended.
    pub fn process_adjacent_tiles(&mut self, row: Coord, col: Coord) -> Result<Vec<TileIndex>> {
        if self.is_finished() {
            return Ok(Vec::new());
        }

        let revealed = self.grid.process_adjacent_tiles(row, col)?;
        self.mark_ended_if_final();

        Ok(revealed)
    }

    /// Records the end time on the first move that finishes the game.
    fn mark_ended_if_final(&mut self) {
        if self.ended_at.is_some() {
            return;
        }

        let state = self.state();
        if state.is_final() {
            let now = Utc::now();
            log::debug!("Session ended at {} with {:?}", now, state);
            self.ended_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rows: Coord, cols: Coord, mines: &[TileIndex], lives: CellCount) -> Session {
        let grid = Grid::from_mine_indexes(rows, cols, mines).unwrap();
        Session::new(grid, true, lives).unwrap()
    }

    #[test]
    fn fresh_session_is_ongoing() {
        let session = session(3, 3, &[0], 1);

        assert_eq!(session.state(), GameState::OnGoing);
        assert_eq!(session.ended_at(), None);
    }

    #[test]
    fn zero_lives_rejected() {
        let grid = Grid::from_mine_indexes(3, 3, &[0]).unwrap();

        assert_eq!(Session::new(grid, true, 0), Err(GameError::NoLives));
    }

    #[test]
    fn revealing_all_safe_tiles_wins() {
        let mut session = session(3, 3, &[0], 1);

        let revealed = session.reveal_tile(2, 2).unwrap();

        // the zero patch borders every safe tile
        assert_eq!(revealed.len(), 8);
        assert_eq!(session.state(), GameState::Win);
        assert!(session.ended_at().is_some());
    }

    #[test]
    fn extra_lives_tolerate_mines() {
        let mut session = session(3, 3, &[0, 8], 2);

        assert_eq!(session.reveal_tile(0, 0).unwrap(), vec![0]);
        assert_eq!(session.state(), GameState::OnGoing);
        assert_eq!(session.session_stats().remaining_lives, 1);

        session.reveal_tile(2, 2).unwrap();
        assert_eq!(session.state(), GameState::Loss);
        assert_eq!(session.session_stats().remaining_lives, 0);
    }

    #[test]
    fn loss_takes_precedence_over_win() {
        // every safe tile is revealed, but so is the only mine
        let mut grid = Grid::from_mine_indexes(1, 2, &[0]).unwrap();
        grid.reveal_tile(0, 0).unwrap();
        grid.reveal_tile(0, 1).unwrap();

        let session = Session::new(grid, true, 1).unwrap();

        assert_eq!(session.state(), GameState::Loss);
        assert!(session.ended_at().is_some());
    }

    #[test]
    fn chord_onto_misflagged_mine_loses() {
        let mut session = session(1, 3, &[0], 1);
        session.reveal_tile(0, 1).unwrap();
        session.toggle_flag(0, 2).unwrap();

        assert_eq!(session.process_adjacent_tiles(0, 1).unwrap(), vec![0]);
        assert_eq!(session.state(), GameState::Loss);
    }

    #[test]
    fn flags_disabled_ignores_toggles() {
        let grid = Grid::from_mine_indexes(3, 3, &[0]).unwrap();
        let mut session = Session::new(grid, false, 1).unwrap();

        session.toggle_flag(0, 0).unwrap();

        assert!(!session.tile_at(0, 0).unwrap().has_flag());
    }

    #[test]
    fn flags_disabled_skips_bounds_check() {
        let grid = Grid::from_mine_indexes(3, 3, &[0]).unwrap();
        let mut session = Session::new(grid, false, 1).unwrap();

        assert_eq!(session.toggle_flag(9, 9), Ok(()));
    }

    #[test]
    fn remaining_mines_follow_flags() {
        let mut session = session(3, 3, &[0], 1);

        session.toggle_flag(0, 0).unwrap();
        session.toggle_flag(0, 1).unwrap();

        assert_eq!(session.session_stats().remaining_mines, -1);
    }

    #[test]
    fn out_of_bounds_reveal_errors_while_ongoing() {
        let mut session = session(3, 3, &[0], 1);

        assert_eq!(
            session.reveal_tile(3, 3),
            Err(GameError::TileNotFound { row: 3, col: 3 })
        );
        assert_eq!(session.state(), GameState::OnGoing);
    }

    #[test]
    fn finished_session_ignores_all_moves() {
        let mut session = session(3, 3, &[0], 1);
        session.reveal_tile(0, 0).unwrap();
        let ended_at = session.ended_at();
        let before = session.grid().clone();

        assert!(session.reveal_tile(2, 2).unwrap().is_empty());
        assert!(session.process_adjacent_tiles(0, 0).unwrap().is_empty());
        session.toggle_flag(1, 1).unwrap();
        // out of bounds is not even checked anymore
        assert!(session.reveal_tile(7, 7).unwrap().is_empty());

        assert_eq!(session.grid(), &before);
        assert_eq!(session.ended_at(), ended_at);
    }

    #[test]
    fn elapsed_is_frozen_after_end() {
        let mut session = session(1, 2, &[0], 1);
        session.reveal_tile(0, 0).unwrap();

        let first = session.elapsed();
        assert_eq!(session.elapsed(), first);
        assert!(first >= TimeDelta::zero());
    }

    #[test]
    fn config_reflects_session() {
        let session = session(4, 5, &[1, 2], 3);

        assert_eq!(
            session.config(),
            SessionConfig::new(GridConfig::new(4, 5, 2), true, 3)
        );
    }
}
