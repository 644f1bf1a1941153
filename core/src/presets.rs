use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::*;

/// Board size and mine count for a named difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl Difficulty {
    pub const BEGINNER: Self = Self::new(9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new(16, 16, 40);
    pub const EXPERT: Self = Self::new(16, 30, 99);

    pub const fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub const fn grid_config(self) -> GridConfig {
        GridConfig::new(self.rows, self.cols, self.mines)
    }

    pub const fn session_config(self, flags_enabled: bool, lives: CellCount) -> SessionConfig {
        SessionConfig::new(self.grid_config(), flags_enabled, lives)
    }
}

/// Named difficulties, as shipped in the game's JSON config file.
///
/// ```json
/// { "size_options": { "Beginner": { "rows": 9, "cols": 9, "mines": 10 } } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presets {
    size_options: BTreeMap<String, Difficulty>,
}

impl Presets {
    pub fn builtin() -> Self {
        let size_options = [
            ("Beginner", Difficulty::BEGINNER),
            ("Intermediate", Difficulty::INTERMEDIATE),
            ("Expert", Difficulty::EXPERT),
        ]
        .into_iter()
        .map(|(name, difficulty)| (name.to_owned(), difficulty))
        .collect();

        Self { size_options }
    }

    /// Parses a preset table, rejecting entries that could never be generated.
    pub fn from_json(json: &str) -> Result<Self> {
        let presets: Self =
            serde_json::from_str(json).map_err(|err| GameError::InvalidPresets(err.to_string()))?;

        if presets.size_options.is_empty() {
            return Err(GameError::InvalidPresets("no size options".to_owned()));
        }
        for (name, difficulty) in &presets.size_options {
            if let Err(err) = difficulty.grid_config().validate() {
                log::warn!("Rejecting difficulty preset {:?}: {}", name, err);
                return Err(err);
            }
        }

        Ok(presets)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| GameError::InvalidPresets(err.to_string()))
    }

    pub fn get(&self, name: &str) -> Result<Difficulty> {
        self.size_options
            .get(name)
            .copied()
            .ok_or_else(|| GameError::UnknownPreset(name.to_owned()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.size_options.keys().map(String::as_str)
    }
}

impl Default for Presets {
    fn default() -> Self {
        Self::builtin()
    }
}
