use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Source for the numeric seed of a board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seed {
    /// Seeded from the wall clock, a different board every time.
    #[default]
    Clock,
    /// Player-entered text, hashed into a numeric seed.
    Text(String),
    Value(u64),
}

impl Seed {
    pub fn resolve(&self) -> u64 {
        match self {
            Self::Clock => clock_seed(),
            Self::Text(text) if text.is_empty() => clock_seed(),
            Self::Text(text) => text_seed(text),
            Self::Value(value) => *value,
        }
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        if text.is_empty() {
            Self::Clock
        } else {
            Self::Text(text.into())
        }
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        if text.is_empty() {
            Self::Clock
        } else {
            Self::Text(text)
        }
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self::Value(value)
    }
}

fn clock_seed() -> u64 {
    Utc::now().timestamp_micros().unsigned_abs()
}

/// FNV-1a over the UTF-8 bytes.
fn text_seed(text: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    text.bytes().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

impl Grid {
    /// Generates a board with randomly placed mines and a best-effort opening.
    pub fn generate(config: GridConfig, seed: impl Into<Seed>) -> Result<Self> {
        RandomGridGenerator::new(seed.into().resolve(), InitialReveal::Patch).generate(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_falls_back_to_clock() {
        assert_eq!(Seed::from(""), Seed::Clock);
        assert_eq!(Seed::from(String::new()), Seed::Clock);
    }

    #[test]
    fn text_seed_is_stable() {
        assert_eq!(Seed::from("hello").resolve(), Seed::from("hello").resolve());
    }

    #[test]
    fn text_seed_tells_anagrams_apart() {
        assert_ne!(Seed::from("ab").resolve(), Seed::from("ba").resolve());
    }

    #[test]
    fn value_seed_is_used_verbatim() {
        assert_eq!(Seed::from(42u64).resolve(), 42);
    }
}
