use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LevelError;

/// One of the four quiz tiers, in increasing difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Beginner,
        Level::Intermediate,
        Level::Advanced,
        Level::Expert,
    ];

    /// Wire number of the level (1..=4).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Level::Beginner => 1,
            Level::Intermediate => 2,
            Level::Advanced => 3,
            Level::Expert => 4,
        }
    }

    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Level::Beginner),
            2 => Some(Level::Intermediate),
            3 => Some(Level::Advanced),
            4 => Some(Level::Expert),
            _ => None,
        }
    }

    /// Zero-based position, for fixed-size per-level storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.number() as usize - 1
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
            Level::Expert => "Expert",
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Level::Expert)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}: {}", self.number(), self.name())
    }
}

impl TryFrom<u8> for Level {
    type Error = LevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value).ok_or(LevelError::OutOfRange(value))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_chain_to_expert() {
        assert_eq!(Level::Beginner.next(), Some(Level::Intermediate));
        assert_eq!(Level::Advanced.next(), Some(Level::Expert));
        assert_eq!(Level::Expert.next(), None);
        assert!(Level::Expert.is_final());
    }

    #[test]
    fn numbers_round_trip_through_index() {
        for (i, level) in Level::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
            assert_eq!(Level::from_number(level.number()), Some(*level));
        }
    }

    #[test]
    fn out_of_range_number_is_rejected() {
        assert_eq!(Level::try_from(0), Err(LevelError::OutOfRange(0)));
        assert!(serde_json::from_str::<Level>("5").is_err());
        assert_eq!(serde_json::from_str::<Level>("3").unwrap(), Level::Advanced);
    }

    #[test]
    fn display_includes_name() {
        assert_eq!(Level::Expert.to_string(), "Level 4: Expert");
    }
}
