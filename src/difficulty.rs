use serde::{Deserialize, Serialize};

use crate::{CellCount, Coord, GameConfig};

/// Named difficulty tier. Unknown names are resolved to [`Difficulty::Easy`]
/// by the engine, not here; the catalog itself is a pure lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

/// Static board parameters for one difficulty tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DifficultyPreset {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    pub base_score: u32,
}

impl Difficulty {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub const fn preset(self) -> DifficultyPreset {
        match self {
            Self::Easy => DifficultyPreset {
                rows: 9,
                cols: 9,
                mines: 10,
                base_score: 1000,
            },
            Self::Medium => DifficultyPreset {
                rows: 16,
                cols: 16,
                mines: 40,
                base_score: 3000,
            },
            Self::Hard => DifficultyPreset {
                rows: 30,
                cols: 16,
                mines: 99,
                base_score: 5000,
            },
        }
    }

    pub const fn config(self) -> GameConfig {
        let preset = self.preset();
        GameConfig::new_unchecked(preset.rows, preset.cols, preset.mines)
    }

    /// Weight applied when deriving a base score for custom board dimensions.
    pub const fn score_weight(self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.5,
            Self::Hard => 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_matches_classic_tiers() {
        let easy = Difficulty::Easy.preset();
        assert_eq!((easy.rows, easy.cols, easy.mines, easy.base_score), (9, 9, 10, 1000));

        let medium = Difficulty::Medium.preset();
        assert_eq!(
            (medium.rows, medium.cols, medium.mines, medium.base_score),
            (16, 16, 40, 3000)
        );

        let hard = Difficulty::Hard.preset();
        assert_eq!((hard.rows, hard.cols, hard.mines, hard.base_score), (30, 16, 99, 5000));
    }

    #[test]
    fn unknown_names_are_not_resolved_here() {
        assert_eq!(Difficulty::from_name("medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_name("nightmare"), None);
        assert_eq!(Difficulty::from_name("EASY"), None);
    }

    #[test]
    fn wire_names_are_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
    }
}
