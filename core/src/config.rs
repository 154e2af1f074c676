use alloc::string::String;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Dimensions and mine count of one board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(rows, cols, mines).validate()
    }

    /// At least one row and column, and at least one safe cell.
    pub fn validate(self) -> Result<Self> {
        if self.rows <= 0 || self.cols <= 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidDimensions);
        }
        Ok(self)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl From<Difficulty> for BoardConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> BoardConfig {
        match self {
            Self::Easy => BoardConfig::new_unchecked(8, 8, 10),
            Self::Medium => BoardConfig::new_unchecked(16, 16, 40),
            Self::Hard => BoardConfig::new_unchecked(24, 24, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    /// Parses a preset name, ignoring ASCII case.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParseDifficultyError)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Front-end settings; every field falls back to its default when missing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player_name: String,
    pub difficulty: Difficulty,
    /// Overrides `difficulty` when present.
    pub custom: Option<BoardConfig>,
    pub seed_leaderboard: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: String::from(DEFAULT_PLAYER_NAME),
            difficulty: Difficulty::default(),
            custom: None,
            seed_leaderboard: true,
        }
    }
}

impl Settings {
    pub fn board_config(&self) -> Result<BoardConfig> {
        self.custom
            .unwrap_or_else(|| self.difficulty.config())
            .validate()
    }

    pub fn leaderboard(&self) -> Leaderboard {
        if self.seed_leaderboard {
            Leaderboard::with_demo_entries()
        } else {
            Leaderboard::new()
        }
    }
}
