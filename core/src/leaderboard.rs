use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: CellCount,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: CellCount) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

const DEMO_ENTRIES: [(&str, CellCount); 7] = [
    ("Saquib", 75),
    ("Maaz", 50),
    ("Arpit", 85),
    ("Bhaumik", 100),
    ("Eve", 60),
    ("Frank", 45),
    ("Grace", 120),
];

/// Player scores, kept in insertion order and ranked on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demo_entries() -> Self {
        DEMO_ENTRIES
            .iter()
            .map(|&(name, score)| LeaderboardEntry::new(name, score))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in storage order.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn score_of(&self, name: &str) -> Option<CellCount> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.score)
    }

    /// Keeps the best score per name: raises an existing entry to `max(old, score)`,
    /// otherwise appends a new one.
    ///
    /// Afterwards exactly one entry holds `name`. Seeded duplicates are folded into the
    /// first of them, which keeps its position.
    pub fn upsert(&mut self, name: &str, score: CellCount) -> Result<()> {
        if name.is_empty() {
            log::warn!("rejected leaderboard entry with empty name");
            return Err(GameError::InvalidName);
        }

        let Some(first) = self.entries.iter().position(|entry| entry.name == name) else {
            self.entries.push(LeaderboardEntry::new(name, score));
            return Ok(());
        };

        let best = self.entries[first..]
            .iter()
            .filter(|entry| entry.name == name)
            .fold(score, |best, entry| best.max(entry.score));
        self.entries[first].score = best;

        let mut index = 0;
        self.entries.retain(|entry| {
            let keep = index <= first || entry.name != name;
            index += 1;
            keep
        });
        Ok(())
    }

    /// Entries by score, highest first; equal scores keep their storage order.
    ///
    /// Recomputed on every call and leaves storage untouched.
    pub fn ranked(&self) -> impl Iterator<Item = &LeaderboardEntry> {
        let mut ranked: Vec<&LeaderboardEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.into_iter()
    }

    /// Ranked text, one `"{rank}. {name}: {score}"` line per entry.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl FromIterator<LeaderboardEntry> for Leaderboard {
    fn from_iter<I: IntoIterator<Item = LeaderboardEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Leaderboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, entry) in self.ranked().enumerate() {
            writeln!(f, "{}. {}: {}", rank + 1, entry.name, entry.score)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(ranked: impl Iterator<Item = &'a LeaderboardEntry>) -> Vec<(&'a str, CellCount)> {
        ranked.map(|entry| (entry.name.as_str(), entry.score)).collect()
    }

    #[test]
    fn upsert_keeps_best_score() {
        let mut board = Leaderboard::new();

        board.upsert("A", 50).unwrap();
        board.upsert("A", 30).unwrap();
        assert_eq!(board.score_of("A"), Some(50));

        board.upsert("A", 80).unwrap();
        assert_eq!(board.score_of("A"), Some(80));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn upsert_merges_duplicate_names() {
        let mut board: Leaderboard = [("A", 10), ("B", 5), ("A", 40), ("C", 7), ("A", 25)]
            .into_iter()
            .map(|(name, score)| LeaderboardEntry::new(name, score))
            .collect();

        board.upsert("A", 20).unwrap();

        assert_eq!(names(board.entries().iter()), [("A", 40), ("B", 5), ("C", 7)]);

        board.upsert("A", 90).unwrap();
        assert_eq!(board.score_of("A"), Some(90));
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn upsert_rejects_empty_name() {
        let mut board = Leaderboard::new();

        assert_eq!(board.upsert("", 10), Err(GameError::InvalidName));
        assert!(board.is_empty());
    }

    #[test]
    fn ranked_sorts_descending() {
        let board: Leaderboard = [("Saquib", 75), ("Maaz", 50), ("Arpit", 85)]
            .into_iter()
            .map(|(name, score)| LeaderboardEntry::new(name, score))
            .collect();

        assert_eq!(
            names(board.ranked()),
            [("Arpit", 85), ("Saquib", 75), ("Maaz", 50)]
        );
        // storage is untouched and the ranking is restartable
        assert_eq!(board.entries()[0].name, "Saquib");
        assert_eq!(names(board.ranked()), names(board.ranked()));
    }

    #[test]
    fn ranked_ties_keep_storage_order() {
        let board: Leaderboard = [("b", 10), ("a", 20), ("c", 10), ("d", 10)]
            .into_iter()
            .map(|(name, score)| LeaderboardEntry::new(name, score))
            .collect();

        assert_eq!(
            names(board.ranked()),
            [("a", 20), ("b", 10), ("c", 10), ("d", 10)]
        );
    }

    #[test]
    fn demo_board_renders_ranks() {
        let mut board = Leaderboard::with_demo_entries();
        board.upsert("Player", 54).unwrap();

        let text = board.render();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "1. Grace: 120");
        assert_eq!(lines[1], "2. Bhaumik: 100");
        assert_eq!(lines[7], "8. Frank: 45");
        assert_eq!(lines[5], "6. Player: 54");
    }
}
