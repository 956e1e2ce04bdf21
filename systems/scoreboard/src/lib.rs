#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ranked list of winning rounds, kept separately for every difficulty tier.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use maze_escape_core::{Difficulty, Event, RoundState};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Number of entries retained per difficulty tier.
pub const CAPACITY: usize = 10;

/// Name recorded when the player leaves theirs blank.
pub const ANONYMOUS: &str = "Anonymous";

/// Single winning round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Display name of the player.
    pub name: String,
    /// Accepted hero moves needed to reach the exit.
    pub moves: u32,
    /// Level that was won.
    pub level: u32,
    /// When the round was won.
    pub recorded_at: DateTime<Utc>,
}

/// Top scores grouped by difficulty tier, fewest moves first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    tiers: BTreeMap<Difficulty, Vec<ScoreEntry>>,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a win and returns its zero-based rank if it made the list.
    ///
    /// Entries with equal move counts keep their insertion order, so an
    /// older score outranks a newer tie.
    pub fn record(
        &mut self,
        difficulty: Difficulty,
        name: &str,
        moves: u32,
        level: u32,
        recorded_at: DateTime<Utc>,
    ) -> Option<usize> {
        let name = match name.trim() {
            "" => ANONYMOUS.to_owned(),
            trimmed => trimmed.to_owned(),
        };
        let entries = self.tiers.entry(difficulty).or_default();
        entries.push(ScoreEntry {
            name,
            moves,
            level,
            recorded_at,
        });
        let newest = entries.len() - 1;

        let mut ranked: Vec<(usize, ScoreEntry)> = entries.drain(..).enumerate().collect();
        ranked.sort_by_key(|(_, entry)| entry.moves);
        ranked.truncate(CAPACITY);
        let rank = ranked.iter().position(|(index, _)| *index == newest);
        entries.extend(ranked.into_iter().map(|(_, entry)| entry));

        info!(%difficulty, moves, level, ?rank, "score recorded");
        rank
    }

    /// Ranked entries for `difficulty`, best first.
    #[must_use]
    pub fn entries(&self, difficulty: Difficulty) -> &[ScoreEntry] {
        self.tiers
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Records every won round found in `events` under `name`.
    ///
    /// Returns the rank of the last recorded entry.
    pub fn handle(
        &mut self,
        events: &[Event],
        name: &str,
        recorded_at: DateTime<Utc>,
    ) -> Option<usize> {
        let mut rank = None;
        for event in events {
            if let Event::RoundEnded {
                state: RoundState::Won,
                move_count,
                difficulty,
                level,
                ..
            } = event
            {
                rank = self.record(*difficulty, name, *move_count, *level, recorded_at);
            }
        }
        rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, second)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn blank_names_become_anonymous() {
        let mut scoreboard = Scoreboard::new();
        let _ = scoreboard.record(Difficulty::Easy, "   ", 12, 1, at(0));
        let _ = scoreboard.record(Difficulty::Easy, " Ada ", 14, 1, at(1));

        let names: Vec<_> = scoreboard
            .entries(Difficulty::Easy)
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec![ANONYMOUS, "Ada"]);
    }

    #[test]
    fn ties_keep_the_older_entry_first() {
        let mut scoreboard = Scoreboard::new();
        assert_eq!(scoreboard.record(Difficulty::Hard, "first", 20, 1, at(0)), Some(0));
        assert_eq!(scoreboard.record(Difficulty::Hard, "second", 20, 1, at(1)), Some(1));
        assert_eq!(scoreboard.record(Difficulty::Hard, "third", 5, 1, at(2)), Some(0));

        let names: Vec<_> = scoreboard
            .entries(Difficulty::Hard)
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }

    #[test]
    fn tiers_are_independent() {
        let mut scoreboard = Scoreboard::new();
        let _ = scoreboard.record(Difficulty::Medium, "Ada", 9, 2, at(0));

        assert_eq!(scoreboard.entries(Difficulty::Medium).len(), 1);
        assert!(scoreboard.entries(Difficulty::Easy).is_empty());
        assert!(scoreboard.entries(Difficulty::Hard).is_empty());
    }
}
