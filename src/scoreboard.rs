//! Final match scoreboard
//!
//! Golf scoring: fewest total strokes ranks first. Players on equal totals
//! share a rank and keep roster order.

use serde::{Deserialize, Serialize};

use crate::sim::MatchState;

/// A single scoreboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// 1-indexed rank (ties share the better rank)
    pub rank: usize,
    pub player_id: u32,
    pub name: String,
    pub total_strokes: u32,
    pub color: u32,
}

/// Ranked results of a match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub entries: Vec<ScoreEntry>,
    /// Number of holes the totals cover
    pub holes_played: usize,
}

impl Scoreboard {
    /// Rank the players of a match by total strokes
    pub fn from_match(state: &MatchState) -> Self {
        let mut entries: Vec<ScoreEntry> = Vec::with_capacity(state.players.len());

        for (i, player) in state.standings().into_iter().enumerate() {
            let rank = match entries.last() {
                Some(prev) if prev.total_strokes == player.total_strokes => prev.rank,
                _ => i + 1,
            };
            entries.push(ScoreEntry {
                rank,
                player_id: player.id,
                name: player.name.clone(),
                total_strokes: player.total_strokes,
                color: player.color,
            });
        }

        Self {
            entries,
            holes_played: state.current_level_index.min(state.levels_queue.len()),
        }
    }

    /// Check if the scoreboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Players sharing first place
    pub fn winners(&self) -> impl Iterator<Item = &ScoreEntry> {
        self.entries.iter().filter(|e| e.rank == 1)
    }

    /// Render as pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Player, default_catalog};
    use crate::tuning::Tuning;

    fn finished(totals: &[u32]) -> MatchState {
        let players = totals
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let mut p = Player::new(i as u32 + 1);
                p.total_strokes = t;
                p
            })
            .collect();
        MatchState::with_levels(players, default_catalog(), Tuning::default())
    }

    #[test]
    fn test_ranking_ascending_with_ties() {
        let board = Scoreboard::from_match(&finished(&[12, 9, 12, 15]));
        let rows: Vec<(usize, u32)> = board.entries.iter().map(|e| (e.rank, e.player_id)).collect();
        assert_eq!(rows, vec![(1, 2), (2, 1), (2, 3), (4, 4)]);
        assert_eq!(board.winners().count(), 1);
    }

    #[test]
    fn test_shared_first_place() {
        let board = Scoreboard::from_match(&finished(&[7, 7]));
        assert_eq!(board.winners().count(), 2);
    }

    #[test]
    fn test_empty_match() {
        let state = MatchState::with_levels(vec![], default_catalog(), Tuning::default());
        let board = Scoreboard::from_match(&state);
        assert!(board.is_empty());
        assert_eq!(board.winners().count(), 0);
    }

    #[test]
    fn test_json_export() {
        let json = Scoreboard::from_match(&finished(&[3])).to_json().unwrap();
        let back: Scoreboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries[0].name, "Player 1");
        assert_eq!(back.entries[0].total_strokes, 3);
    }
}
