//! Tournament scheduling.
//!
//! Builds a multi-round schedule that keeps repeat pairings to a minimum:
//! - **ledger**: symmetric pairwise matchup counts
//! - **combinations**: k-of-n index enumeration
//! - **selector**: uniqueness scoring and group selection
//! - **builder**: one round's partition of the roster

pub mod builder;
pub mod combinations;
pub mod ledger;
pub mod selector;

use std::collections::BTreeSet;

use chrono::{Duration, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::info;

use crate::calculate::compute_match_odds;
use crate::config::ScheduleConfig;
use crate::models::{Player, PlayerId, Round};
use builder::build_round;
use ledger::MatchupLedger;

/// Errors that can occur while scheduling.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("players per match must be at least 1")]
    InvalidMatchSize,

    #[error("roster is empty")]
    EmptyRoster,

    #[error("duplicate player id: {0}")]
    DuplicatePlayer(PlayerId),
}

/// Orchestrates a full tournament run: owns the roster, mutates the ledger
/// between rounds and accumulates the produced rounds.
pub struct Scheduler {
    config: ScheduleConfig,
    roster: Vec<Player>,
}

impl Scheduler {
    /// Validate inputs and build a scheduler. Configuration errors are
    /// rejected here, before any round is built.
    pub fn new(config: ScheduleConfig, roster: Vec<Player>) -> Result<Self, ScheduleError> {
        if config.players_per_match == 0 {
            return Err(ScheduleError::InvalidMatchSize);
        }
        if roster.is_empty() {
            return Err(ScheduleError::EmptyRoster);
        }
        let mut seen = BTreeSet::new();
        for player in &roster {
            if !seen.insert(player.id) {
                return Err(ScheduleError::DuplicatePlayer(player.id));
            }
        }
        Ok(Self { config, roster })
    }

    /// Run the configured number of rounds and return them in order.
    ///
    /// Group selection within a round only depends on prior rounds'
    /// accumulated counts; the ledger is folded forward once per round,
    /// after that round's groups are finalized.
    pub fn run(&self) -> Vec<Round> {
        let mut ledger = MatchupLedger::new();
        ledger.seed_pairs(&self.roster);

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let start = self
            .config
            .start_time
            .unwrap_or_else(|| Local::now().naive_local());
        let match_length = Duration::minutes(self.config.match_length_minutes as i64);
        let break_length = Duration::minutes(self.config.break_length_minutes as i64);
        let matches_per_round = (self.roster.len() + self.config.players_per_match - 1)
            / self.config.players_per_match;
        let round_length = match_length * matches_per_round as i32 + break_length;

        let mut rounds = Vec::with_capacity(self.config.rounds as usize);
        for round_id in 0..self.config.rounds {
            let round_start = start + round_length * round_id as i32;
            let mut round = build_round(
                &self.roster,
                round_id,
                self.config.players_per_match,
                &ledger,
                round_start,
                match_length,
                &mut rng,
            );

            for m in &round.matches {
                ledger.record_group(&m.players);
            }

            if self.config.odds {
                for m in &mut round.matches {
                    m.odds = compute_match_odds(&m.players);
                }
            }

            info!(
                round = round_id,
                matches = round.matches.len(),
                pair_total = ledger.total(),
                "built round"
            );
            rounds.push(round);
        }

        rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn roster(count: u32) -> Vec<Player> {
        (0..count)
            .map(|id| Player::new(id, format!("P{}", id)).with_historical_average(10.0 + id as f64))
            .collect()
    }

    fn config(players_per_match: usize, rounds: u32, seed: u64) -> ScheduleConfig {
        ScheduleConfig {
            players_per_match,
            rounds,
            match_length_minutes: 15,
            break_length_minutes: 5,
            start_time: Some(
                NaiveDate::from_ymd_opt(2026, 8, 1)
                    .unwrap()
                    .and_hms_opt(18, 0, 0)
                    .unwrap(),
            ),
            odds: true,
            seed: Some(seed),
        }
    }

    #[test]
    fn test_rejects_zero_match_size() {
        let result = Scheduler::new(config(0, 1, 1), roster(4));
        assert!(matches!(result, Err(ScheduleError::InvalidMatchSize)));
    }

    #[test]
    fn test_rejects_empty_roster() {
        let result = Scheduler::new(config(4, 1, 1), Vec::new());
        assert!(matches!(result, Err(ScheduleError::EmptyRoster)));
    }

    #[test]
    fn test_rejects_duplicate_player_ids() {
        let mut players = roster(3);
        players.push(Player::new(1, "Imposter"));
        let result = Scheduler::new(config(2, 1, 1), players);
        assert!(matches!(result, Err(ScheduleError::DuplicatePlayer(1))));
    }

    #[test]
    fn test_every_round_partitions_roster() {
        let players = roster(10);
        let scheduler = Scheduler::new(config(4, 5, 11), players.clone()).unwrap();

        let rounds = scheduler.run();
        assert_eq!(rounds.len(), 5);

        let all: BTreeSet<PlayerId> = players.iter().map(|p| p.id).collect();
        for round in &rounds {
            let mut seen = BTreeSet::new();
            for m in &round.matches {
                for p in &m.players {
                    assert!(seen.insert(p.id), "player {} duplicated", p.id);
                }
            }
            assert_eq!(seen, all);
        }
    }

    #[test]
    fn test_round_ids_follow_creation_order() {
        let scheduler = Scheduler::new(config(3, 4, 2), roster(6)).unwrap();
        let rounds = scheduler.run();
        for (i, round) in rounds.iter().enumerate() {
            assert_eq!(round.id, i as u32);
        }
    }

    #[test]
    fn test_ledger_total_matches_pairs_formed() {
        let players = roster(8);
        let scheduler = Scheduler::new(config(4, 3, 5), players.clone()).unwrap();
        let rounds = scheduler.run();

        let expected: u64 = rounds
            .iter()
            .flat_map(|r| &r.matches)
            .map(|m| {
                let k = m.players.len() as u64;
                k * (k - 1) / 2
            })
            .sum();

        let mut ledger = MatchupLedger::new();
        for round in &rounds {
            for m in &round.matches {
                ledger.record_group(&m.players);
            }
        }
        assert_eq!(ledger.total(), expected);
    }

    #[test]
    fn test_round_starts_are_spaced_by_round_length() {
        let scheduler = Scheduler::new(config(4, 3, 8), roster(8)).unwrap();
        let rounds = scheduler.run();

        // 2 matches of 15 minutes plus a 5 minute break per round.
        let round_length = Duration::minutes(2 * 15 + 5);
        let start = rounds[0].matches[0].time;
        for (i, round) in rounds.iter().enumerate() {
            assert_eq!(round.matches[0].time, start + round_length * i as i32);
        }
    }

    #[test]
    fn test_odds_attached_when_enabled() {
        let scheduler = Scheduler::new(config(4, 1, 3), roster(8)).unwrap();
        let rounds = scheduler.run();
        for m in &rounds[0].matches {
            let odds = m.odds.as_ref().expect("odds should be attached");
            assert_eq!(odds.len(), m.players.len());
        }
    }

    #[test]
    fn test_odds_absent_when_disabled() {
        let mut cfg = config(4, 1, 3);
        cfg.odds = false;
        let scheduler = Scheduler::new(cfg, roster(8)).unwrap();
        let rounds = scheduler.run();
        for m in &rounds[0].matches {
            assert!(m.odds.is_none());
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let players = roster(9);
        let first = Scheduler::new(config(4, 4, 77), players.clone())
            .unwrap()
            .run();
        let second = Scheduler::new(config(4, 4, 77), players).unwrap().run();

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn test_zero_rounds_yields_empty_schedule() {
        let scheduler = Scheduler::new(config(4, 0, 1), roster(4)).unwrap();
        assert!(scheduler.run().is_empty());
    }
}
