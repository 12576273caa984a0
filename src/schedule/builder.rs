//! Round building: partitioning a shuffled pool into matches.

use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::ledger::MatchupLedger;
use super::selector::select_group;
use crate::models::{Match, Player, Round};

/// Partition the roster into one round of matches.
///
/// The working pool is shuffled before grouping so that, when the roster
/// does not divide evenly, the smaller match is not always drawn from the
/// same end of the roster. Match `i` is scheduled at
/// `round_start + match_length * i`.
pub fn build_round(
    roster: &[Player],
    round_id: u32,
    players_per_match: usize,
    ledger: &MatchupLedger,
    round_start: NaiveDateTime,
    match_length: Duration,
    rng: &mut StdRng,
) -> Round {
    let mut pool: Vec<Player> = roster.to_vec();
    pool.shuffle(rng);

    let mut matches = Vec::new();
    while !pool.is_empty() {
        let remaining = pool.len();
        // Spread an uneven remainder across one smaller match instead of
        // leaving a tiny leftover match at the end.
        let mut size = players_per_match;
        if remaining % players_per_match != 0 {
            size = players_per_match - 1;
        }
        let size = size.clamp(1, remaining);

        let chosen = select_group(&pool, size, ledger);
        let chosen_ids: Vec<_> = chosen.iter().map(|p| p.id).collect();
        pool.retain(|p| !chosen_ids.contains(&p.id));

        let match_id = matches.len() as u32;
        let time = round_start + match_length * match_id as i32;
        debug!(
            round = round_id,
            match_id,
            players = chosen.len(),
            "built match"
        );
        matches.push(Match::new(match_id, chosen, time));
    }

    Round::new(round_id, matches)
}
