//! Betting odds computation.
//!
//! Converts historical average scores into "odds against" fractional odds
//! for the players within a match.

use std::collections::BTreeMap;

use crate::models::{Player, PlayerId};

/// Fractional "odds against" for an implied probability: `(1 - p) / p`.
/// Probability 0.25 gives 3.0, read "3 to 1".
pub fn fractional_odds(probability: f64) -> f64 {
    (1.0 - probability) / probability
}

/// Implied win probability for one score within a match's total.
pub fn win_probability(score: f64, total: f64) -> f64 {
    score / total
}

/// Compute fractional odds for every eligible player in a match.
///
/// Eligible players have their show-odds flag set and a strictly positive
/// historical average; zero-score players are omitted rather than given an
/// infinite value. Returns `None` when the match's summed historical scores
/// is not strictly positive or no player is eligible - that is an expected
/// state, not an error.
pub fn compute_match_odds(players: &[Player]) -> Option<BTreeMap<PlayerId, f64>> {
    let total: f64 = players.iter().filter_map(|p| p.historical_average).sum();
    if total <= 0.0 {
        return None;
    }

    let mut odds = BTreeMap::new();
    for player in players {
        if !player.show_odds {
            continue;
        }
        let score = player.historical_average.unwrap_or(0.0);
        if score <= 0.0 {
            continue;
        }
        odds.insert(player.id, fractional_odds(win_probability(score, total)));
    }

    if odds.is_empty() {
        None
    } else {
        Some(odds)
    }
}
