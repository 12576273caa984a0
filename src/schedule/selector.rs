//! Group scoring and selection.

use tracing::debug;

use super::combinations::Combinations;
use super::ledger::MatchupLedger;
use crate::models::Player;

/// Heuristic repetition score for a candidate group: the sum of its prior
/// pair counts, plus the single worst pair, plus twice the best. Lower is
/// more novel. Groups smaller than two have no pairs and score 0.
///
/// The weighting is a heuristic, not a fairness guarantee: `sum` penalizes
/// total repetition, `max` keeps one bad pair from hiding behind fresh ones,
/// and the doubled `min` rejects groups whose least-repeated pair has
/// already met often.
pub fn uniqueness_score(group: &[&Player], ledger: &MatchupLedger) -> u32 {
    if group.len() < 2 {
        return 0;
    }

    let mut sum = 0u32;
    let mut max = 0u32;
    let mut min = u32::MAX;
    for (i, a) in group.iter().enumerate() {
        for b in &group[i + 1..] {
            let count = ledger.count(a.id, b.id);
            sum += count;
            max = max.max(count);
            min = min.min(count);
        }
    }

    sum + max + 2 * min
}

/// Choose `size` players out of `pool` minimizing the uniqueness score.
///
/// When no pair has ever met, any grouping is equally novel, so the first
/// `size` players are taken in pool order without searching. Otherwise every
/// k-of-n combination is scored exhaustively; the update condition is
/// `<=`, so the last combination achieving the minimum wins.
///
/// This is `C(n, k)` work per call, acceptable for rosters of tens of
/// players and group sizes 2-6.
pub fn select_group(pool: &[Player], size: usize, ledger: &MatchupLedger) -> Vec<Player> {
    if ledger.all_zero() {
        return pool.iter().take(size).cloned().collect();
    }

    let mut best: Option<(u32, Vec<usize>)> = None;
    let mut group: Vec<&Player> = Vec::with_capacity(size);
    for combination in Combinations::new(pool.len(), size) {
        group.clear();
        group.extend(combination.iter().map(|&i| &pool[i]));
        let score = uniqueness_score(&group, ledger);
        match &best {
            Some((best_score, _)) if score > *best_score => {}
            _ => best = Some((score, combination)),
        }
    }

    match best {
        Some((score, indices)) => {
            debug!(score, size = indices.len(), "selected group");
            indices.iter().map(|&i| pool[i].clone()).collect()
        }
        // Unreachable when size <= pool.len(); kept as a safe fallback.
        None => pool.iter().take(size).cloned().collect(),
    }
}
