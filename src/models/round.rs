//! Match and round models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Fraction, Player, PlayerId};

/// One group of players competing together at a scheduled time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    /// Creation index within the round
    pub id: u32,

    /// Players in this match, in selection order
    pub players: Vec<Player>,

    /// Scheduled start time
    pub time: NaiveDateTime,

    /// Fractional odds per player id, when odds are enabled and computable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odds: Option<BTreeMap<PlayerId, f64>>,
}

impl Match {
    /// Create a new Match with no odds attached.
    pub fn new(id: u32, players: Vec<Player>, time: NaiveDateTime) -> Self {
        Self {
            id,
            players,
            time,
            odds: None,
        }
    }

    /// The odds entry with the lowest value. Ties resolve to the lowest
    /// player id, since entries are visited in ascending id order.
    pub fn favoured(&self) -> Option<(PlayerId, f64)> {
        let odds = self.odds.as_ref()?;
        odds.iter()
            .fold(None, |best: Option<(PlayerId, f64)>, (&id, &value)| {
                match best {
                    Some((_, best_value)) if best_value <= value => best,
                    _ => Some((id, value)),
                }
            })
    }

    /// The odds entry with the highest value. Ties resolve to the lowest
    /// player id.
    pub fn underdog(&self) -> Option<(PlayerId, f64)> {
        let odds = self.odds.as_ref()?;
        odds.iter()
            .fold(None, |best: Option<(PlayerId, f64)>, (&id, &value)| {
                match best {
                    Some((_, best_value)) if best_value >= value => best,
                    _ => Some((id, value)),
                }
            })
    }

    fn player_name(&self, id: PlayerId) -> &str {
        self.players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
            .unwrap_or("?")
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self
            .players
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Match [{}] [{}] [{}]",
            self.id + 1,
            self.time.format("%I:%M %p"),
            names
        )?;

        if let Some(odds) = &self.odds {
            let favoured = self.favoured().map(|(id, _)| id);
            let underdog = self.underdog().map(|(id, _)| id);
            let entries = odds
                .iter()
                .map(|(&id, &value)| {
                    let tag = if Some(id) == favoured {
                        " (favoured)"
                    } else if Some(id) == underdog {
                        " (underdog)"
                    } else {
                        ""
                    };
                    format!("{}{} {}", self.player_name(id), tag, Fraction::from_real(value))
                })
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " [{}]", entries)?;
        }

        Ok(())
    }
}

/// One full partition of the roster into matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    /// Creation order, 0-based
    pub id: u32,

    /// Matches in creation order
    pub matches: Vec<Match>,
}

impl Round {
    pub fn new(id: u32, matches: Vec<Match>) -> Self {
        Self { id, matches }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let matches = self
            .matches
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        write!(f, "Round [{}]\n[{}]", self.id + 1, matches)
    }
}
