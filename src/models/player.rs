//! Tournament player model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type alias for player IDs, unique within a run.
pub type PlayerId = u32;

/// A tournament participant.
///
/// Immutable once the roster is loaded for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier
    pub id: PlayerId,

    /// Display name
    pub name: String,

    /// Average points scored across past tournaments, if known
    #[serde(default)]
    pub historical_average: Option<f64>,

    /// Whether betting odds should be displayed for this player
    #[serde(default = "default_show_odds")]
    pub show_odds: bool,
}

fn default_show_odds() -> bool {
    true
}

impl Player {
    /// Create a new Player with no history.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            historical_average: None,
            show_odds: default_show_odds(),
        }
    }

    /// Builder method to set the historical average score.
    pub fn with_historical_average(mut self, average: f64) -> Self {
        self.historical_average = Some(average);
        self
    }

    /// Builder method to control odds display.
    pub fn with_show_odds(mut self, show: bool) -> Self {
        self.show_odds = show;
        self
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new(0, "Alice");

        assert_eq!(player.id, 0);
        assert_eq!(player.name, "Alice");
        assert!(player.historical_average.is_none());
        assert!(player.show_odds);
    }

    #[test]
    fn test_player_builder() {
        let player = Player::new(3, "Bob")
            .with_historical_average(27.5)
            .with_show_odds(false);

        assert_eq!(player.historical_average, Some(27.5));
        assert!(!player.show_odds);
    }

    #[test]
    fn test_player_display() {
        let player = Player::new(1, "Carol");
        assert_eq!(format!("{}", player), "Carol");
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::new(2, "Dave").with_historical_average(12.0);

        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();

        assert_eq!(player.id, deserialized.id);
        assert_eq!(player.name, deserialized.name);
        assert_eq!(player.historical_average, deserialized.historical_average);
    }

    #[test]
    fn test_show_odds_defaults_on_deserialize() {
        let player: Player = serde_json::from_str(r#"{"id":5,"name":"Eve"}"#).unwrap();
        assert!(player.show_odds);
        assert!(player.historical_average.is_none());
    }
}
