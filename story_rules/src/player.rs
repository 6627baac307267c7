//! Player state and playthrough outcomes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health every playthrough starts with unless configured otherwise.
pub const INITIAL_HEALTH: i32 = 100;

/// Unique identifier for a single playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a playthrough ended, as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Lose,
    /// Neutral ending: the story stops without a verdict.
    #[default]
    Continue,
}

impl Outcome {
    /// Banner line printed under the final health.
    pub fn banner(&self) -> &'static str {
        match self {
            Outcome::Win => "YOU WIN",
            Outcome::Lose => "GAME OVER",
            Outcome::Continue => "THE END",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Continue => "continue",
        };
        f.write_str(name)
    }
}

/// The only mutable game state: the player's health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    health: i32,
}

impl PlayerState {
    /// Create a player with the given starting health (clamped at zero).
    pub fn new(initial_health: i32) -> Self {
        Self {
            health: initial_health.max(0),
        }
    }

    /// Current health, never negative.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Apply a health delta, clamping at zero. Returns the new health.
    pub fn apply_delta(&mut self, delta: i32) -> i32 {
        self.health = self.health.saturating_add(delta).max(0);
        self.health
    }

    /// Check if health has run out.
    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(INITIAL_HEALTH)
    }
}
