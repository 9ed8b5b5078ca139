//! Engine and server configuration, read from the environment.

use serde::{Deserialize, Serialize};

/// Last standings key applied after points and goal difference.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiebreakPolicy {
    /// Fewer goals conceded ranks higher.
    #[default]
    GoalsAgainst,
    /// More goals scored ranks higher.
    GoalsFor,
    /// Points and goal difference only.
    GoalDifference,
}

impl std::str::FromStr for TiebreakPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "goals_against" => Ok(TiebreakPolicy::GoalsAgainst),
            "goals_for" => Ok(TiebreakPolicy::GoalsFor),
            "goal_difference" => Ok(TiebreakPolicy::GoalDifference),
            other => Err(format!("unknown tiebreak policy '{}'", other)),
        }
    }
}

/// Settings that change engine output. Stored with the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub tiebreak: TiebreakPolicy,
    /// Minimum goals to appear in the top scorers list.
    pub top_scorer_min_goals: u32,
    /// Maximum goals conceded to appear in the best defense list.
    pub best_defense_max_conceded: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tiebreak: TiebreakPolicy::default(),
            top_scorer_min_goals: 5,
            best_defense_max_conceded: 45,
        }
    }
}

impl EngineConfig {
    /// Read `TIEBREAK`, `TOP_SCORER_MIN_GOALS` and `BEST_DEFENSE_MAX_CONCEDED`.
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("TIEBREAK") {
            match raw.parse() {
                Ok(policy) => config.tiebreak = policy,
                Err(e) => log::warn!("Ignoring TIEBREAK: {}", e),
            }
        }
        if let Some(n) = env_u32("TOP_SCORER_MIN_GOALS") {
            config.top_scorer_min_goals = n;
        }
        if let Some(n) = env_u32("BEST_DEFENSE_MAX_CONCEDED") {
            config.best_defense_max_conceded = n;
        }
        config
    }
}

/// Where the HTTP server listens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Read `HOST` and `PORT`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("HOST").unwrap_or(defaults.host);
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        Self { host, port }
    }
}

fn env_u32(key: &str) -> Option<u32> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            log::warn!("Ignoring {}: '{}' is not a non-negative integer", key, raw);
            None
        }
    }
}
