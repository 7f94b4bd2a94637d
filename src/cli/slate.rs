//! Weekly slate files.
//!
//! ```toml
//! bankroll = 10000
//! is_playoff = false
//!
//! [[games]]
//! home = "KC"
//! away = "BAL"
//! market_spread = 3.0
//! division_game = false
//! rest = { home = 7, away = 7 }
//! weather = { temperature_f = 28.0, wind_mph = 16.0, precipitation = false }
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::domain::{matchup_key, AmericanOdds, GameContext, Team};
use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Slate {
    #[serde(default)]
    pub bankroll: Option<Decimal>,
    #[serde(default)]
    pub is_playoff: bool,
    #[serde(default)]
    pub odds: AmericanOdds,
    #[serde(default)]
    pub games: Vec<SlateGame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlateGame {
    pub home: Team,
    pub away: Team,
    /// Home-relative, positive = home favored
    #[serde(default)]
    pub market_spread: Option<f64>,
    #[serde(flatten)]
    pub context: GameContext,
}

impl SlateGame {
    pub fn key(&self) -> String {
        matchup_key(self.home, self.away)
    }
}

impl Slate {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Matchup key to market spread, for games with a posted line
    pub fn lines(&self) -> HashMap<String, f64> {
        self.games
            .iter()
            .filter_map(|g| g.market_spread.map(|s| (g.key(), s)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SLATE: &str = r#"
bankroll = 5000
odds = -105

[[games]]
home = "KC"
away = "BAL"
market_spread = 3.0
rest = { home = 13, away = 6 }

[[games]]
home = "GB"
away = "CHI"
home_field = false
weather = { temperature_f = 20.0, wind_mph = 5.0, precipitation = true }
"#;

    #[test]
    fn test_parse_slate() {
        let slate = Slate::parse(SLATE).unwrap();
        assert_eq!(slate.bankroll, Some(dec!(5000)));
        assert_eq!(slate.odds.value(), -105);
        assert!(!slate.is_playoff);
        assert_eq!(slate.games.len(), 2);

        let kc = &slate.games[0];
        assert_eq!(kc.home, Team::KansasCity);
        assert!(kc.context.home_field);
        assert_eq!(kc.context.rest.map(|r| r.differential()), Some(7));

        let gb = &slate.games[1];
        assert!(!gb.context.home_field);
        assert!(gb.context.weather.as_ref().is_some_and(|w| w.precipitation));
        assert_eq!(gb.market_spread, None);
    }

    #[test]
    fn test_lines_only_for_posted_games() {
        let lines = Slate::parse(SLATE).unwrap().lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.get("BAL @ KC"), Some(&3.0));
    }

    #[test]
    fn test_invalid_odds_rejected() {
        let err = Slate::parse("odds = 50\ngames = []").unwrap_err();
        assert!(err.to_string().contains("TOML"));
    }
}
