use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::signal::BetSignal;
use crate::domain::{Confidence, Team};

/// Wager recommendation for one game against one market line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BettingRecommendation {
    /// "AWAY @ HOME"
    pub game: String,
    #[serde(default)]
    pub game_date: Option<NaiveDate>,
    /// Team and home-relative market line, e.g. "KC +3.0" or "BAL -4.5"
    pub recommended_side: String,
    pub recommended_team: Team,
    /// Line from the recommended team's perspective
    pub recommended_line: f64,
    pub signal: BetSignal,
    pub model_spread: f64,
    pub market_spread: f64,
    pub edge_points: f64,
    pub edge_ratio: f64,
    pub crosses_key_number: bool,
    /// Share of bankroll to stake
    pub kelly_fraction: f64,
    pub suggested_units: Decimal,
    pub confidence: Confidence,
    pub reasoning: Vec<String>,
    pub warnings: Vec<String>,
}

impl fmt::Display for BettingRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.game)?;
        if let Some(date) = self.game_date {
            writeln!(f, "  Date:       {}", date)?;
        }
        writeln!(f, "  Signal:     {} ({})", self.signal, self.confidence)?;
        writeln!(f, "  Bet:        {}", self.recommended_side)?;
        writeln!(
            f,
            "  Model:      {:+.1}  Market: {:+.1}  Edge: {:.1} pts",
            self.model_spread, self.market_spread, self.edge_points
        )?;
        writeln!(
            f,
            "  Stake:      {:.2}% of bankroll ({} units)",
            self.kelly_fraction * 100.0,
            self.suggested_units
        )?;
        for reason in &self.reasoning {
            writeln!(f, "  + {}", reason)?;
        }
        for warning in &self.warnings {
            writeln!(f, "  ! {}", warning)?;
        }
        Ok(())
    }
}
