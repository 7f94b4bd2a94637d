use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::adjustment::{AdjustmentKind, AdjustmentRecord};
use super::team::{matchup_key, Team};
use crate::metrics::SituationalMetrics;

/// Confidence tier derived from the predicted margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full model output for one matchup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamePrediction {
    pub home_team: Team,
    pub away_team: Team,
    #[serde(default)]
    pub game_date: Option<NaiveDate>,
    pub predicted_winner: Team,
    pub win_probability: f64,
    /// Home-relative margin, positive = home favored
    pub predicted_spread: f64,
    pub confidence: Confidence,
    /// Post-adjustment home minus away efficiency
    pub efficiency_differential: f64,
    /// Pre-adjustment home minus away efficiency
    pub baseline_differential: f64,
    pub home_efficiency: f64,
    pub away_efficiency: f64,
    pub home_base_efficiency: f64,
    pub away_base_efficiency: f64,
    pub adjustments: AdjustmentRecord,
    pub injury_impact: f64,
    pub weather_impact: f64,
    pub is_division_game: bool,
    /// Postseason game; wager thresholds tighten
    #[serde(default)]
    pub is_playoff: bool,
    /// Either team had no plays on one side of the ball
    #[serde(default)]
    pub sparse_data: bool,
    #[serde(default)]
    pub home_situational: SituationalMetrics,
    #[serde(default)]
    pub away_situational: SituationalMetrics,
}

impl GamePrediction {
    /// "AWAY @ HOME"
    pub fn matchup(&self) -> String {
        matchup_key(self.home_team, self.away_team)
    }

    pub fn adjustment(&self, kind: AdjustmentKind) -> f64 {
        self.adjustments.value(kind)
    }

    pub fn home_favored(&self) -> bool {
        self.predicted_spread > 0.0
    }
}
