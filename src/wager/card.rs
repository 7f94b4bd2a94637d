use rust_decimal::Decimal;
use serde::Serialize;

use super::recommendation::BettingRecommendation;
use super::signal::BetSignal;

/// A game that could not be turned into a recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardFailure {
    pub game: String,
    pub error: String,
}

/// Recommendations for a slate, strongest first
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeeklyCard {
    pub recommendations: Vec<BettingRecommendation>,
    /// Predictions with no posted line
    pub unmatched: Vec<String>,
    pub failed: Vec<CardFailure>,
}

impl WeeklyCard {
    /// Order by signal rank, then by edge, largest first
    pub fn sort(&mut self) {
        self.recommendations.sort_by(|a, b| {
            a.signal
                .rank()
                .cmp(&b.signal.rank())
                .then_with(|| b.edge_points.total_cmp(&a.edge_points))
        });
    }

    pub fn actionable(&self) -> impl Iterator<Item = &BettingRecommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.signal.is_actionable())
    }

    pub fn count(&self, signal: BetSignal) -> usize {
        self.recommendations
            .iter()
            .filter(|r| r.signal == signal)
            .count()
    }

    /// Units across every actionable play
    pub fn total_units(&self) -> Decimal {
        self.actionable().map(|r| r.suggested_units).sum()
    }
}
