//! Line-movement analytics: closing line value and reverse line movement.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Points gained against the closing line (positive = beat the close).
///
/// Betting BUF -1.5 when the line closes -2.5 is +1.0.
pub fn closing_line_value(bet_spread: f64, closing_spread: f64) -> f64 {
    let clv = closing_spread.abs() - bet_spread.abs();
    if clv > 0.0 {
        info!("Positive CLV: {:+.1} points", clv);
    } else if clv < 0.0 {
        warn!("Negative CLV: {:.1} points", clv);
    }
    clv
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SharpIndicator {
    Sharp,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SharpMoneyAnalysis {
    pub opening_line: f64,
    pub current_line: f64,
    pub line_movement: f64,
    /// Line moved against the side the public is betting
    pub reverse_line_movement: bool,
    pub indicator: SharpIndicator,
}

/// Detect reverse line movement.
///
/// `public_pct` is the share of tickets on the favorite, 0-100.
pub fn analyze_sharp_money(
    opening_line: f64,
    current_line: f64,
    public_pct: Option<f64>,
) -> SharpMoneyAnalysis {
    let line_movement = current_line - opening_line;
    let reverse_line_movement = match public_pct {
        Some(pct) if pct > 65.0 => line_movement < 0.0,
        Some(pct) if pct < 35.0 => line_movement > 0.0,
        _ => false,
    };

    if reverse_line_movement {
        warn!(
            "Sharp money detected: line moved {:+.1} against public",
            line_movement
        );
    }

    SharpMoneyAnalysis {
        opening_line,
        current_line,
        line_movement,
        reverse_line_movement,
        indicator: if reverse_line_movement {
            SharpIndicator::Sharp
        } else {
            SharpIndicator::Neutral
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BetResult {
    Win,
    Loss,
    Push,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedBet {
    pub game: String,
    pub bet_line: f64,
    pub closing_line: f64,
    pub clv: f64,
    pub result: BetResult,
    pub stake: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClvSummary {
    pub total_bets: usize,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    /// Wins over decided bets
    pub win_rate: f64,
    pub avg_clv: f64,
    pub total_profit: Decimal,
    /// Percent of total stake
    pub roi: f64,
}

impl ClvSummary {
    /// "W-L-P"
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.pushes)
    }

    pub fn clv_positive(&self) -> bool {
        self.avg_clv > 0.0
    }
}

/// Running log of settled bets and the lines they beat or missed
#[derive(Debug, Clone, Default)]
pub struct ClvTracker {
    bets: Vec<TrackedBet>,
}

impl ClvTracker {
    /// Net payout per unit staked on a standard -110 winner
    const WIN_PAYOUT: Decimal = dec!(0.91);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bet(
        &mut self,
        game: impl Into<String>,
        bet_line: f64,
        closing_line: f64,
        result: BetResult,
        stake: Decimal,
    ) {
        let profit = match result {
            BetResult::Win => (stake * Self::WIN_PAYOUT).round_dp(2),
            BetResult::Loss => -stake,
            BetResult::Push => Decimal::ZERO,
        };
        self.bets.push(TrackedBet {
            game: game.into(),
            bet_line,
            closing_line,
            clv: closing_line_value(bet_line, closing_line),
            result,
            stake,
            profit,
        });
    }

    pub fn bets(&self) -> &[TrackedBet] {
        &self.bets
    }

    /// None until at least one bet is recorded
    pub fn summary(&self) -> Option<ClvSummary> {
        if self.bets.is_empty() {
            return None;
        }

        let count = |r: BetResult| self.bets.iter().filter(|b| b.result == r).count();
        let (wins, losses, pushes) = (
            count(BetResult::Win),
            count(BetResult::Loss),
            count(BetResult::Push),
        );

        let total_profit: Decimal = self.bets.iter().map(|b| b.profit).sum();
        let total_stake: Decimal = self.bets.iter().map(|b| b.stake).sum();
        let roi = if total_stake > Decimal::ZERO {
            (total_profit / total_stake * dec!(100)).to_f64().unwrap_or(0.0)
        } else {
            0.0
        };
        let decided = wins + losses;

        Some(ClvSummary {
            total_bets: self.bets.len(),
            wins,
            losses,
            pushes,
            win_rate: if decided > 0 {
                wins as f64 / decided as f64
            } else {
                0.0
            },
            avg_clv: self.bets.iter().map(|b| b.clv).sum::<f64>() / self.bets.len() as f64,
            total_profit,
            roi,
        })
    }
}
