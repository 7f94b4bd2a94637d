//! Kelly criterion sizing.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::AmericanOdds;
use crate::error::{Result, ValidationError};

/// Full Kelly fraction for a win probability at the given price.
///
/// Never negative: a bet without an edge sizes to zero.
pub fn full_kelly(win_probability: f64, odds: AmericanOdds) -> f64 {
    let b = odds.net();
    let p = win_probability;
    let q = 1.0 - p;

    let kelly = (b * p - q) / b;
    kelly.max(0.0)
}

/// Break-even probability for American odds
pub fn implied_probability(odds: AmericanOdds) -> f64 {
    odds.implied_probability()
}

/// Dollar amount for a bankroll fraction, rounded to cents
pub fn stake(bankroll: Decimal, fraction: f64) -> Decimal {
    let fraction = Decimal::from_f64(fraction).unwrap_or(Decimal::ZERO);
    (bankroll * fraction).round_dp(2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KellyAction {
    Bet,
    Pass,
}

/// Size of the edge over the implied probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeTier {
    High,
    Medium,
    Low,
    NegativeEv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KellyVerdict {
    pub action: KellyAction,
    pub tier: EdgeTier,
}

impl KellyVerdict {
    pub fn from_edge(edge: f64) -> Self {
        if edge > 0.0 {
            let tier = if edge > 0.10 {
                EdgeTier::High
            } else if edge > 0.05 {
                EdgeTier::Medium
            } else {
                EdgeTier::Low
            };
            Self {
                action: KellyAction::Bet,
                tier,
            }
        } else {
            Self {
                action: KellyAction::Pass,
                tier: EdgeTier::NegativeEv,
            }
        }
    }
}

/// Full Kelly report for one price and probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KellySizing {
    pub win_probability: f64,
    pub odds: AmericanOdds,
    pub decimal_odds: f64,
    pub implied_probability: f64,
    /// Win probability minus implied probability
    pub edge: f64,
    pub full_kelly: f64,
    pub half_kelly: f64,
    pub quarter_kelly: f64,
    pub fraction_used: f64,
    pub fractional_kelly: f64,
    pub bankroll: Decimal,
    pub full_kelly_amount: Decimal,
    pub half_kelly_amount: Decimal,
    pub quarter_kelly_amount: Decimal,
    pub fractional_kelly_amount: Decimal,
    pub expected_value: Decimal,
    /// Expected return on the fractional stake, in percent
    pub expected_roi: f64,
    pub verdict: KellyVerdict,
}

pub fn kelly_sizing(
    win_probability: f64,
    odds: AmericanOdds,
    bankroll: Decimal,
    fraction: f64,
) -> Result<KellySizing> {
    if !(0.0..=1.0).contains(&win_probability) {
        return Err(ValidationError::ProbabilityOutOfRange(win_probability).into());
    }
    if bankroll <= Decimal::ZERO {
        return Err(ValidationError::InvalidBankroll(bankroll.to_string()).into());
    }
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(ValidationError::InvalidKellyFraction(fraction).into());
    }

    let decimal_odds = odds.decimal();
    let implied = odds.implied_probability();
    let edge = win_probability - implied;

    let full = full_kelly(win_probability, odds);
    let fractional = full * fraction;
    let fractional_amount = stake(bankroll, fractional);

    // EV per dollar staked: p * decimal - 1
    let ev_per_unit = win_probability * decimal_odds - 1.0;
    let expected_value = Decimal::from_f64(ev_per_unit)
        .map(|ev| (fractional_amount * ev).round_dp(2))
        .unwrap_or(Decimal::ZERO);
    let expected_roi = if fractional_amount > Decimal::ZERO {
        ev_per_unit * 100.0
    } else {
        0.0
    };

    debug!(
        "Kelly: {:.2}% of bankroll = ${} (edge {:+.2}%)",
        fractional * 100.0,
        fractional_amount,
        edge * 100.0
    );

    Ok(KellySizing {
        win_probability,
        odds,
        decimal_odds,
        implied_probability: implied,
        edge,
        full_kelly: full,
        half_kelly: full * 0.5,
        quarter_kelly: full * 0.25,
        fraction_used: fraction,
        fractional_kelly: fractional,
        bankroll,
        full_kelly_amount: stake(bankroll, full),
        half_kelly_amount: stake(bankroll, full * 0.5),
        quarter_kelly_amount: stake(bankroll, full * 0.25),
        fractional_kelly_amount: fractional_amount,
        expected_value,
        expected_roi,
        verdict: KellyVerdict::from_edge(edge),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn odds(v: i32) -> AmericanOdds {
        AmericanOdds::new(v).unwrap()
    }

    #[test]
    fn test_full_kelly_standard_juice() {
        // b = 100/110, (b * 0.55 - 0.45) / b = 0.055
        let kelly = full_kelly(0.55, odds(-110));
        assert!((kelly - 0.055).abs() < 1e-9, "kelly {kelly}");
    }

    #[test]
    fn test_full_kelly_never_negative() {
        assert_eq!(full_kelly(0.40, odds(-110)), 0.0);
        assert_eq!(full_kelly(0.0, odds(150)), 0.0);
    }

    #[test]
    fn test_sizing_report_quarter_kelly() {
        let sizing = kelly_sizing(0.55, odds(-110), dec!(10000), 0.25).unwrap();

        assert!((sizing.decimal_odds - 1.909_090_909).abs() < 1e-6);
        assert!((sizing.quarter_kelly - 0.01375).abs() < 1e-9);
        assert_eq!(sizing.fractional_kelly_amount, dec!(137.50));
        assert_eq!(sizing.full_kelly_amount, dec!(550.00));
        assert_eq!(sizing.half_kelly_amount, dec!(275.00));
        assert_eq!(sizing.verdict.action, KellyAction::Bet);
        // edge = 0.55 - 0.5238 = 0.026
        assert_eq!(sizing.verdict.tier, EdgeTier::Low);
        assert!(sizing.expected_value > Decimal::ZERO);
        assert!((sizing.expected_roi - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_edge_passes() {
        let sizing = kelly_sizing(0.45, odds(-110), dec!(1000), 0.25).unwrap();
        assert_eq!(sizing.fractional_kelly_amount, Decimal::ZERO);
        assert_eq!(sizing.verdict.action, KellyAction::Pass);
        assert_eq!(sizing.verdict.tier, EdgeTier::NegativeEv);
        assert_eq!(sizing.expected_roi, 0.0);
    }

    #[test]
    fn test_edge_tiers() {
        assert_eq!(KellyVerdict::from_edge(0.12).tier, EdgeTier::High);
        assert_eq!(KellyVerdict::from_edge(0.07).tier, EdgeTier::Medium);
        assert_eq!(KellyVerdict::from_edge(0.0).action, KellyAction::Pass);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(kelly_sizing(1.2, odds(-110), dec!(1000), 0.25).is_err());
        assert!(kelly_sizing(0.5, odds(-110), dec!(0), 0.25).is_err());
        assert!(kelly_sizing(0.5, odds(-110), dec!(1000), 0.0).is_err());
        assert!(kelly_sizing(0.5, odds(-110), dec!(1000), 1.5).is_err());
    }
}
