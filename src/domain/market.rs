use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// American (moneyline-style) odds, e.g. -110 or +150.
///
/// Values strictly between -100 and 100 (including 0) are not valid prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    /// Standard juice on a point spread
    pub const STANDARD: AmericanOdds = AmericanOdds(-110);

    pub fn new(odds: i32) -> Result<Self, ValidationError> {
        if odds.unsigned_abs() < 100 {
            return Err(ValidationError::InvalidOdds(odds));
        }
        Ok(Self(odds))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Decimal odds: total return per unit staked
    pub fn decimal(&self) -> f64 {
        let odds = f64::from(self.0);
        if self.0 < 0 {
            1.0 + 100.0 / odds.abs()
        } else {
            1.0 + odds / 100.0
        }
    }

    /// Net odds `b` used by the Kelly formula
    pub fn net(&self) -> f64 {
        self.decimal() - 1.0
    }

    /// Break-even probability implied by the price
    pub fn implied_probability(&self) -> f64 {
        let odds = f64::from(self.0);
        if self.0 > 0 {
            100.0 / (odds + 100.0)
        } else {
            odds.abs() / (odds.abs() + 100.0)
        }
    }
}

impl Default for AmericanOdds {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AmericanOdds> for i32 {
    fn from(odds: AmericanOdds) -> Self {
        odds.0
    }
}

impl std::fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

/// A posted point-spread line for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketLine {
    /// "AWAY @ HOME"
    pub matchup: String,
    /// Home-relative spread, positive = home favored
    pub spread: f64,
    #[serde(default)]
    pub odds: AmericanOdds,
}

impl MarketLine {
    pub fn new(matchup: impl Into<String>, spread: f64, odds: AmericanOdds) -> Self {
        Self {
            matchup: matchup.into(),
            spread,
            odds,
        }
    }

    /// Pick'em lines have no meaningful favorite
    pub fn is_pick_em(&self, threshold: f64) -> bool {
        self.spread.abs() < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_american_to_decimal_negative() {
        let odds = AmericanOdds::new(-110).unwrap();
        assert!((odds.decimal() - 1.909_090_909).abs() < 1e-6);
        assert!((odds.net() - 0.909_090_909).abs() < 1e-6);
    }

    #[test]
    fn test_american_to_decimal_positive() {
        let odds = AmericanOdds::new(150).unwrap();
        assert!((odds.decimal() - 2.5).abs() < 1e-12);
        assert!((odds.implied_probability() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_odds_rejected() {
        for bad in [0, 50, -50, 99, -99] {
            assert_eq!(
                AmericanOdds::new(bad).unwrap_err(),
                ValidationError::InvalidOdds(bad)
            );
        }
        assert!(AmericanOdds::new(100).is_ok());
        assert!(AmericanOdds::new(-100).is_ok());
    }

    #[test]
    fn test_odds_deserialize_validates() {
        let line: MarketLine =
            serde_json::from_str(r#"{"matchup":"BAL @ KC","spread":3.0,"odds":-115}"#).unwrap();
        assert_eq!(line.odds.value(), -115);

        let bad = serde_json::from_str::<MarketLine>(
            r#"{"matchup":"BAL @ KC","spread":3.0,"odds":20}"#,
        );
        assert!(bad.is_err());

        let defaulted: MarketLine =
            serde_json::from_str(r#"{"matchup":"BAL @ KC","spread":-2.5}"#).unwrap();
        assert_eq!(defaulted.odds, AmericanOdds::STANDARD);
    }

    #[test]
    fn test_pick_em() {
        let line = MarketLine::new("BAL @ KC", 0.0, AmericanOdds::STANDARD);
        assert!(line.is_pick_em(0.01));
    }
}
