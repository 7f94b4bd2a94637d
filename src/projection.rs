//! Converts an efficiency differential into a point spread, win probability
//! and confidence tier using one of the named calibration presets.

use serde::{Deserialize, Serialize};

use crate::config::{Calibration, ModelConfig, ProjectionConfig, WinModel};
use crate::domain::Confidence;
use crate::error::{Result, ValidationError};

/// Projected outcome from the home team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub differential: f64,
    /// Positive = home favored
    pub spread: f64,
    /// Home win probability
    pub win_probability: f64,
    pub home_wins: bool,
    pub confidence: Confidence,
}

#[derive(Debug, Clone)]
pub struct OutcomeProjector {
    calibration: Calibration,
    high_confidence_spread: f64,
    medium_confidence_spread: f64,
}

impl OutcomeProjector {
    pub fn new(config: &ModelConfig) -> Self {
        Self::from_projection(&config.projection)
    }

    pub fn from_projection(config: &ProjectionConfig) -> Self {
        Self {
            calibration: config.calibration(),
            high_confidence_spread: config.high_confidence_spread,
            medium_confidence_spread: config.medium_confidence_spread,
        }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Spread implied by a differential, before any win model
    pub fn spread(&self, differential: f64) -> f64 {
        let spread = differential / self.calibration.spread_divisor;
        match self.calibration.compression {
            Some(c) if spread.abs() > c.threshold => {
                let excess = spread.abs() - c.threshold;
                spread - (c.ratio * excess).copysign(spread)
            }
            _ => spread,
        }
    }

    pub fn win_probability(&self, differential: f64, spread: f64) -> f64 {
        match self.calibration.win_model {
            WinModel::Logistic { k } => 1.0 / (1.0 + (-k * spread).exp()),
            WinModel::Linear { floor, ceiling } => (0.5 + differential).clamp(floor, ceiling),
        }
    }

    pub fn confidence(&self, spread: f64) -> Confidence {
        let margin = spread.abs();
        if margin > self.high_confidence_spread {
            Confidence::High
        } else if margin > self.medium_confidence_spread {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn project(&self, differential: f64) -> Result<Projection> {
        if !differential.is_finite() {
            return Err(ValidationError::NonFiniteDifferential(differential).into());
        }

        let spread = self.spread(differential);
        Ok(Projection {
            differential,
            spread,
            win_probability: self.win_probability(differential, spread),
            home_wins: spread > 0.0,
            confidence: self.confidence(spread),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalibrationPreset;
    use crate::error::EdgeError;

    fn projector(preset: CalibrationPreset) -> OutcomeProjector {
        let mut config = ModelConfig::default();
        config.projection.preset = preset;
        OutcomeProjector::new(&config)
    }

    #[test]
    fn test_standard_preset_small_edge() {
        let projection = projector(CalibrationPreset::Standard).project(0.05).unwrap();
        assert!((projection.spread - 1.25).abs() < 1e-9);
        assert!((projection.win_probability - 0.5775).abs() < 1e-3);
        assert!(projection.home_wins);
        assert_eq!(projection.confidence, Confidence::Low);
    }

    #[test]
    fn test_zero_differential_is_coin_flip_away_winner() {
        let projection = projector(CalibrationPreset::Standard).project(0.0).unwrap();
        assert_eq!(projection.spread, 0.0);
        assert!((projection.win_probability - 0.5).abs() < 1e-12);
        // Ties go to the away side
        assert!(!projection.home_wins);
    }

    #[test]
    fn test_pro_preset_compresses_blowouts() {
        let p = projector(CalibrationPreset::Pro);
        // 0.2 * 85 = 17 -> 17 - 0.15 * 7 = 15.95
        assert!((p.spread(0.2) - 15.95).abs() < 1e-9);
        assert!((p.spread(-0.2) + 15.95).abs() < 1e-9);
        // Under the threshold nothing changes
        assert!((p.spread(0.1) - 8.5).abs() < 1e-9);
    }

    #[test]
    fn test_legacy_preset_linear_clamped() {
        let p = projector(CalibrationPreset::Legacy);
        let projection = p.project(0.1).unwrap();
        assert!((projection.spread - 10.0).abs() < 1e-9);
        assert!((projection.win_probability - 0.6).abs() < 1e-12);
        assert_eq!(p.project(0.5).unwrap().win_probability, 0.80);
        assert_eq!(p.project(-0.5).unwrap().win_probability, 0.20);
    }

    #[test]
    fn test_confidence_tiers_are_strict() {
        let p = projector(CalibrationPreset::Standard);
        assert_eq!(p.confidence(7.0), Confidence::Medium);
        assert_eq!(p.confidence(7.01), Confidence::High);
        assert_eq!(p.confidence(-3.5), Confidence::Medium);
        assert_eq!(p.confidence(3.0), Confidence::Low);
    }

    #[test]
    fn test_non_finite_differential_rejected() {
        let p = projector(CalibrationPreset::Standard);
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = p.project(bad).unwrap_err();
            assert!(matches!(
                err,
                EdgeError::Validation(ValidationError::NonFiniteDifferential(_))
            ));
        }
    }
}
