//! Wager sizing against posted market lines.
//!
//! Compares a model spread with the market, classifies the edge into a
//! [`BetSignal`], and sizes a fractional Kelly stake dampened around key
//! numbers and capped as a share of bankroll.

pub mod card;
pub mod kelly;
pub mod key_numbers;
pub mod market;
pub mod recommendation;
pub mod signal;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::config::{ModelConfig, WagerConfig};
use crate::domain::{AdjustmentKind, AmericanOdds, Confidence, GamePrediction, MarketLine};
use crate::error::{EdgeError, Result, ValidationError};

pub use card::{CardFailure, WeeklyCard};
pub use kelly::{full_kelly, implied_probability, kelly_sizing, KellySizing, KellyVerdict};
pub use key_numbers::{analyze_key_numbers, crosses_key_number, KeyNumberAnalysis};
pub use market::{analyze_sharp_money, closing_line_value, BetResult, ClvTracker, ClvSummary};
pub use recommendation::BettingRecommendation;
pub use signal::BetSignal;

#[derive(Debug, Clone)]
pub struct WagerSizer {
    config: WagerConfig,
}

impl WagerSizer {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            config: config.wager.clone(),
        }
    }

    pub fn config(&self) -> &WagerConfig {
        &self.config
    }

    pub fn edge_ratio(&self, edge_points: f64, market_spread: f64) -> f64 {
        if market_spread.abs() < self.config.pick_em_threshold {
            // Pick'em: no line to divide by
            edge_points * 100.0
        } else {
            edge_points / market_spread.abs()
        }
    }

    /// Share of bankroll to stake: fractional Kelly, dampened when crossing
    /// a key number and never above `max_bet_size_pct`.
    pub fn stake_fraction(&self, win_probability: f64, odds: AmericanOdds, crosses_key: bool) -> f64 {
        let mut fraction = full_kelly(win_probability, odds) * self.config.kelly_fraction;
        if crosses_key {
            fraction *= self.config.key_number_kelly_reduction;
        }
        fraction.min(self.config.max_bet_size_pct).max(0.0)
    }

    /// `is_playoff` applies on top of the prediction's own playoff flag.
    pub fn recommend(
        &self,
        prediction: &GamePrediction,
        market: &MarketLine,
        bankroll: Decimal,
        is_playoff: bool,
    ) -> Result<BettingRecommendation> {
        let game = prediction.matchup();
        let is_playoff = is_playoff || prediction.is_playoff;
        let model = prediction.predicted_spread;
        let probability = prediction.win_probability;

        if !model.is_finite() || !probability.is_finite() {
            return Err(EdgeError::MissingPredictionField {
                game,
                predicted_spread: model.is_finite().then_some(model),
                win_probability: probability.is_finite().then_some(probability),
            });
        }
        if !(0.0..=1.0).contains(&probability) {
            return Err(ValidationError::ProbabilityOutOfRange(probability).into());
        }
        if bankroll <= Decimal::ZERO {
            return Err(ValidationError::InvalidBankroll(bankroll.to_string()).into());
        }

        let market_spread = market.spread;
        let edge_points = (model - market_spread).abs();
        let edge_ratio = self.edge_ratio(edge_points, market_spread);

        let home_side = model > market_spread;
        let (recommended_team, recommended_line, side_probability) = if home_side {
            (prediction.home_team, market_spread, probability)
        } else {
            (prediction.away_team, -market_spread, 1.0 - probability)
        };
        let recommended_side = format!("{} {:+.1}", recommended_team, recommended_line);

        let crosses = crosses_key_number(market_spread, edge_points, &self.config.key_numbers);
        let signal = BetSignal::classify(
            edge_points,
            prediction.confidence,
            crosses,
            is_playoff,
            &self.config,
        );

        let kelly_fraction = self.stake_fraction(side_probability, market.odds, crosses);
        let suggested_units = Decimal::from_f64(kelly_fraction)
            .map(|f| (f * bankroll / Decimal::ONE_HUNDRED).round_dp(2))
            .unwrap_or(Decimal::ZERO);

        let reasoning = self.reasoning(prediction, edge_points, is_playoff);
        let warnings = self.warnings(prediction, edge_points, crosses);

        info!(
            "{}: {} {} (edge {:.1} pts, kelly {:.2}%)",
            game,
            signal,
            recommended_side,
            edge_points,
            kelly_fraction * 100.0
        );

        Ok(BettingRecommendation {
            game,
            game_date: prediction.game_date,
            recommended_side,
            recommended_team,
            recommended_line,
            signal,
            model_spread: model,
            market_spread,
            edge_points,
            edge_ratio,
            crosses_key_number: crosses,
            kelly_fraction,
            suggested_units,
            confidence: prediction.confidence,
            reasoning,
            warnings,
        })
    }

    fn reasoning(&self, prediction: &GamePrediction, edge_points: f64, is_playoff: bool) -> Vec<String> {
        let mut reasons = Vec::new();

        if edge_points >= 4.0 {
            reasons.push(format!("Large model edge: {:.1} points", edge_points));
        } else if edge_points >= 2.5 {
            reasons.push(format!("Solid model edge: {:.1} points", edge_points));
        } else {
            reasons.push(format!("Moderate edge: {:.1} points", edge_points));
        }

        let diff = prediction.efficiency_differential;
        if diff.abs() > 0.1 {
            reasons.push(format!("Strong EPA advantage: {:+.3}", diff));
        }
        if prediction.weather_impact.abs() > 0.015 {
            reasons.push("Significant weather impact modeled".to_string());
        }
        if prediction.injury_impact.abs() > 0.02 {
            reasons.push("Material injury advantage".to_string());
        }
        if prediction.adjustment(AdjustmentKind::TravelPenalty).abs() > 0.01 {
            reasons.push("Travel disadvantage for away team".to_string());
        }
        if prediction.adjustment(AdjustmentKind::AdvancedHome).abs() > 0.015
            || prediction.adjustment(AdjustmentKind::AdvancedAway).abs() > 0.015
        {
            reasons.push("Favorable matchup dynamics".to_string());
        }
        if is_playoff {
            reasons.push("Playoff game - model calibrated for postseason".to_string());
        }

        reasons
    }

    fn warnings(&self, prediction: &GamePrediction, edge_points: f64, crosses: bool) -> Vec<String> {
        let mut warnings = Vec::new();

        if crosses {
            warnings.push(
                "Line crosses key number (3 or 7) - reduced Kelly sizing applied".to_string(),
            );
        }
        if prediction.confidence == Confidence::Low {
            warnings.push("Low confidence prediction - consider smaller bet or pass".to_string());
        }
        if edge_points < 2.0 {
            warnings
                .push("Edge is marginal - only bet if you trust model calibration".to_string());
        }
        if prediction.injury_impact.abs() > 0.025 {
            warnings.push(
                "Significant injury impact - monitor injury reports before kickoff".to_string(),
            );
        }
        if prediction.weather_impact.abs() > 0.02 {
            warnings
                .push("Weather-dependent - check forecast closer to game time".to_string());
        }
        if prediction.sparse_data {
            warnings
                .push("Sparse play data - efficiency estimate is low confidence".to_string());
        }

        warnings
    }

    /// Recommendations for a whole slate.
    ///
    /// `lines` maps "AWAY @ HOME" to the home-relative market spread. A game
    /// that fails is reported in `failed` and does not stop the rest.
    pub fn weekly_card(
        &self,
        predictions: &[GamePrediction],
        lines: &HashMap<String, f64>,
        odds: AmericanOdds,
        bankroll: Decimal,
        is_playoff: bool,
    ) -> WeeklyCard {
        let mut card = WeeklyCard::default();

        for prediction in predictions {
            let key = prediction.matchup();
            let Some(&spread) = lines.get(&key) else {
                warn!("No market line for {}, skipping", key);
                card.unmatched.push(key);
                continue;
            };

            let market = MarketLine::new(key.clone(), spread, odds);
            match self.recommend(prediction, &market, bankroll, is_playoff) {
                Ok(rec) => card.recommendations.push(rec),
                Err(e) => {
                    warn!("Failed to build recommendation for {}: {}", key, e);
                    card.failed.push(CardFailure {
                        game: key,
                        error: e.to_string(),
                    });
                }
            }
        }

        card.sort();
        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AdjustmentRecord, Team};
    use rust_decimal_macros::dec;

    fn prediction(home: Team, away: Team, spread: f64, confidence: Confidence) -> GamePrediction {
        let probability = 1.0 / (1.0 + (-0.25 * spread).exp());
        GamePrediction {
            home_team: home,
            away_team: away,
            game_date: None,
            predicted_winner: if spread > 0.0 { home } else { away },
            win_probability: probability,
            predicted_spread: spread,
            confidence,
            efficiency_differential: spread * 0.04,
            baseline_differential: spread * 0.04,
            home_efficiency: 0.0,
            away_efficiency: 0.0,
            home_base_efficiency: 0.0,
            away_base_efficiency: 0.0,
            adjustments: AdjustmentRecord::new(),
            injury_impact: 0.0,
            weather_impact: 0.0,
            is_division_game: false,
            is_playoff: false,
            sparse_data: false,
            home_situational: Default::default(),
            away_situational: Default::default(),
        }
    }

    fn sizer() -> WagerSizer {
        WagerSizer::new(&ModelConfig::default())
    }

    fn line(spread: f64) -> MarketLine {
        MarketLine::new("BAL @ KC", spread, AmericanOdds::STANDARD)
    }

    #[test]
    fn test_four_point_edge_high_confidence_is_strong() {
        let p = prediction(Team::KansasCity, Team::Baltimore, 7.0, Confidence::High);
        let rec = sizer().recommend(&p, &line(3.0), dec!(10000), false).unwrap();

        assert!((rec.edge_points - 4.0).abs() < 1e-12);
        assert_eq!(rec.signal, BetSignal::StrongBet);
        assert_eq!(rec.recommended_side, "KC +3.0");
        assert_eq!(rec.recommended_team, Team::KansasCity);
        assert!(rec.crosses_key_number, "3 -> 7 passes both key numbers");
        assert!((rec.edge_ratio - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(rec.reasoning[0], "Large model edge: 4.0 points");
        assert!(rec.reasoning.contains(&"Strong EPA advantage: +0.280".to_string()));
    }

    #[test]
    fn test_away_side_uses_flipped_line() {
        let p = prediction(Team::KansasCity, Team::Baltimore, 1.0, Confidence::Low);
        let rec = sizer().recommend(&p, &line(4.5), dec!(10000), false).unwrap();
        assert_eq!(rec.recommended_side, "BAL -4.5");
        assert_eq!(rec.recommended_team, Team::Baltimore);
        assert_eq!(rec.recommended_line, -4.5);
    }

    #[test]
    fn test_pick_em_edge_ratio() {
        let p = prediction(Team::KansasCity, Team::Baltimore, 2.0, Confidence::Low);
        let rec = sizer().recommend(&p, &line(0.0), dec!(10000), false).unwrap();
        assert!((rec.edge_ratio - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_key_number_reduction_applied() {
        let s = sizer();
        let plain = s.stake_fraction(0.53, AmericanOdds::STANDARD, false);
        let dampened = s.stake_fraction(0.53, AmericanOdds::STANDARD, true);
        assert!(plain > 0.0);
        assert!((dampened - plain * 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_stake_capped_at_max_bet() {
        let fraction = sizer().stake_fraction(0.95, AmericanOdds::STANDARD, false);
        assert_eq!(fraction, 0.05);
    }

    #[test]
    fn test_units_from_fraction() {
        let p = prediction(Team::KansasCity, Team::Baltimore, 10.0, Confidence::High);
        let rec = sizer().recommend(&p, &line(4.5), dec!(10000), false).unwrap();
        // Capped at 5% of 10,000 = 500 -> 5 units
        assert_eq!(rec.kelly_fraction, 0.05);
        assert_eq!(rec.suggested_units, dec!(5));
    }

    #[test]
    fn test_non_finite_prediction_names_fields() {
        let mut p = prediction(Team::KansasCity, Team::Baltimore, 3.0, Confidence::Low);
        p.predicted_spread = f64::NAN;
        let err = sizer().recommend(&p, &line(3.0), dec!(1000), false).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("predicted_spread=None"), "{msg}");
        assert!(msg.contains("win_probability=Some"), "{msg}");
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let mut p = prediction(Team::KansasCity, Team::Baltimore, 3.0, Confidence::Low);
        p.win_probability = 1.2;
        let err = sizer().recommend(&p, &line(3.0), dec!(1000), false).unwrap_err();
        assert!(matches!(
            err,
            EdgeError::Validation(ValidationError::ProbabilityOutOfRange(_))
        ));
    }

    #[test]
    fn test_warnings_order() {
        let mut p = prediction(Team::KansasCity, Team::Baltimore, 4.5, Confidence::Medium);
        p.confidence = Confidence::Low;
        p.injury_impact = -0.03;
        p.weather_impact = -0.025;
        p.sparse_data = true;
        let rec = sizer().recommend(&p, &line(3.2), dec!(1000), true).unwrap();

        assert_eq!(
            rec.warnings,
            vec![
                "Line crosses key number (3 or 7) - reduced Kelly sizing applied",
                "Low confidence prediction - consider smaller bet or pass",
                "Edge is marginal - only bet if you trust model calibration",
                "Significant injury impact - monitor injury reports before kickoff",
                "Weather-dependent - check forecast closer to game time",
                "Sparse play data - efficiency estimate is low confidence",
            ]
        );
        assert_eq!(
            rec.reasoning.last().map(String::as_str),
            Some("Playoff game - model calibrated for postseason")
        );
        assert!(rec.reasoning.contains(&"Material injury advantage".to_string()));
        assert!(rec.reasoning.contains(&"Significant weather impact modeled".to_string()));
    }

    #[test]
    fn test_weekly_card_sorted_and_isolates_failures() {
        let strong = prediction(Team::KansasCity, Team::Baltimore, 9.0, Confidence::High);
        let lean = prediction(Team::Buffalo, Team::Miami, 5.0, Confidence::Medium);
        let missing = prediction(Team::Detroit, Team::Chicago, 2.0, Confidence::Low);
        let mut broken = prediction(Team::Seattle, Team::LaRams, 2.0, Confidence::Low);
        broken.win_probability = f64::NAN;

        let mut lines = HashMap::new();
        lines.insert("BAL @ KC".to_string(), 3.0);
        lines.insert("MIA @ BUF".to_string(), 3.5);
        lines.insert("LA @ SEA".to_string(), 1.0);

        let card = sizer().weekly_card(
            &[lean, missing, strong, broken],
            &lines,
            AmericanOdds::STANDARD,
            dec!(10000),
            false,
        );

        assert_eq!(card.recommendations.len(), 2);
        assert_eq!(card.recommendations[0].game, "BAL @ KC");
        assert_eq!(card.recommendations[0].signal, BetSignal::StrongBet);
        assert_eq!(card.recommendations[1].signal, BetSignal::Lean);
        assert_eq!(card.unmatched, vec!["CHI @ DET".to_string()]);
        assert_eq!(card.failed.len(), 1);
        assert_eq!(card.failed[0].game, "LA @ SEA");
    }

    #[test]
    fn test_prediction_playoff_flag_applies_without_card_flag() {
        let mut p = prediction(Team::KansasCity, Team::Baltimore, 5.0, Confidence::Medium);
        let regular = sizer().recommend(&p, &line(3.0), dec!(10000), false).unwrap();
        p.is_playoff = true;
        let playoff = sizer().recommend(&p, &line(3.0), dec!(10000), false).unwrap();

        let playoff_line = "Playoff game - model calibrated for postseason";
        assert!(!regular.reasoning.iter().any(|r| r == playoff_line));
        assert_eq!(playoff.reasoning.last().map(String::as_str), Some(playoff_line));
    }
}
