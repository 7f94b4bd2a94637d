use serde::{Deserialize, Serialize};

use crate::config::WagerConfig;
use crate::domain::Confidence;

/// Strength of a betting opportunity.
///
/// Declaration order is card order, so sorting by the derived `Ord` puts the
/// strongest plays first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetSignal {
    StrongBet,
    MediumBet,
    Lean,
    NoPlay,
    /// Never produced by classification; sorts below everything else
    Avoid,
}

impl BetSignal {
    /// Position on the weekly card, 0 = best
    pub fn rank(&self) -> u8 {
        match self {
            BetSignal::StrongBet => 0,
            BetSignal::MediumBet => 1,
            BetSignal::Lean => 2,
            BetSignal::NoPlay => 3,
            BetSignal::Avoid => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BetSignal::StrongBet => "STRONG_BET",
            BetSignal::MediumBet => "MEDIUM_BET",
            BetSignal::Lean => "LEAN",
            BetSignal::NoPlay => "NO_PLAY",
            BetSignal::Avoid => "AVOID",
        }
    }

    pub fn is_actionable(&self) -> bool {
        matches!(self, BetSignal::StrongBet | BetSignal::MediumBet | BetSignal::Lean)
    }

    /// Classify an edge in points.
    ///
    /// Playoff games raise every threshold except the minimum lean.
    pub fn classify(
        edge_points: f64,
        confidence: Confidence,
        crosses_key_number: bool,
        is_playoff: bool,
        config: &WagerConfig,
    ) -> Self {
        let mult = if is_playoff {
            config.playoff_threshold_multiplier
        } else {
            1.0
        };

        let strong_high = edge_points >= config.strong_edge * mult && confidence == Confidence::High;
        let strong_medium = edge_points >= config.strong_edge_medium_confidence * mult
            && matches!(confidence, Confidence::High | Confidence::Medium);

        if strong_high || strong_medium {
            BetSignal::StrongBet
        } else if edge_points >= config.medium_edge * mult {
            BetSignal::MediumBet
        } else if (edge_points >= config.lean_edge * mult && !crosses_key_number)
            || edge_points >= config.min_lean_edge
        {
            BetSignal::Lean
        } else {
            BetSignal::NoPlay
        }
    }
}

impl std::fmt::Display for BetSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(edge: f64, confidence: Confidence, crosses: bool, playoff: bool) -> BetSignal {
        BetSignal::classify(edge, confidence, crosses, playoff, &WagerConfig::default())
    }

    #[test]
    fn test_strong_bet_at_four_points_high_confidence() {
        assert_eq!(classify(4.0, Confidence::High, false, false), BetSignal::StrongBet);
    }

    #[test]
    fn test_strong_bet_with_medium_confidence_needs_three() {
        assert_eq!(classify(3.0, Confidence::Medium, false, false), BetSignal::StrongBet);
        assert_eq!(classify(3.0, Confidence::Low, false, false), BetSignal::MediumBet);
        assert_eq!(classify(2.9, Confidence::Medium, false, false), BetSignal::MediumBet);
    }

    #[test]
    fn test_playoff_raises_thresholds() {
        // 4.0 >= 3.0 * 1.2 with MEDIUM confidence
        assert_eq!(classify(4.0, Confidence::Medium, false, true), BetSignal::StrongBet);
        // 3.5 < 3.6 and < 4.8
        assert_eq!(classify(3.5, Confidence::High, false, true), BetSignal::MediumBet);
        // 2.8 < 2.5 * 1.2 = 3.0
        assert_eq!(classify(2.8, Confidence::High, false, true), BetSignal::Lean);
    }

    #[test]
    fn test_lean_and_no_play() {
        assert_eq!(classify(1.6, Confidence::Low, false, false), BetSignal::Lean);
        // Crossing a key number blocks the 1.5 lean but not the 1.0 floor
        assert_eq!(classify(1.6, Confidence::Low, true, false), BetSignal::Lean);
        assert_eq!(classify(0.9, Confidence::High, false, false), BetSignal::NoPlay);
        assert_eq!(classify(0.4, Confidence::Low, true, false), BetSignal::NoPlay);
    }

    #[test]
    fn test_sort_order_matches_rank() {
        let mut signals = vec![
            BetSignal::Avoid,
            BetSignal::Lean,
            BetSignal::StrongBet,
            BetSignal::NoPlay,
            BetSignal::MediumBet,
        ];
        signals.sort();
        let ranks: Vec<u8> = signals.iter().map(BetSignal::rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&BetSignal::StrongBet).unwrap(), "\"STRONG_BET\"");
        assert_eq!(BetSignal::NoPlay.to_string(), "NO_PLAY");
    }
}
