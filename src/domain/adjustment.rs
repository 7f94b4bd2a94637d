use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contextual adjustment kinds, declared in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    HomeField,
    Altitude,
    CrowdNoise,
    TravelPenalty,
    DivisionRivalry,
    RestDifferential,
    HomeInjuries,
    AwayInjuries,
    Weather,
    Kicker,
    AdvancedHome,
    AdvancedAway,
    GlobalCapApplied,
}

impl AdjustmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentKind::HomeField => "home_field",
            AdjustmentKind::Altitude => "altitude",
            AdjustmentKind::CrowdNoise => "crowd_noise",
            AdjustmentKind::TravelPenalty => "travel_penalty",
            AdjustmentKind::DivisionRivalry => "division_rivalry",
            AdjustmentKind::RestDifferential => "rest_differential",
            AdjustmentKind::HomeInjuries => "home_injuries",
            AdjustmentKind::AwayInjuries => "away_injuries",
            AdjustmentKind::Weather => "weather",
            AdjustmentKind::Kicker => "kicker",
            AdjustmentKind::AdvancedHome => "advanced_home",
            AdjustmentKind::AdvancedAway => "advanced_away",
            AdjustmentKind::GlobalCapApplied => "global_cap_applied",
        }
    }
}

impl std::fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applied (post-cap) value of every adjustment that fired.
///
/// Iteration follows pipeline order because the map is keyed by
/// [`AdjustmentKind`], whose ordering matches the order of application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjustmentRecord(BTreeMap<AdjustmentKind, f64>);

impl AdjustmentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: AdjustmentKind, value: f64) {
        self.0.insert(kind, value);
    }

    pub fn get(&self, kind: AdjustmentKind) -> Option<f64> {
        self.0.get(&kind).copied()
    }

    /// Applied value, or 0.0 when the adjustment did not fire
    pub fn value(&self, kind: AdjustmentKind) -> f64 {
        self.get(kind).unwrap_or(0.0)
    }

    pub fn contains(&self, kind: AdjustmentKind) -> bool {
        self.0.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AdjustmentKind, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_follows_pipeline_order() {
        let mut record = AdjustmentRecord::new();
        record.record(AdjustmentKind::GlobalCapApplied, 0.0);
        record.record(AdjustmentKind::Weather, -0.01);
        record.record(AdjustmentKind::HomeField, 0.029);

        let kinds: Vec<_> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                AdjustmentKind::HomeField,
                AdjustmentKind::Weather,
                AdjustmentKind::GlobalCapApplied
            ]
        );
    }

    #[test]
    fn test_serializes_with_snake_case_keys() {
        let mut record = AdjustmentRecord::new();
        record.record(AdjustmentKind::TravelPenalty, -0.018);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"travel_penalty":-0.018}"#);
        assert_eq!(record.value(AdjustmentKind::Kicker), 0.0);
    }
}
