//! Team efficiency metrics derived from raw play-by-play records.
//!
//! Each team gets a full-season and a recent-form efficiency for offense
//! (EPA per play gained) and defense (EPA per play allowed), blended into a
//! single `combined` scalar that feeds the adjustment pipeline.

mod profile;
mod situational;
mod store;

pub use profile::{SituationalMetrics, TeamPerformanceProfile};
pub use situational::situational_metrics;
pub use store::{PerformanceMetricStore, TeamPlays};

use crate::domain::PlayRecord;

/// Mean EPA over a play subset, 0.0 when empty
pub(crate) fn mean_epa(plays: &[&PlayRecord]) -> f64 {
    if plays.is_empty() {
        return 0.0;
    }
    plays.iter().map(|p| p.epa).sum::<f64>() / plays.len() as f64
}

/// Share of plays matching a predicate, 0.0 when empty
pub(crate) fn rate(plays: &[&PlayRecord], pred: impl Fn(&PlayRecord) -> bool) -> f64 {
    if plays.is_empty() {
        return 0.0;
    }
    plays.iter().filter(|p| pred(p)).count() as f64 / plays.len() as f64
}
