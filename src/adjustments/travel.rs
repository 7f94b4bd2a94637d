//! Venue effects: crowd noise for the home side, travel for the visitor.

use crate::config::AdjustmentConfig;
use crate::domain::Team;

/// Home-side boost from crowd noise, capped at `cap_fan_noise`
pub fn crowd_noise_boost(home: Team, config: &AdjustmentConfig) -> f64 {
    let mut boost = config.crowd_noise_base;
    if home.is_loud_venue() {
        boost += config.loud_venue_bonus;
    }
    if home.is_dome() {
        boost += config.dome_bonus;
    }
    boost.min(config.cap_fan_noise)
}

/// Away-side penalty for timezone travel (zero or negative).
///
/// A short week multiplies the base penalty; the result never drops below
/// `travel_floor`.
pub fn travel_penalty(
    home: Team,
    away: Team,
    away_rest_days: Option<u32>,
    config: &AdjustmentConfig,
) -> f64 {
    let zones = usize::from(home.timezone().distance(away.timezone()));
    let mut penalty = config.travel_penalties.get(zones).copied().unwrap_or(0.0);
    if away_rest_days.is_some_and(|days| days < config.short_week_days) {
        penalty *= config.short_week_multiplier;
    }
    penalty.max(config.travel_floor)
}
