//! Small, bounded matchup signals layered on top of the contextual
//! adjustments: pass-rush mismatch, coverage fit, pace, momentum, and
//! special teams in bad weather.

use serde::Serialize;

use crate::config::AdvancedConfig;
use crate::domain::{AdvancedMatchupStats, Weather};

/// Per-side deltas from the advanced layer, already within the total cap
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AdvancedDeltas {
    pub home: f64,
    pub away: f64,
    pub pass_rush: (f64, f64),
    pub coverage: (f64, f64),
    pub pace: f64,
    pub momentum: (f64, f64),
    pub special_teams: f64,
    /// Scale applied to keep |home| + |away| within the total cap
    pub scale: f64,
}

fn clip(value: f64, cap: f64) -> f64 {
    value.clamp(-cap, cap)
}

/// Momentum from a per-game efficiency series.
///
/// Needs at least two games. Combines how far recent form sits above the
/// season mean with the trend slope over the recent window.
pub fn momentum(series: &[f64], config: &AdvancedConfig) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let window = config.momentum_window.max(1).min(series.len());
    let recent = &series[series.len() - window..];

    let overall = mean(series);
    let recent_mean = mean(recent);
    let level = (recent_mean - overall) * config.momentum_level_weight;
    let trend = slope(recent) * config.momentum_slope_weight;

    clip(level + trend, config.cap_momentum)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Least-squares slope of `values` against 0, 1, 2, ...
fn slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(values);
    let (mut num, mut den) = (0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    num / den
}

pub fn advanced_adjustment(
    home: &AdvancedMatchupStats,
    away: &AdvancedMatchupStats,
    weather: Option<&Weather>,
    config: &AdvancedConfig,
) -> AdvancedDeltas {
    // A line that gets its quarterback sacked more hands the other side an edge
    let pass_rush = (
        clip((away.sack_rate - home.sack_rate) * config.pass_rush_scale, config.cap_pass_rush),
        clip((home.sack_rate - away.sack_rate) * config.pass_rush_scale, config.cap_pass_rush),
    );

    let coverage = (
        clip(
            (home.explosive_pass_rate - away.explosive_pass_allowed_rate) * config.coverage_scale,
            config.cap_coverage,
        ),
        clip(
            (away.explosive_pass_rate - home.explosive_pass_allowed_rate) * config.coverage_scale,
            config.cap_coverage,
        ),
    );

    let combined_pace = home.plays_per_game + away.plays_per_game;
    let pace_gap = (combined_pace - config.league_plays_per_game) / config.league_plays_per_game;
    let pace = clip(-pace_gap * config.pace_factor, config.cap_pace);

    let momentum = (
        momentum(&home.game_efficiency, config),
        momentum(&away.game_efficiency, config),
    );

    let mut special = 0.0;
    if let Some(w) = weather {
        if w.temperature_f < config.special_teams_cold_f {
            special += config.special_teams_penalty;
        }
        if w.wind_mph > config.special_teams_wind_mph {
            special += config.special_teams_penalty;
        }
    }
    let special_teams = clip(special, config.cap_special_teams);

    let mut home_delta = pass_rush.0 + coverage.0 + pace / 2.0 + momentum.0 + special_teams / 2.0;
    let mut away_delta = pass_rush.1 + coverage.1 + pace / 2.0 + momentum.1 + special_teams / 2.0;

    let magnitude = home_delta.abs() + away_delta.abs();
    let scale = if magnitude > config.total_cap && magnitude > 0.0 {
        config.total_cap / magnitude
    } else {
        1.0
    };
    home_delta *= scale;
    away_delta *= scale;

    AdvancedDeltas {
        home: home_delta,
        away: away_delta,
        pass_rush,
        coverage,
        pace,
        momentum,
        special_teams,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(sack_rate: f64, explosive: f64, allowed: f64, ppg: f64) -> AdvancedMatchupStats {
        AdvancedMatchupStats {
            sack_rate,
            explosive_pass_rate: explosive,
            explosive_pass_allowed_rate: allowed,
            plays_per_game: ppg,
            game_efficiency: Vec::new(),
        }
    }

    #[test]
    fn test_identical_teams_at_league_pace_are_neutral() {
        let s = stats(0.07, 0.10, 0.10, 62.5);
        let deltas = advanced_adjustment(&s, &s, None, &AdvancedConfig::default());
        assert!(deltas.home.abs() < 1e-12);
        assert!(deltas.away.abs() < 1e-12);
        assert_eq!(deltas.scale, 1.0);
    }

    #[test]
    fn test_pass_rush_mirrors() {
        let home = stats(0.05, 0.0, 0.0, 62.5);
        let away = stats(0.10, 0.0, 0.0, 62.5);
        let deltas = advanced_adjustment(&home, &away, None, &AdvancedConfig::default());
        // 5% sack-rate gap * 0.2 = 0.010
        assert!((deltas.pass_rush.0 - 0.010).abs() < 1e-12);
        assert!((deltas.pass_rush.1 + 0.010).abs() < 1e-12);
    }

    #[test]
    fn test_total_cap_scales_both_sides() {
        let config = AdvancedConfig::default();
        let home = stats(0.0, 0.5, 0.0, 62.5);
        let away = stats(0.5, 0.0, 0.0, 62.5);
        let deltas = advanced_adjustment(&home, &away, None, &config);

        let magnitude = deltas.home.abs() + deltas.away.abs();
        assert!(magnitude <= config.total_cap + 1e-12, "magnitude {magnitude}");
        assert!(deltas.scale < 1.0);
        assert!(deltas.home > 0.0 && deltas.away < 0.0);
    }

    #[test]
    fn test_slow_pace_compresses_and_weather_penalizes() {
        let config = AdvancedConfig::default();
        let s = stats(0.07, 0.1, 0.1, 50.0);
        let cold = Weather {
            temperature_f: 10.0,
            wind_mph: 25.0,
            precipitation: false,
        };
        let deltas = advanced_adjustment(&s, &s, Some(&cold), &config);
        // (100 - 125) / 125 = -0.2 -> +0.002
        assert!((deltas.pace - 0.002).abs() < 1e-12);
        // -0.008 clipped to -0.004
        assert!((deltas.special_teams + 0.004).abs() < 1e-12);
        assert!((deltas.home - (0.001 - 0.002)).abs() < 1e-12);
    }

    #[test]
    fn test_momentum_rewards_improving_team() {
        let config = AdvancedConfig::default();
        let improving = [-0.2, -0.1, 0.0, 0.0, 0.1, 0.2];
        assert!(momentum(&improving, &config) > 0.0);
        assert_eq!(momentum(&[0.3], &config), 0.0);

        let collapsing = [0.3, 0.3, 0.3, 0.1, -0.2, -0.5];
        let m = momentum(&collapsing, &config);
        assert!(m < 0.0);
        assert!(m >= -config.cap_momentum);
    }

    #[test]
    fn test_slope_of_line() {
        assert!((slope(&[1.0, 2.0, 3.0, 4.0]) - 1.0).abs() < 1e-12);
        assert_eq!(slope(&[5.0]), 0.0);
    }
}
