//! Kicker differential for close games: field-goal accuracy at 40+ yards,
//! degraded by weather and blended with clutch accuracy in the playoffs.

use serde::Serialize;

use crate::config::KickerConfig;
use crate::domain::{KickerStats, Weather};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KickerBreakdown {
    pub home_fg_pct: f64,
    pub away_fg_pct: f64,
    pub home_adjusted_pct: f64,
    pub away_adjusted_pct: f64,
    pub raw: f64,
    /// Home-minus-away differential after the cap
    pub capped: f64,
}

/// Accuracy after subtracting weather penalties, floored at zero
pub fn weather_adjusted_pct(base: f64, weather: Option<&Weather>, config: &KickerConfig) -> f64 {
    let Some(weather) = weather else {
        return base;
    };

    let mut penalty = 0.0;
    if weather.wind_mph > config.high_wind_mph {
        penalty += config.high_wind_penalty;
    } else if weather.wind_mph > config.wind_mph {
        penalty += config.wind_penalty;
    }
    if weather.temperature_f < config.freezing_f {
        penalty += config.freezing_penalty;
    } else if weather.temperature_f < config.cold_f {
        penalty += config.cold_penalty;
    }
    if weather.precipitation {
        penalty += config.precipitation_penalty;
    }
    (base - penalty).max(0.0)
}

pub fn kicker_differential(
    home: &KickerStats,
    away: &KickerStats,
    weather: Option<&Weather>,
    is_playoff: bool,
    config: &KickerConfig,
) -> KickerBreakdown {
    let home_fg_pct = (home.fg_pct_medium + home.fg_pct_long) / 2.0;
    let away_fg_pct = (away.fg_pct_medium + away.fg_pct_long) / 2.0;

    let mut home_adjusted_pct = weather_adjusted_pct(home_fg_pct, weather, config);
    let mut away_adjusted_pct = weather_adjusted_pct(away_fg_pct, weather, config);

    if is_playoff {
        let w = config.playoff_adjusted_weight;
        home_adjusted_pct = w * home_adjusted_pct + (1.0 - w) * home.clutch_pct.unwrap_or(home_fg_pct);
        away_adjusted_pct = w * away_adjusted_pct + (1.0 - w) * away.clutch_pct.unwrap_or(away_fg_pct);
    }

    let raw = (home_adjusted_pct - away_adjusted_pct) * 100.0 * config.scale;
    KickerBreakdown {
        home_fg_pct,
        away_fg_pct,
        home_adjusted_pct,
        away_adjusted_pct,
        raw,
        capped: raw.clamp(-config.cap, config.cap),
    }
}
