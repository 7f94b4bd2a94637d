use crate::config::AdjustmentConfig;
use crate::domain::Weather;

/// Total weather effect on the game, clamped to `cap_weather`.
///
/// Bad weather suppresses offense for both teams; callers split the result
/// evenly across the two sides.
pub fn weather_impact(weather: &Weather, config: &AdjustmentConfig) -> f64 {
    let mut impact = 0.0;
    if weather.temperature_f < config.cold_threshold_f {
        impact += config.cold_penalty;
    }
    if weather.wind_mph > config.wind_threshold_mph {
        impact += config.wind_penalty;
    }
    if weather.precipitation {
        impact += config.precipitation_penalty;
    }
    impact.clamp(-config.cap_weather, config.cap_weather)
}
