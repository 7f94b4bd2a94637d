use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

/// Every weight, cap and threshold used by the prediction and sizing stages.
///
/// Built once and handed by reference to each component constructor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub metrics: MetricsConfig,
    pub adjustments: AdjustmentConfig,
    pub kicker: KickerConfig,
    pub advanced: AdvancedConfig,
    pub projection: ProjectionConfig,
    pub wager: WagerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Distinct games counted as "recent form"
    pub recent_games: usize,
    pub full_season_weight: f64,
    pub recent_weight: f64,
    pub third_down_min_distance: u8,
    pub third_down_max_distance: u8,
    /// Yardline (distance to goal) at or inside which a play is in the red zone
    pub red_zone_yardline: u8,
    pub two_minute_seconds: u32,
    pub explosive_play_yards: i32,
    /// Subtract faced-defense strength from full-season offense
    pub opponent_adjust: bool,
    pub sos_weight: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            recent_games: 4,
            full_season_weight: 0.30,
            recent_weight: 0.70,
            third_down_min_distance: 4,
            third_down_max_distance: 7,
            red_zone_yardline: 20,
            two_minute_seconds: 120,
            explosive_play_yards: 20,
            opponent_adjust: false,
            sos_weight: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentConfig {
    pub home_field: f64,
    pub altitude: f64,
    pub crowd_noise_base: f64,
    pub loud_venue_bonus: f64,
    pub dome_bonus: f64,
    pub cap_fan_noise: f64,
    /// Away-team penalty indexed by timezones crossed
    pub travel_penalties: Vec<f64>,
    /// Away rest below this many days is a short week
    pub short_week_days: u32,
    pub short_week_multiplier: f64,
    pub travel_floor: f64,
    /// Share of the differential removed in division games
    pub rivalry_compression: f64,
    pub rest_per_day: f64,
    pub cap_rest: f64,
    pub cap_injury: f64,
    pub cold_threshold_f: f64,
    pub cold_penalty: f64,
    pub wind_threshold_mph: f64,
    pub wind_penalty: f64,
    pub precipitation_penalty: f64,
    pub cap_weather: f64,
    /// Largest total move away from the baseline differential
    pub global_non_epa_cap: f64,
    pub epa_dominant_mode: bool,
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            home_field: 0.029,
            altitude: 0.018,
            crowd_noise_base: 0.004,
            loud_venue_bonus: 0.003,
            dome_bonus: 0.002,
            cap_fan_noise: 0.009,
            travel_penalties: vec![0.0, -0.007, -0.012, -0.018],
            short_week_days: 7,
            short_week_multiplier: 1.5,
            travel_floor: -0.027,
            rivalry_compression: 0.18,
            rest_per_day: 0.005,
            cap_rest: 0.035,
            cap_injury: 0.030,
            cold_threshold_f: 32.0,
            cold_penalty: -0.010,
            wind_threshold_mph: 15.0,
            wind_penalty: -0.015,
            precipitation_penalty: -0.010,
            cap_weather: 0.030,
            global_non_epa_cap: 0.060,
            epa_dominant_mode: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KickerConfig {
    /// Efficiency per percentage point of accuracy gap
    pub scale: f64,
    pub cap: f64,
    /// Weight on weather-adjusted accuracy in playoff games, remainder is clutch
    pub playoff_adjusted_weight: f64,
    pub high_wind_mph: f64,
    pub high_wind_penalty: f64,
    pub wind_mph: f64,
    pub wind_penalty: f64,
    pub freezing_f: f64,
    pub freezing_penalty: f64,
    pub cold_f: f64,
    pub cold_penalty: f64,
    pub precipitation_penalty: f64,
}

impl Default for KickerConfig {
    fn default() -> Self {
        Self {
            scale: 0.001,
            cap: 0.015,
            playoff_adjusted_weight: 0.7,
            high_wind_mph: 25.0,
            high_wind_penalty: 0.10,
            wind_mph: 15.0,
            wind_penalty: 0.05,
            freezing_f: 20.0,
            freezing_penalty: 0.04,
            cold_f: 32.0,
            cold_penalty: 0.02,
            precipitation_penalty: 0.03,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedConfig {
    pub enabled: bool,
    pub pass_rush_scale: f64,
    pub cap_pass_rush: f64,
    pub coverage_scale: f64,
    pub cap_coverage: f64,
    pub league_plays_per_game: f64,
    pub pace_factor: f64,
    pub cap_pace: f64,
    pub momentum_window: usize,
    pub momentum_level_weight: f64,
    pub momentum_slope_weight: f64,
    pub cap_momentum: f64,
    pub special_teams_cold_f: f64,
    pub special_teams_wind_mph: f64,
    pub special_teams_penalty: f64,
    pub cap_special_teams: f64,
    /// Sum of both sides' magnitudes
    pub total_cap: f64,
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            pass_rush_scale: 0.2,
            cap_pass_rush: 0.010,
            coverage_scale: 0.05,
            cap_coverage: 0.008,
            league_plays_per_game: 125.0,
            pace_factor: 0.01,
            cap_pace: 0.004,
            momentum_window: 4,
            momentum_level_weight: 0.25,
            momentum_slope_weight: 0.5,
            cap_momentum: 0.010,
            special_teams_cold_f: 25.0,
            special_teams_wind_mph: 18.0,
            special_teams_penalty: -0.004,
            cap_special_teams: 0.004,
            total_cap: 0.020,
        }
    }
}

/// Named calibration constant sets for the projector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalibrationPreset {
    #[default]
    Standard,
    Pro,
    Legacy,
}

impl std::str::FromStr for CalibrationPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "pro" => Ok(Self::Pro),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!("unknown calibration preset '{other}'")),
        }
    }
}

/// Differential-to-probability mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WinModel {
    /// 1 / (1 + e^(-k * spread))
    Logistic { k: f64 },
    /// 0.5 + differential, clamped
    Linear { floor: f64, ceiling: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadCompression {
    pub threshold: f64,
    pub ratio: f64,
}

/// Resolved projector constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub spread_divisor: f64,
    pub compression: Option<SpreadCompression>,
    pub win_model: WinModel,
}

impl CalibrationPreset {
    pub fn calibration(&self) -> Calibration {
        match self {
            CalibrationPreset::Standard => Calibration {
                spread_divisor: 0.04,
                compression: None,
                win_model: WinModel::Logistic { k: 0.25 },
            },
            CalibrationPreset::Pro => Calibration {
                spread_divisor: 1.0 / 85.0,
                compression: Some(SpreadCompression {
                    threshold: 10.0,
                    ratio: 0.15,
                }),
                win_model: WinModel::Logistic { k: 0.25 },
            },
            CalibrationPreset::Legacy => Calibration {
                spread_divisor: 0.01,
                compression: None,
                win_model: WinModel::Linear {
                    floor: 0.20,
                    ceiling: 0.80,
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub preset: CalibrationPreset,
    /// Overrides the preset divisor when set
    pub spread_divisor: Option<f64>,
    /// Overrides the preset logistic steepness when set
    pub logistic_k: Option<f64>,
    pub high_confidence_spread: f64,
    pub medium_confidence_spread: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            preset: CalibrationPreset::Standard,
            spread_divisor: None,
            logistic_k: None,
            high_confidence_spread: 7.0,
            medium_confidence_spread: 3.0,
        }
    }
}

impl ProjectionConfig {
    /// Preset constants with any explicit overrides applied
    pub fn calibration(&self) -> Calibration {
        let mut calibration = self.preset.calibration();
        if let Some(divisor) = self.spread_divisor {
            calibration.spread_divisor = divisor;
        }
        if let (Some(k), WinModel::Logistic { .. }) = (self.logistic_k, calibration.win_model) {
            calibration.win_model = WinModel::Logistic { k };
        }
        calibration
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WagerConfig {
    pub kelly_fraction: f64,
    /// Hard ceiling on stake as a fraction of bankroll
    pub max_bet_size_pct: f64,
    pub key_number_kelly_reduction: f64,
    pub playoff_threshold_multiplier: f64,
    pub strong_edge: f64,
    pub strong_edge_medium_confidence: f64,
    pub medium_edge: f64,
    pub lean_edge: f64,
    pub min_lean_edge: f64,
    /// Margins whose crossing dampens Kelly sizing
    pub key_numbers: Vec<f64>,
    /// Margins reported by key-number analysis, by importance
    pub analysis_key_numbers: Vec<f64>,
    pub pick_em_threshold: f64,
    pub default_bankroll: Decimal,
}

impl Default for WagerConfig {
    fn default() -> Self {
        Self {
            kelly_fraction: 0.25,
            max_bet_size_pct: 0.05,
            key_number_kelly_reduction: 0.75,
            playoff_threshold_multiplier: 1.2,
            strong_edge: 4.0,
            strong_edge_medium_confidence: 3.0,
            medium_edge: 2.5,
            lean_edge: 1.5,
            min_lean_edge: 1.0,
            key_numbers: vec![3.0, 7.0],
            analysis_key_numbers: vec![3.0, 7.0, 10.0, 6.0, 4.0, 14.0],
            pick_em_threshold: 0.01,
            default_bankroll: dec!(10000),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory of raw `plays_<season>.json` exports
    pub source_dir: PathBuf,
    /// Directory holding cached per-season play files
    pub cache_dir: PathBuf,
    pub cache_max_age_hours: i64,
    pub season: i32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data/raw"),
            cache_dir: PathBuf::from("data/cache"),
            cache_max_age_hours: 24,
            season: 2025,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Environment-specific overrides (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("EDGE_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // EDGE_MODEL__WAGER__KELLY_FRACTION=0.2, etc.
            .add_source(
                Environment::with_prefix("EDGE")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = match self.model.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };

        if self.data.cache_max_age_hours <= 0 {
            errors.push("data.cache_max_age_hours must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl ModelConfig {
    /// Validate every section, reporting all problems at once
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let m = &self.metrics;
        if m.recent_games == 0 {
            errors.push("metrics.recent_games must be at least 1".to_string());
        }
        if m.full_season_weight < 0.0 || m.recent_weight < 0.0 {
            errors.push("metrics blend weights must be non-negative".to_string());
        }
        let weight_sum = m.full_season_weight + m.recent_weight;
        if (weight_sum - 1.0).abs() > 1e-9 {
            errors.push(format!(
                "metrics.full_season_weight + metrics.recent_weight must equal 1.0, got {weight_sum}"
            ));
        }
        if m.third_down_min_distance > m.third_down_max_distance {
            errors.push("metrics.third_down_min_distance exceeds third_down_max_distance".to_string());
        }

        let a = &self.adjustments;
        for (name, cap) in [
            ("cap_fan_noise", a.cap_fan_noise),
            ("cap_rest", a.cap_rest),
            ("cap_injury", a.cap_injury),
            ("cap_weather", a.cap_weather),
            ("global_non_epa_cap", a.global_non_epa_cap),
        ] {
            if !(cap.is_finite() && cap >= 0.0) {
                errors.push(format!("adjustments.{name} must be a non-negative number"));
            }
        }
        if a.travel_penalties.is_empty() {
            errors.push("adjustments.travel_penalties must not be empty".to_string());
        }
        if a.travel_floor > 0.0 {
            errors.push("adjustments.travel_floor must be zero or negative".to_string());
        }
        if !(0.0..=1.0).contains(&a.rivalry_compression) {
            errors.push("adjustments.rivalry_compression must be between 0 and 1".to_string());
        }

        if self.kicker.cap < 0.0 {
            errors.push("kicker.cap must be non-negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.kicker.playoff_adjusted_weight) {
            errors.push("kicker.playoff_adjusted_weight must be between 0 and 1".to_string());
        }

        if self.advanced.total_cap < 0.0 {
            errors.push("advanced.total_cap must be non-negative".to_string());
        }
        if self.advanced.league_plays_per_game <= 0.0 {
            errors.push("advanced.league_plays_per_game must be positive".to_string());
        }

        let calibration = self.projection.calibration();
        if !(calibration.spread_divisor.is_finite() && calibration.spread_divisor > 0.0) {
            errors.push("projection.spread_divisor must be positive".to_string());
        }
        if self.projection.medium_confidence_spread > self.projection.high_confidence_spread {
            errors.push(
                "projection.medium_confidence_spread exceeds high_confidence_spread".to_string(),
            );
        }

        let w = &self.wager;
        if !(w.kelly_fraction > 0.0 && w.kelly_fraction <= 1.0) {
            errors.push("wager.kelly_fraction must be in (0, 1]".to_string());
        }
        if !(w.max_bet_size_pct > 0.0 && w.max_bet_size_pct <= 1.0) {
            errors.push("wager.max_bet_size_pct must be in (0, 1]".to_string());
        }
        if !(w.key_number_kelly_reduction > 0.0 && w.key_number_kelly_reduction <= 1.0) {
            errors.push("wager.key_number_kelly_reduction must be in (0, 1]".to_string());
        }
        if w.playoff_threshold_multiplier < 1.0 {
            errors.push("wager.playoff_threshold_multiplier should be at least 1.0".to_string());
        }
        if w.default_bankroll <= Decimal::ZERO {
            errors.push("wager.default_bankroll must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(ModelConfig::default().validate().is_ok());
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = ModelConfig::default();
        config.metrics.recent_weight = 0.9;
        config.wager.kelly_fraction = 0.0;
        config.adjustments.cap_rest = -0.01;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3, "errors: {errors:?}");
        assert!(errors.iter().any(|e| e.contains("kelly_fraction")));
        assert!(errors.iter().any(|e| e.contains("cap_rest")));
    }

    #[test]
    fn test_preset_calibrations() {
        let standard = CalibrationPreset::Standard.calibration();
        assert_eq!(standard.spread_divisor, 0.04);
        assert_eq!(standard.win_model, WinModel::Logistic { k: 0.25 });

        let pro = CalibrationPreset::Pro.calibration();
        assert!((pro.spread_divisor - 1.0 / 85.0).abs() < 1e-12);
        assert!(pro.compression.is_some());

        let legacy = CalibrationPreset::Legacy.calibration();
        assert!(matches!(legacy.win_model, WinModel::Linear { .. }));
    }

    #[test]
    fn test_overrides_apply_on_top_of_preset() {
        let projection = ProjectionConfig {
            spread_divisor: Some(0.05),
            logistic_k: Some(0.3),
            ..Default::default()
        };
        let calibration = projection.calibration();
        assert_eq!(calibration.spread_divisor, 0.05);
        assert_eq!(calibration.win_model, WinModel::Logistic { k: 0.3 });

        // k has no meaning for the linear model
        let legacy = ProjectionConfig {
            preset: CalibrationPreset::Legacy,
            logistic_k: Some(0.3),
            ..Default::default()
        };
        assert!(matches!(legacy.calibration().win_model, WinModel::Linear { .. }));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: ModelConfig = toml::from_str(
            r#"
            [wager]
            kelly_fraction = 0.5

            [projection]
            preset = "pro"
            "#,
        )
        .unwrap();

        assert_eq!(config.wager.kelly_fraction, 0.5);
        assert_eq!(config.wager.max_bet_size_pct, 0.05);
        assert_eq!(config.projection.preset, CalibrationPreset::Pro);
        assert_eq!(config.metrics.recent_games, 4);
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let config = AppConfig::load_from("does-not-exist").unwrap();
        assert_eq!(config.model.adjustments.global_non_epa_cap, 0.060);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_shipped_default_toml_matches_defaults() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        let config = AppConfig::load_from(dir).unwrap();
        assert_eq!(config.model, ModelConfig::default());
        assert_eq!(config.data.cache_max_age_hours, 24);
        assert!(config.validate().is_ok());
    }
}
