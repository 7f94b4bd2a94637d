//! Contextual adjustment pipeline.
//!
//! Starting from each team's blended efficiency, applies a fixed sequence of
//! individually capped deltas (venue, travel, rivalry, rest, injuries,
//! weather, kicking, advanced matchup signals) and finally bounds the total
//! movement away from the baseline differential so play efficiency stays
//! the dominant input.

pub mod advanced;
pub mod injury;
pub mod kicker;
pub mod travel;
pub mod weather;

use serde::Serialize;
use tracing::debug;

use crate::config::ModelConfig;
use crate::domain::{AdjustmentKind, AdjustmentRecord, GameContext, Team};
use crate::metrics::TeamPerformanceProfile;

pub use advanced::{advanced_adjustment, AdvancedDeltas};
pub use injury::{team_injury_delta, InjuryEntry, InjuryStatus, Position};
pub use kicker::{kicker_differential, KickerBreakdown};
pub use travel::{crowd_noise_boost, travel_penalty};
pub use weather::weather_impact;

/// Both teams' efficiencies after every contextual adjustment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedMatchup {
    pub home: Team,
    pub away: Team,
    pub baseline_home: f64,
    pub baseline_away: f64,
    pub home_efficiency: f64,
    pub away_efficiency: f64,
    pub adjustments: AdjustmentRecord,
    /// Net injury effect from the home side's perspective
    pub injury_impact: f64,
    pub weather_impact: f64,
    pub is_division_game: bool,
    pub kicker: Option<KickerBreakdown>,
    pub advanced: Option<AdvancedDeltas>,
}

impl AdjustedMatchup {
    pub fn baseline_differential(&self) -> f64 {
        self.baseline_home - self.baseline_away
    }

    pub fn differential(&self) -> f64 {
        self.home_efficiency - self.away_efficiency
    }
}

/// Running home/away totals plus the record of what was applied
struct Ledger {
    home: f64,
    away: f64,
    record: AdjustmentRecord,
}

impl Ledger {
    fn apply(&mut self, kind: AdjustmentKind, home: f64, away: f64, recorded: f64) {
        self.home += home;
        self.away += away;
        self.record.record(kind, recorded);
        debug!("adjustment {}: {:+.4} (home {:+.4}, away {:+.4})", kind, recorded, home, away);
    }
}

#[derive(Debug, Clone)]
pub struct AdjustmentPipeline {
    config: ModelConfig,
}

impl AdjustmentPipeline {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn apply(
        &self,
        home: &TeamPerformanceProfile,
        away: &TeamPerformanceProfile,
        ctx: &GameContext,
    ) -> AdjustedMatchup {
        let cfg = &self.config.adjustments;
        let (home_team, away_team) = (home.team, away.team);
        let baseline = home.combined - away.combined;

        let mut ledger = Ledger {
            home: home.combined,
            away: away.combined,
            record: AdjustmentRecord::new(),
        };

        if ctx.home_field {
            ledger.apply(AdjustmentKind::HomeField, cfg.home_field, 0.0, cfg.home_field);
            if home_team.is_high_altitude() {
                ledger.apply(AdjustmentKind::Altitude, cfg.altitude, 0.0, cfg.altitude);
            }
            let noise = crowd_noise_boost(home_team, cfg);
            ledger.apply(AdjustmentKind::CrowdNoise, noise, 0.0, noise);
        }

        let travel = travel_penalty(home_team, away_team, ctx.rest.map(|r| r.away), cfg);
        if travel != 0.0 {
            ledger.apply(AdjustmentKind::TravelPenalty, 0.0, travel, travel);
        }

        let is_division_game = ctx
            .division_game
            .unwrap_or_else(|| home_team.is_division_rival(away_team));
        if is_division_game {
            // Rivals know each other; pull the gap toward even
            let diff = ledger.home - ledger.away;
            let compression = diff - diff * (1.0 - cfg.rivalry_compression);
            ledger.apply(
                AdjustmentKind::DivisionRivalry,
                -compression / 2.0,
                compression / 2.0,
                -compression,
            );
        }

        if let Some(rest) = ctx.rest {
            let days = rest.differential();
            if days != 0 {
                let value = (days as f64 * cfg.rest_per_day).clamp(-cfg.cap_rest, cfg.cap_rest);
                ledger.apply(AdjustmentKind::RestDifferential, value, 0.0, value);
            }
        }

        let mut injury_impact = 0.0;
        if let Some(delta) = ctx.injuries.home {
            let value = delta.clamp(-cfg.cap_injury, cfg.cap_injury);
            ledger.apply(AdjustmentKind::HomeInjuries, value, 0.0, value);
            injury_impact += value;
        }
        if let Some(delta) = ctx.injuries.away {
            let value = delta.clamp(-cfg.cap_injury, cfg.cap_injury);
            ledger.apply(AdjustmentKind::AwayInjuries, 0.0, value, value);
            injury_impact -= value;
        }

        let mut weather_total = 0.0;
        if let Some(weather) = &ctx.weather {
            weather_total = weather_impact(weather, cfg);
            ledger.apply(
                AdjustmentKind::Weather,
                weather_total / 2.0,
                weather_total / 2.0,
                weather_total,
            );
        }

        let kicker = ctx.kickers.as_ref().map(|kickers| {
            let breakdown = kicker_differential(
                &kickers.home,
                &kickers.away,
                ctx.weather.as_ref(),
                ctx.is_playoff,
                &self.config.kicker,
            );
            let d = breakdown.capped;
            ledger.apply(AdjustmentKind::Kicker, d / 2.0, -d / 2.0, d);
            breakdown
        });

        let advanced = if self.config.advanced.enabled {
            ctx.advanced.as_ref().map(|stats| {
                let deltas = advanced_adjustment(
                    &stats.home,
                    &stats.away,
                    ctx.weather.as_ref(),
                    &self.config.advanced,
                );
                ledger.apply(AdjustmentKind::AdvancedHome, deltas.home, 0.0, deltas.home);
                ledger.apply(AdjustmentKind::AdvancedAway, 0.0, deltas.away, deltas.away);
                deltas
            })
        } else {
            None
        };

        // Global dominance cap
        let effect = (ledger.home - ledger.away) - baseline;
        let cap = cfg.global_non_epa_cap;
        if cfg.epa_dominant_mode && effect.abs() > cap {
            let excess = effect - cap.copysign(effect);
            ledger.apply(AdjustmentKind::GlobalCapApplied, -excess / 2.0, excess / 2.0, excess);
        } else {
            ledger.record.record(AdjustmentKind::GlobalCapApplied, 0.0);
        }

        AdjustedMatchup {
            home: home_team,
            away: away_team,
            baseline_home: home.combined,
            baseline_away: away.combined,
            home_efficiency: ledger.home,
            away_efficiency: ledger.away,
            adjustments: ledger.record,
            injury_impact,
            weather_impact: weather_total,
            is_division_game,
            kicker,
            advanced,
        }
    }
}
