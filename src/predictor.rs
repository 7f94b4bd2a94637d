//! End-to-end matchup prediction: efficiency profiles, contextual
//! adjustments, then projection.

use std::sync::Arc;
use tracing::info;

use crate::adjustments::{AdjustedMatchup, AdjustmentPipeline};
use crate::config::ModelConfig;
use crate::domain::{AdvancedMatchup, GameContext, GamePrediction, Team};
use crate::error::{Result, ValidationError};
use crate::metrics::{PerformanceMetricStore, TeamPerformanceProfile};
use crate::projection::OutcomeProjector;

/// Composes the metric store, adjustment pipeline and projector.
///
/// Cheap to clone; the store is shared so a slate can be evaluated on
/// several threads at once.
#[derive(Debug, Clone)]
pub struct GamePredictor {
    store: Arc<PerformanceMetricStore>,
    pipeline: AdjustmentPipeline,
    projector: OutcomeProjector,
    advanced_enabled: bool,
}

impl GamePredictor {
    pub fn new(store: Arc<PerformanceMetricStore>, config: &ModelConfig) -> Self {
        Self {
            store,
            pipeline: AdjustmentPipeline::new(config),
            projector: OutcomeProjector::new(config),
            advanced_enabled: config.advanced.enabled,
        }
    }

    pub fn store(&self) -> &PerformanceMetricStore {
        &self.store
    }

    pub fn predict(&self, home: Team, away: Team, ctx: &GameContext) -> Result<GamePrediction> {
        if home == away {
            return Err(ValidationError::SameTeam(home.to_string()).into());
        }

        let home_profile = self.store.profile(home);
        let away_profile = self.store.profile(away);

        // Advanced inputs come from the same plays unless supplied
        let filled;
        let ctx = if self.advanced_enabled && ctx.advanced.is_none() {
            filled = GameContext {
                advanced: Some(AdvancedMatchup {
                    home: self.store.advanced_stats(home),
                    away: self.store.advanced_stats(away),
                }),
                ..ctx.clone()
            };
            &filled
        } else {
            ctx
        };

        self.predict_profiles(&home_profile, &away_profile, ctx)
    }

    /// Predict from precomputed profiles, bypassing the store
    pub fn predict_profiles(
        &self,
        home: &TeamPerformanceProfile,
        away: &TeamPerformanceProfile,
        ctx: &GameContext,
    ) -> Result<GamePrediction> {
        if home.team == away.team {
            return Err(ValidationError::SameTeam(home.team.to_string()).into());
        }

        let adjusted = self.pipeline.apply(home, away, ctx);
        let prediction = self.assemble(home, away, adjusted, ctx)?;

        info!(
            "{}: {} by {:.1} ({:.1}% win, {} confidence)",
            prediction.matchup(),
            prediction.predicted_winner,
            prediction.predicted_spread.abs(),
            prediction.win_probability * 100.0,
            prediction.confidence
        );

        Ok(prediction)
    }

    fn assemble(
        &self,
        home: &TeamPerformanceProfile,
        away: &TeamPerformanceProfile,
        adjusted: AdjustedMatchup,
        ctx: &GameContext,
    ) -> Result<GamePrediction> {
        let projection = self.projector.project(adjusted.differential())?;

        Ok(GamePrediction {
            home_team: adjusted.home,
            away_team: adjusted.away,
            game_date: ctx.game_date,
            predicted_winner: if projection.home_wins {
                adjusted.home
            } else {
                adjusted.away
            },
            win_probability: projection.win_probability,
            predicted_spread: projection.spread,
            confidence: projection.confidence,
            efficiency_differential: adjusted.differential(),
            baseline_differential: adjusted.baseline_differential(),
            home_efficiency: adjusted.home_efficiency,
            away_efficiency: adjusted.away_efficiency,
            home_base_efficiency: adjusted.baseline_home,
            away_base_efficiency: adjusted.baseline_away,
            adjustments: adjusted.adjustments,
            injury_impact: adjusted.injury_impact,
            weather_impact: adjusted.weather_impact,
            is_division_game: adjusted.is_division_game,
            is_playoff: ctx.is_playoff,
            sparse_data: home.sparse || away.sparse,
            home_situational: home.situational.clone(),
            away_situational: away.situational.clone(),
        })
    }
}
