pub mod adjustments;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod predictor;
pub mod projection;
pub mod wager;

pub use adjustments::{AdjustedMatchup, AdjustmentPipeline};
pub use config::{AppConfig, CalibrationPreset, ModelConfig};
pub use domain::{
    AdjustmentKind, AdjustmentRecord, AmericanOdds, Confidence, GameContext, GamePrediction,
    MarketLine, PlayRecord, Team,
};
pub use error::{EdgeError, Result, ValidationError};
pub use metrics::{PerformanceMetricStore, TeamPerformanceProfile};
pub use predictor::GamePredictor;
pub use projection::{OutcomeProjector, Projection};
pub use wager::{BetSignal, BettingRecommendation, KellySizing, WagerSizer, WeeklyCard};
