pub mod adjustment;
pub mod context;
pub mod market;
pub mod play;
pub mod prediction;
pub mod team;

pub use adjustment::{AdjustmentKind, AdjustmentRecord};
pub use context::{
    AdvancedMatchup, AdvancedMatchupStats, GameContext, InjuryReport, KickerMatchup, KickerStats,
    RestDays, Weather,
};
pub use market::{AmericanOdds, MarketLine};
pub use play::{PlayFlags, PlayRecord};
pub use prediction::{Confidence, GamePrediction};
pub use team::{matchup_key, Division, Team, Timezone};
