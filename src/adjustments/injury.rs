//! Converts a curated injury list into the signed efficiency delta consumed
//! by the pipeline's injury step.

use serde::{Deserialize, Serialize};

/// Roster slot of an injured player, weighted by replaceability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    #[serde(alias = "QB")]
    StarterQb,
    /// A backup quarterback forced into the lineup
    BackupQb,
    #[serde(alias = "LT")]
    LeftTackle,
    #[serde(alias = "RT")]
    RightTackle,
    #[serde(alias = "C")]
    Center,
    #[serde(alias = "G")]
    Guard,
    #[serde(alias = "EDGE")]
    EliteEdgeRusher,
    #[serde(alias = "DT")]
    EliteDt,
    Wr1,
    Wr2,
    #[serde(alias = "TE")]
    EliteTe,
    #[serde(alias = "RB")]
    RunningBack,
    Cb1,
    #[serde(alias = "S")]
    Safety,
}

impl Position {
    /// Efficiency lost when this player is fully out
    pub fn weight(&self) -> f64 {
        match self {
            Position::StarterQb => 0.040,
            Position::BackupQb => 0.015,
            Position::LeftTackle => 0.030,
            Position::RightTackle => 0.025,
            Position::Center => 0.020,
            Position::Guard => 0.015,
            Position::EliteEdgeRusher => 0.025,
            Position::EliteDt => 0.015,
            Position::Wr1 => 0.020,
            Position::Wr2 => 0.012,
            Position::EliteTe => 0.025,
            Position::RunningBack => 0.010,
            Position::Cb1 => 0.018,
            Position::Safety => 0.012,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryStatus {
    Out,
    Doubtful,
    Questionable,
    Probable,
    PlayingHurt,
}

impl InjuryStatus {
    /// Probability-like weight that the injury matters on game day
    pub fn multiplier(&self) -> f64 {
        match self {
            InjuryStatus::Out => 1.0,
            InjuryStatus::Doubtful => 0.8,
            InjuryStatus::Questionable => 0.5,
            InjuryStatus::Probable => 0.2,
            InjuryStatus::PlayingHurt => 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryEntry {
    #[serde(default)]
    pub player: Option<String>,
    pub position: Position,
    pub status: InjuryStatus,
}

impl InjuryEntry {
    pub fn impact(&self) -> f64 {
        self.position.weight() * self.status.multiplier()
    }
}

/// Signed team delta: minus the summed weighted impact of every entry.
///
/// Uncapped; the pipeline clamps it to the per-team injury cap.
pub fn team_injury_delta(entries: &[InjuryEntry]) -> f64 {
    -entries.iter().map(InjuryEntry::impact).sum::<f64>()
}
