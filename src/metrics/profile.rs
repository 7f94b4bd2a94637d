use serde::{Deserialize, Serialize};

use crate::domain::Team;

/// Situational efficiency splits for one team.
///
/// Offense fields describe the team with the ball; defense fields describe
/// what opponents did against it. Empty subsets are 0.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SituationalMetrics {
    pub third_down_offense: f64,
    pub third_down_conversion_rate: f64,
    pub third_down_defense: f64,
    pub third_down_stop_rate: f64,
    pub red_zone_offense: f64,
    pub red_zone_td_rate: f64,
    pub red_zone_defense: f64,
    pub red_zone_td_allowed_rate: f64,
    pub fourth_quarter_offense: f64,
    pub fourth_quarter_defense: f64,
    pub two_minute_offense: f64,
    pub two_minute_defense: f64,
    pub explosive_play_rate: f64,
    pub explosive_play_offense: f64,
    pub explosive_allowed_rate: f64,
    pub explosive_play_defense: f64,
}

/// Blended efficiency profile for one team over one season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPerformanceProfile {
    pub team: Team,
    pub offensive_plays: usize,
    pub defensive_plays: usize,
    /// Season mean EPA with the ball (higher is better)
    pub full_offense: f64,
    /// Season mean EPA allowed (lower is better)
    pub full_defense: f64,
    pub recent_offense: f64,
    pub recent_defense: f64,
    pub recent_games: usize,
    /// Faced-defense strength subtracted from `full_offense`, if enabled
    pub sos_adjustment: Option<f64>,
    pub combined_offense: f64,
    pub combined_defense: f64,
    /// combined_offense - combined_defense
    pub combined: f64,
    /// Share of offensive plays with positive EPA
    pub offense_success_rate: f64,
    /// Share of defensive plays holding the opponent to negative EPA
    pub defense_stop_rate: f64,
    /// No plays on one side of the ball
    pub sparse: bool,
    pub situational: SituationalMetrics,
}

impl TeamPerformanceProfile {
    /// Neutral all-zero profile for a team without usable plays
    pub fn sparse(team: Team, offensive_plays: usize, defensive_plays: usize) -> Self {
        Self {
            team,
            offensive_plays,
            defensive_plays,
            full_offense: 0.0,
            full_defense: 0.0,
            recent_offense: 0.0,
            recent_defense: 0.0,
            recent_games: 0,
            sos_adjustment: None,
            combined_offense: 0.0,
            combined_defense: 0.0,
            combined: 0.0,
            offense_success_rate: 0.0,
            defense_stop_rate: 0.0,
            sparse: true,
            situational: SituationalMetrics::default(),
        }
    }

    /// Profile carrying only a combined scalar, for callers that already
    /// have team efficiencies
    pub fn from_combined(team: Team, combined: f64) -> Self {
        Self {
            combined,
            combined_offense: combined,
            sparse: false,
            ..Self::sparse(team, 0, 0)
        }
    }
}
