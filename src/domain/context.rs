use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything known about a game beyond the two teams' play data.
///
/// Absent sections contribute nothing to the adjustment pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameContext {
    /// False for neutral-site games
    pub home_field: bool,
    /// None derives rivalry from division membership
    pub division_game: Option<bool>,
    pub is_playoff: bool,
    pub rest: Option<RestDays>,
    pub injuries: InjuryReport,
    pub weather: Option<Weather>,
    pub kickers: Option<KickerMatchup>,
    pub advanced: Option<AdvancedMatchup>,
    pub game_date: Option<NaiveDate>,
}

impl Default for GameContext {
    fn default() -> Self {
        Self {
            home_field: true,
            division_game: None,
            is_playoff: false,
            rest: None,
            injuries: InjuryReport::default(),
            weather: None,
            kickers: None,
            advanced: None,
            game_date: None,
        }
    }
}

impl GameContext {
    /// Neutral-site context with no extra information
    pub fn neutral() -> Self {
        Self {
            home_field: false,
            ..Self::default()
        }
    }
}

/// Days since each team last played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestDays {
    pub home: u32,
    pub away: u32,
}

impl RestDays {
    /// Positive when the home team is better rested
    pub fn differential(&self) -> i64 {
        i64::from(self.home) - i64::from(self.away)
    }
}

/// Signed efficiency deltas from curated injury reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InjuryReport {
    pub home: Option<f64>,
    pub away: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temperature_f: f64,
    pub wind_mph: f64,
    #[serde(default)]
    pub precipitation: bool,
}

/// Field-goal accuracy by distance band, as fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KickerStats {
    pub fg_pct_short: f64,
    pub fg_pct_medium: f64,
    pub fg_pct_long: f64,
    /// Accuracy in late, close situations
    #[serde(default)]
    pub clutch_pct: Option<f64>,
}

impl Default for KickerStats {
    /// League-average kicker
    fn default() -> Self {
        Self {
            fg_pct_short: 0.93,
            fg_pct_medium: 0.82,
            fg_pct_long: 0.68,
            clutch_pct: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KickerMatchup {
    pub home: KickerStats,
    pub away: KickerStats,
}

/// Per-team inputs to the advanced matchup layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedMatchupStats {
    /// Sacks taken per offensive dropback
    pub sack_rate: f64,
    /// Share of offensive passes gaining 20+ yards
    pub explosive_pass_rate: f64,
    /// Share of opponent passes allowed gaining 20+ yards
    pub explosive_pass_allowed_rate: f64,
    /// Snaps on either side of the ball per game
    pub plays_per_game: f64,
    /// Net efficiency per game in schedule order
    pub game_efficiency: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedMatchup {
    pub home: AdvancedMatchupStats,
    pub away: AdvancedMatchupStats,
}
