use std::collections::HashSet;
use tracing::{debug, warn};

use super::profile::TeamPerformanceProfile;
use super::situational::situational_metrics;
use super::{mean_epa, rate};
use crate::config::{MetricsConfig, ModelConfig};
use crate::domain::{AdvancedMatchupStats, PlayRecord, Team};

/// A team's plays split by side of the ball
#[derive(Debug, Default)]
pub struct TeamPlays<'a> {
    pub offense: Vec<&'a PlayRecord>,
    pub defense: Vec<&'a PlayRecord>,
}

impl TeamPlays<'_> {
    pub fn is_empty(&self) -> bool {
        self.offense.is_empty() && self.defense.is_empty()
    }
}

/// One season of play records with the efficiency computations over them
#[derive(Debug, Clone)]
pub struct PerformanceMetricStore {
    plays: Vec<PlayRecord>,
    config: MetricsConfig,
}

impl PerformanceMetricStore {
    pub fn new(plays: Vec<PlayRecord>, config: &ModelConfig) -> Self {
        debug!(plays = plays.len(), "Building performance metric store");
        Self {
            plays,
            config: config.metrics.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn plays(&self) -> &[PlayRecord] {
        &self.plays
    }

    pub fn team_plays(&self, team: Team) -> TeamPlays<'_> {
        let mut split = TeamPlays::default();
        for play in &self.plays {
            if play.offense == team {
                split.offense.push(play);
            } else if play.defense == team {
                split.defense.push(play);
            }
        }
        split
    }

    /// Distinct games the team appeared in, in encounter order
    pub fn game_ids(&self, team: Team) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.plays
            .iter()
            .filter(|p| p.involves(team))
            .filter_map(|p| seen.insert(p.game_id.as_str()).then_some(p.game_id.as_str()))
            .collect()
    }

    /// The last `recent_games` games the team appeared in
    pub fn recent_game_ids(&self, team: Team) -> Vec<&str> {
        let games = self.game_ids(team);
        let skip = games.len().saturating_sub(self.config.recent_games);
        games[skip..].to_vec()
    }

    pub fn recent_plays(&self, team: Team) -> TeamPlays<'_> {
        let recent: HashSet<&str> = self.recent_game_ids(team).into_iter().collect();
        let all = self.team_plays(team);
        TeamPlays {
            offense: all
                .offense
                .into_iter()
                .filter(|p| recent.contains(p.game_id.as_str()))
                .collect(),
            defense: all
                .defense
                .into_iter()
                .filter(|p| recent.contains(p.game_id.as_str()))
                .collect(),
        }
    }

    /// Season mean EPA allowed by a defense
    pub fn defensive_efficiency(&self, team: Team) -> f64 {
        mean_epa(&self.team_plays(team).defense)
    }

    /// Weighted mean strength of the defenses a team's offense has faced.
    ///
    /// Positive when the team faced defenses that allowed more than zero EPA,
    /// i.e. soft schedules are penalized. None when the team has no snaps.
    pub fn opponent_adjustment(&self, team: Team) -> Option<f64> {
        let mut seen = HashSet::new();
        let faced: Vec<f64> = self
            .plays
            .iter()
            .filter(|p| p.offense == team)
            .filter(|p| seen.insert(p.defense))
            .map(|p| self.defensive_efficiency(p.defense))
            .collect();

        if faced.is_empty() {
            return None;
        }
        let mean = faced.iter().sum::<f64>() / faced.len() as f64;
        Some(self.config.sos_weight * mean)
    }

    /// Full-season and recent-form efficiency blended into one scalar
    pub fn profile(&self, team: Team) -> TeamPerformanceProfile {
        let all = self.team_plays(team);
        if all.offense.is_empty() || all.defense.is_empty() {
            warn!(
                team = %team,
                offensive_plays = all.offense.len(),
                defensive_plays = all.defense.len(),
                "Sparse play data, using neutral efficiency profile"
            );
            return TeamPerformanceProfile::sparse(team, all.offense.len(), all.defense.len());
        }

        let mut full_offense = mean_epa(&all.offense);
        let full_defense = mean_epa(&all.defense);

        let sos_adjustment = if self.config.opponent_adjust {
            self.opponent_adjustment(team)
        } else {
            None
        };
        if let Some(sos) = sos_adjustment {
            full_offense -= sos;
        }

        let recent = self.recent_plays(team);
        let recent_games = self.recent_game_ids(team).len();
        let recent_offense = mean_epa(&recent.offense);
        let recent_defense = mean_epa(&recent.defense);

        let cfg = &self.config;
        let combined_offense =
            cfg.full_season_weight * full_offense + cfg.recent_weight * recent_offense;
        let combined_defense =
            cfg.full_season_weight * full_defense + cfg.recent_weight * recent_defense;

        let profile = TeamPerformanceProfile {
            team,
            offensive_plays: all.offense.len(),
            defensive_plays: all.defense.len(),
            full_offense,
            full_defense,
            recent_offense,
            recent_defense,
            recent_games,
            sos_adjustment,
            combined_offense,
            combined_defense,
            combined: combined_offense - combined_defense,
            offense_success_rate: rate(&all.offense, |p| p.epa > 0.0),
            defense_stop_rate: rate(&all.defense, |p| p.epa < 0.0),
            sparse: false,
            situational: situational_metrics(&all.offense, &all.defense, cfg),
        };

        debug!(
            "{} efficiency: off={:.3}, def={:.3}, combined={:.3} ({} recent games)",
            team,
            profile.combined_offense,
            profile.combined_defense,
            profile.combined,
            recent_games
        );

        profile
    }

    /// Inputs for the advanced matchup layer, derived from the same plays
    pub fn advanced_stats(&self, team: Team) -> AdvancedMatchupStats {
        let all = self.team_plays(team);
        let explosive = self.config.explosive_play_yards;

        let dropbacks: Vec<&PlayRecord> = all
            .offense
            .iter()
            .copied()
            .filter(|p| p.flags.pass || p.flags.sack)
            .collect();
        let off_passes: Vec<&PlayRecord> =
            all.offense.iter().copied().filter(|p| p.flags.pass).collect();
        let def_passes: Vec<&PlayRecord> =
            all.defense.iter().copied().filter(|p| p.flags.pass).collect();

        let games = self.game_ids(team);
        let plays_per_game = if games.is_empty() {
            0.0
        } else {
            (all.offense.len() + all.defense.len()) as f64 / games.len() as f64
        };

        let game_efficiency = games
            .iter()
            .map(|game| {
                let off: Vec<&PlayRecord> = all
                    .offense
                    .iter()
                    .copied()
                    .filter(|p| p.game_id == *game)
                    .collect();
                let def: Vec<&PlayRecord> = all
                    .defense
                    .iter()
                    .copied()
                    .filter(|p| p.game_id == *game)
                    .collect();
                mean_epa(&off) - mean_epa(&def)
            })
            .collect();

        AdvancedMatchupStats {
            sack_rate: rate(&dropbacks, |p| p.flags.sack),
            explosive_pass_rate: rate(&off_passes, |p| p.yards_gained >= explosive),
            explosive_pass_allowed_rate: rate(&def_passes, |p| p.yards_gained >= explosive),
            plays_per_game,
            game_efficiency,
        }
    }
}
