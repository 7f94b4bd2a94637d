use super::{mean_epa, rate};
use super::profile::SituationalMetrics;
use crate::config::MetricsConfig;
use crate::domain::PlayRecord;

/// Split a team's offensive and defensive plays into situational subsets.
pub fn situational_metrics(
    offense: &[&PlayRecord],
    defense: &[&PlayRecord],
    config: &MetricsConfig,
) -> SituationalMetrics {
    let third_down = |p: &&PlayRecord| {
        p.is_third_down()
            && (config.third_down_min_distance..=config.third_down_max_distance)
                .contains(&p.yards_to_go)
    };
    let red_zone = |p: &&PlayRecord| p.yardline <= config.red_zone_yardline;
    let fourth_quarter = |p: &&PlayRecord| p.quarter == 4;
    let two_minute = |p: &&PlayRecord| {
        p.half_seconds_remaining > 0 && p.half_seconds_remaining <= config.two_minute_seconds
    };
    let explosive = |p: &&PlayRecord| p.yards_gained >= config.explosive_play_yards;
    let converted = |p: &PlayRecord| p.flags.first_down || p.flags.touchdown;

    let off_third: Vec<&PlayRecord> = offense.iter().copied().filter(third_down).collect();
    let def_third: Vec<&PlayRecord> = defense.iter().copied().filter(third_down).collect();
    let off_red: Vec<&PlayRecord> = offense.iter().copied().filter(red_zone).collect();
    let def_red: Vec<&PlayRecord> = defense.iter().copied().filter(red_zone).collect();
    let off_explosive: Vec<&PlayRecord> = offense.iter().copied().filter(explosive).collect();
    let def_explosive: Vec<&PlayRecord> = defense.iter().copied().filter(explosive).collect();

    SituationalMetrics {
        third_down_offense: mean_epa(&off_third),
        third_down_conversion_rate: rate(&off_third, |p| converted(p)),
        third_down_defense: mean_epa(&def_third),
        third_down_stop_rate: rate(&def_third, |p| !converted(p)),
        red_zone_offense: mean_epa(&off_red),
        red_zone_td_rate: rate(&off_red, |p| p.flags.touchdown),
        red_zone_defense: mean_epa(&def_red),
        red_zone_td_allowed_rate: rate(&def_red, |p| p.flags.touchdown),
        fourth_quarter_offense: mean_epa(
            &offense.iter().copied().filter(fourth_quarter).collect::<Vec<_>>(),
        ),
        fourth_quarter_defense: mean_epa(
            &defense.iter().copied().filter(fourth_quarter).collect::<Vec<_>>(),
        ),
        two_minute_offense: mean_epa(
            &offense.iter().copied().filter(two_minute).collect::<Vec<_>>(),
        ),
        two_minute_defense: mean_epa(
            &defense.iter().copied().filter(two_minute).collect::<Vec<_>>(),
        ),
        explosive_play_rate: ratio(off_explosive.len(), offense.len()),
        explosive_play_offense: mean_epa(&off_explosive),
        explosive_allowed_rate: ratio(def_explosive.len(), defense.len()),
        explosive_play_defense: mean_epa(&def_explosive),
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
