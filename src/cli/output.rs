//! Output formatting for CLI commands.
//!
//! Supports two modes: human-readable tables (default) and JSON (--json).

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::domain::GamePrediction;
use crate::wager::{BettingRecommendation, KellySizing, KeyNumberAnalysis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

pub fn print_table<T: Tabled>(rows: &[T]) {
    if rows.is_empty() {
        println!("(no results)");
    } else {
        println!("{}", Table::new(rows));
    }
}

pub fn print_json<T: Serialize + ?Sized>(item: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(item)?);
    Ok(())
}

#[derive(Debug, Tabled)]
pub struct PredictionRow {
    pub game: String,
    pub winner: String,
    pub spread: String,
    pub win_pct: String,
    pub confidence: String,
    pub differential: String,
}

impl From<&GamePrediction> for PredictionRow {
    fn from(p: &GamePrediction) -> Self {
        Self {
            game: p.matchup(),
            winner: p.predicted_winner.to_string(),
            spread: format!("{:+.1}", p.predicted_spread),
            win_pct: format!("{:.1}%", p.win_probability * 100.0),
            confidence: p.confidence.to_string(),
            differential: format!("{:+.4}", p.efficiency_differential),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct AdjustmentRow {
    pub adjustment: String,
    pub value: String,
}

pub fn adjustment_rows(p: &GamePrediction) -> Vec<AdjustmentRow> {
    p.adjustments
        .iter()
        .map(|(kind, value)| AdjustmentRow {
            adjustment: kind.to_string(),
            value: format!("{:+.4}", value),
        })
        .collect()
}

#[derive(Debug, Tabled)]
pub struct CardRow {
    pub game: String,
    pub signal: String,
    pub bet: String,
    pub model: String,
    pub market: String,
    pub edge: String,
    pub stake: String,
    pub units: String,
    pub confidence: String,
}

impl From<&BettingRecommendation> for CardRow {
    fn from(r: &BettingRecommendation) -> Self {
        Self {
            game: r.game.clone(),
            signal: r.signal.to_string(),
            bet: r.recommended_side.clone(),
            model: format!("{:+.1}", r.model_spread),
            market: format!("{:+.1}", r.market_spread),
            edge: format!("{:.1}", r.edge_points),
            stake: format!("{:.2}%", r.kelly_fraction * 100.0),
            units: r.suggested_units.to_string(),
            confidence: r.confidence.to_string(),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct FieldRow {
    pub field: &'static str,
    pub value: String,
}

pub fn kelly_rows(k: &KellySizing) -> Vec<FieldRow> {
    let row = |field, value: String| FieldRow { field, value };
    vec![
        row("win probability", format!("{:.1}%", k.win_probability * 100.0)),
        row("odds", format!("{} ({:.3} decimal)", k.odds, k.decimal_odds)),
        row("implied probability", format!("{:.1}%", k.implied_probability * 100.0)),
        row("edge", format!("{:+.2}%", k.edge * 100.0)),
        row("full kelly", format!("{:.2}% (${})", k.full_kelly * 100.0, k.full_kelly_amount)),
        row("half kelly", format!("{:.2}% (${})", k.half_kelly * 100.0, k.half_kelly_amount)),
        row(
            "quarter kelly",
            format!("{:.2}% (${})", k.quarter_kelly * 100.0, k.quarter_kelly_amount),
        ),
        row(
            "recommended",
            format!("{:.2}% (${})", k.fractional_kelly * 100.0, k.fractional_kelly_amount),
        ),
        row("expected value", format!("${}", k.expected_value)),
        row("expected roi", format!("{:+.2}%", k.expected_roi)),
        row("verdict", format!("{:?} / {:?}", k.verdict.action, k.verdict.tier)),
    ]
}

pub fn key_number_rows(a: &KeyNumberAnalysis) -> Vec<FieldRow> {
    vec![
        FieldRow {
            field: "spread",
            value: format!("{:+.1}", a.spread),
        },
        FieldRow {
            field: "nearest key number",
            value: format!("{}", a.nearest_key_number),
        },
        FieldRow {
            field: "distance",
            value: format!("{:.1}", a.distance_from_key),
        },
        FieldRow {
            field: "on key number",
            value: a.is_key_number.to_string(),
        },
        FieldRow {
            field: "push risk",
            value: a.at_risk_of_push.to_string(),
        },
    ]
}
