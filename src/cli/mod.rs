//! gridiron-edge CLI
//!
//! Commands:
//! - `gridiron-edge predict` - Predict one matchup, optionally against a line
//! - `gridiron-edge card` - Build the weekly betting card from a slate file
//! - `gridiron-edge kelly` - Kelly sizing report for a price and probability
//! - `gridiron-edge key-numbers` - Where a spread sits relative to key numbers

pub mod output;
pub mod slate;

use anyhow::Context;
use chrono::Duration;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::data::{read_plays, FilePlayCache, JsonFileSource, PlayCache};
use crate::domain::{AmericanOdds, GameContext, GamePrediction, MarketLine, PlayRecord, Team};
use crate::metrics::PerformanceMetricStore;
use crate::predictor::GamePredictor;
use crate::wager::{analyze_key_numbers, kelly_sizing, CardFailure, WagerSizer};

use output::{OutputMode, PredictionRow};
use slate::Slate;

#[derive(Parser, Debug)]
#[command(name = "gridiron-edge")]
#[command(author, version, about = "NFL efficiency-differential predictor and wager sizer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration directory
    #[arg(long, global = true, default_value = "config", env = "EDGE_CONFIG_DIR")]
    pub config_dir: PathBuf,

    /// Play-by-play JSON file; bypasses the season cache
    #[arg(long, global = true)]
    pub plays: Option<PathBuf>,

    /// Season to load (defaults to data.season)
    #[arg(long, global = true)]
    pub season: Option<i32>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict a single matchup
    Predict {
        /// Home team code (e.g. KC)
        #[arg(long)]
        home: Team,
        /// Away team code (e.g. BAL)
        #[arg(long)]
        away: Team,
        /// Neutral-site game
        #[arg(long)]
        neutral: bool,
        #[arg(long)]
        playoff: bool,
        /// Market spread, home-relative (positive = home favored)
        #[arg(long, allow_hyphen_values = true)]
        market_spread: Option<f64>,
        #[arg(long, default_value_t = -110, allow_hyphen_values = true)]
        odds: i32,
        #[arg(long)]
        bankroll: Option<Decimal>,
    },
    /// Build the betting card for a slate file
    Card {
        /// TOML slate with [[games]] entries
        slate: PathBuf,
        /// Overrides the slate bankroll
        #[arg(long)]
        bankroll: Option<Decimal>,
        /// Only show actionable plays
        #[arg(long)]
        actionable: bool,
    },
    /// Kelly sizing for a win probability at a price
    Kelly {
        /// Win probability (0-1)
        #[arg(long)]
        probability: f64,
        #[arg(long, default_value_t = -110, allow_hyphen_values = true)]
        odds: i32,
        #[arg(long)]
        bankroll: Option<Decimal>,
        /// Kelly fraction (defaults to model.wager.kelly_fraction)
        #[arg(long)]
        fraction: Option<f64>,
    },
    /// Key-number analysis for a spread
    KeyNumbers {
        #[arg(allow_hyphen_values = true)]
        spread: f64,
    },
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let mode = OutputMode::from_json_flag(cli.json);

    match &cli.command {
        Commands::Predict {
            home,
            away,
            neutral,
            playoff,
            market_spread,
            odds,
            bankroll,
        } => {
            let predictor = load_predictor(&cli, &config)?;
            let ctx = GameContext {
                home_field: !neutral,
                is_playoff: *playoff,
                ..GameContext::default()
            };
            let prediction = predictor.predict(*home, *away, &ctx)?;

            let recommendation = match market_spread {
                Some(spread) => {
                    let odds = AmericanOdds::new(*odds)?;
                    let market = MarketLine::new(prediction.matchup(), *spread, odds);
                    let bankroll = bankroll.unwrap_or(config.model.wager.default_bankroll);
                    Some(WagerSizer::new(&config.model).recommend(
                        &prediction,
                        &market,
                        bankroll,
                        *playoff,
                    )?)
                }
                None => None,
            };

            match mode {
                OutputMode::Json => output::print_json(&serde_json::json!({
                    "prediction": prediction,
                    "recommendation": recommendation,
                }))?,
                OutputMode::Table => {
                    output::print_table(&[PredictionRow::from(&prediction)]);
                    output::print_table(&output::adjustment_rows(&prediction));
                    if let Some(rec) = recommendation {
                        println!("{rec}");
                    }
                }
            }
        }
        Commands::Card {
            slate,
            bankroll,
            actionable,
        } => {
            let slate = Slate::load(slate)
                .with_context(|| format!("reading slate {}", slate.display()))?;
            let predictor = load_predictor(&cli, &config)?;
            let (predictions, failures) = predict_slate(&predictor, &slate).await?;

            let bankroll = bankroll
                .or(slate.bankroll)
                .unwrap_or(config.model.wager.default_bankroll);
            let mut card = WagerSizer::new(&config.model).weekly_card(
                &predictions,
                &slate.lines(),
                slate.odds,
                bankroll,
                slate.is_playoff,
            );
            card.failed.extend(failures);

            info!(
                "Card: {} plays, {} actionable, {} units",
                card.recommendations.len(),
                card.actionable().count(),
                card.total_units()
            );

            match mode {
                OutputMode::Json => output::print_json(&card)?,
                OutputMode::Table => {
                    let rows: Vec<_> = card
                        .recommendations
                        .iter()
                        .filter(|r| !actionable || r.signal.is_actionable())
                        .map(output::CardRow::from)
                        .collect();
                    output::print_table(&rows);
                    for game in &card.unmatched {
                        println!("no line: {game}");
                    }
                    for failure in &card.failed {
                        println!("failed: {} ({})", failure.game, failure.error);
                    }
                }
            }
        }
        Commands::Kelly {
            probability,
            odds,
            bankroll,
            fraction,
        } => {
            let sizing = kelly_sizing(
                *probability,
                AmericanOdds::new(*odds)?,
                bankroll.unwrap_or(config.model.wager.default_bankroll),
                fraction.unwrap_or(config.model.wager.kelly_fraction),
            )?;
            match mode {
                OutputMode::Json => output::print_json(&sizing)?,
                OutputMode::Table => output::print_table(&output::kelly_rows(&sizing)),
            }
        }
        Commands::KeyNumbers { spread } => {
            let analysis = analyze_key_numbers(*spread, &config.model.wager.analysis_key_numbers);
            match mode {
                OutputMode::Json => output::print_json(&analysis)?,
                OutputMode::Table => output::print_table(&output::key_number_rows(&analysis)),
            }
        }
    }

    Ok(())
}

fn load_plays(cli: &Cli, config: &AppConfig) -> anyhow::Result<Vec<PlayRecord>> {
    if let Some(path) = &cli.plays {
        return Ok(read_plays(path)?);
    }

    let season = cli.season.unwrap_or(config.data.season);
    let cache = FilePlayCache::new(
        &config.data.cache_dir,
        Duration::hours(config.data.cache_max_age_hours),
        JsonFileSource::new(&config.data.source_dir),
    );
    let lookup = cache.get(season)?;
    if let crate::data::CacheLookup::Stale { age, .. } = &lookup {
        warn!("Using play data {}h old for season {}", age.num_hours(), season);
    }
    Ok(lookup.into_plays())
}

fn load_predictor(cli: &Cli, config: &AppConfig) -> anyhow::Result<GamePredictor> {
    let plays = load_plays(cli, config)?;
    info!("Loaded {} plays", plays.len());
    let store = PerformanceMetricStore::new(plays, &config.model);
    Ok(GamePredictor::new(Arc::new(store), &config.model))
}

/// Predict every game on a slate, one blocking task per matchup
async fn predict_slate(
    predictor: &GamePredictor,
    slate: &Slate,
) -> anyhow::Result<(Vec<GamePrediction>, Vec<CardFailure>)> {
    let mut set = JoinSet::new();
    for (idx, game) in slate.games.iter().cloned().enumerate() {
        let predictor = predictor.clone();
        let is_playoff = slate.is_playoff;
        set.spawn_blocking(move || {
            let ctx = GameContext {
                is_playoff: game.context.is_playoff || is_playoff,
                ..game.context.clone()
            };
            (idx, game.key(), predictor.predict(game.home, game.away, &ctx))
        });
    }

    let mut results = Vec::with_capacity(slate.games.len());
    while let Some(joined) = set.join_next().await {
        results.push(joined?);
    }
    results.sort_by_key(|(idx, _, _)| *idx);

    let mut predictions = Vec::new();
    let mut failures = Vec::new();
    for (_, key, result) in results {
        match result {
            Ok(prediction) => predictions.push(prediction),
            Err(e) => {
                warn!("Prediction failed for {}: {}", key, e);
                failures.push(CardFailure {
                    game: key,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok((predictions, failures))
}
