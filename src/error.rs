use thiserror::Error;

/// Main error type for the prediction engine
#[derive(Error, Debug)]
pub enum EdgeError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    // Input validation errors
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    // Prediction payload errors
    #[error(
        "Invalid prediction for {game}: missing required fields. \
         Got: predicted_spread={predicted_spread:?}, win_probability={win_probability:?}"
    )]
    MissingPredictionField {
        game: String,
        predicted_spread: Option<f64>,
        win_probability: Option<f64>,
    },

    // Data availability errors
    #[error("Play data unavailable for {key}: {reason}")]
    PlayDataUnavailable { key: String, reason: String },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for EdgeError
pub type Result<T> = std::result::Result<T, EdgeError>;

/// Input validation failures. These abort the single prediction or
/// recommendation being built and are never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid team '{code}'. Must be one of: {valid}")]
    UnknownTeam { code: String, valid: String },

    #[error("A team cannot play itself: {0}")]
    SameTeam(String),

    #[error("Probability must be between 0 and 1, got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("Invalid American odds: {0}")]
    InvalidOdds(i32),

    #[error("Efficiency differential must be finite, got {0}")]
    NonFiniteDifferential(f64),

    #[error("Bankroll must be positive, got {0}")]
    InvalidBankroll(String),

    #[error("Kelly fraction must be in (0, 1], got {0}")]
    InvalidKellyFraction(f64),
}
