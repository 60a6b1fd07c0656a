//! Error types for the gridchase crate

use thiserror::Error;

use crate::grid::Direction;

/// Main error type for the gridchase crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal action {action} for agent {agent}")]
    IllegalAction { agent: usize, action: Direction },

    #[error("agent index {agent} out of range (game has {num_agents} agents)")]
    UnknownAgent { agent: usize, num_agents: usize },

    #[error("episode already over")]
    EpisodeOver,

    #[error("no legal actions available for agent {agent}")]
    NoLegalActions { agent: usize },

    #[error("layout has no rows")]
    EmptyLayout,

    #[error("ragged layout: row {row} has {got} tiles, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("unknown tile '{tile}' at column {x}, row {y}")]
    UnknownTile { tile: char, x: usize, y: usize },

    #[error("layout has no protagonist spawn ('P')")]
    MissingProtagonist,

    #[error("layout has more than one protagonist spawn ('P')")]
    DuplicateProtagonist,

    #[error("layout border is open at column {x}, row {y} (edges must be walls)")]
    UnenclosedLayout { x: usize, y: usize },

    #[error("tracking requires at least one adversary in the layout")]
    NoAdversaries,

    #[error("particle count must be positive, got {value}")]
    InvalidParticleCount { value: usize },

    #[error("feature vector has {got} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("dataset has {features} feature rows but {labels} labels")]
    LabelCountMismatch { features: usize, labels: usize },

    #[error("training did not converge within {epochs} epochs")]
    NoConvergence { epochs: usize },

    #[error("confidence level {value} must lie strictly between 0 and 1")]
    InvalidConfidence { value: f64 },

    #[error("trace has no rows")]
    EmptyTrace,

    #[error("invalid agent kind '{input}'. Expected one of: {expected}")]
    ParseAgentKind { input: String, expected: String },

    #[error("invalid tracker kind '{input}'. Expected one of: {expected}")]
    ParseTrackerKind { input: String, expected: String },

    #[error("invalid adversary kind '{input}'. Expected one of: {expected}")]
    ParseAdversaryKind { input: String, expected: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
