use thiserror::Error;

use crate::common::Position;

/// Convenient result alias for the pathfinder.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A requested coordinate lies outside the grid.
    #[error("position {position:?} is outside the {width}x{height} grid")]
    OutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },

    /// The open set ran dry before the goal was expanded.
    #[error("no path found from {start:?} to {goal:?}")]
    NoPathFound { start: Position, goal: Position },

    /// The configured expansion budget was used up.
    #[error("search gave up after {expansions} expansions")]
    BudgetExhausted { expansions: usize },

    #[error("{path} does not exist!")]
    InputMissing { path: String },

    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    /// A marker colour does not occur anywhere in the input image.
    #[error("couldn't find {marker} pixel")]
    MarkerNotFound { marker: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code used by the command-line front end.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::InputMissing { .. } => 2,
            Error::MarkerNotFound { .. } => 3,
            Error::NoPathFound { .. } | Error::BudgetExhausted { .. } => 4,
            _ => 1,
        }
    }
}
