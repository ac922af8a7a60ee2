//! Error types for life-path generation.

use thiserror::Error;

use lp_core::TableError;
use lp_mechanics::RandomError;

/// Result type for selection operations.
pub type SelectResult<T> = Result<T, SelectionError>;

/// Errors raised while making a choice.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// The input matched no option. Interactive choosers re-prompt on this.
    #[error("invalid selection: {0}")]
    Invalid(String),

    /// There was nothing to choose from.
    #[error("no options to choose from")]
    NoOptions,

    /// Input ended before a choice was made.
    #[error("input closed before a choice was made")]
    Closed,

    /// Reading or writing the terminal failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// An automatic choice could not draw a random index.
    #[error("{0}")]
    Random(#[from] RandomError),
}

/// Result type for generation.
pub type LifePathResult<T> = Result<T, LifePathError>;

/// Errors that abort generation. No partial character is returned.
#[derive(Debug, Error)]
pub enum LifePathError {
    /// A table lookup failed.
    #[error("{0}")]
    Table(#[from] TableError),

    /// The dice or local random source failed.
    #[error("{0}")]
    Random(#[from] RandomError),

    /// A choice could not be made.
    #[error("{0}")]
    Selection(#[from] SelectionError),
}
