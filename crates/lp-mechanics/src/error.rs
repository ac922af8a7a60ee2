//! Error types for dice and random sources.

/// Errors raised while drawing random numbers.
#[derive(Debug, thiserror::Error)]
pub enum RandomError {
    /// The random.org request failed.
    #[error("true-random request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The random.org service answered with something other than integers.
    #[error("malformed true-random response: {0}")]
    Malformed(String),

    /// A scripted source ran out of values.
    #[error("scripted random source exhausted after {0} values")]
    Exhausted(usize),

    /// A draw asked for an empty range.
    #[error("invalid range: {min}..={max}")]
    InvalidRange {
        /// Lower bound requested.
        min: u32,
        /// Upper bound requested.
        max: u32,
    },

    /// A source returned fewer values than requested.
    #[error("expected {expected} values, got {got}")]
    ShortBatch {
        /// Number of values requested.
        expected: usize,
        /// Number of values received.
        got: usize,
    },

    /// A dice batch was popped past its end.
    #[error("dice batch is empty")]
    BatchEmpty,
}

/// Convenience result type for random operations.
pub type RandomResult<T> = Result<T, RandomError>;
