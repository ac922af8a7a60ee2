//! Error types for table lookups and table loading.

use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while loading content tables or looking entries up.
#[derive(Debug, Error)]
pub enum TableError {
    /// A range-floor lookup went past the largest key in the table.
    #[error("roll {key} is out of range for table '{table}' (max key {max})")]
    OutOfRange {
        /// Table that was searched.
        table: &'static str,
        /// The rolled key.
        key: u32,
        /// Largest key stored in the table.
        max: u32,
    },

    /// A range table has no entries at all.
    #[error("table '{table}' is empty")]
    Empty {
        /// Table that was searched.
        table: &'static str,
    },

    /// A name-keyed lookup found nothing.
    #[error("no entry '{key}' in table '{table}'")]
    MissingKey {
        /// Table that was searched.
        table: &'static str,
        /// The name that was looked up.
        key: String,
    },

    /// A skill name in the table data is not one of the known skills.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// An attribute name in the table data is not one of the seven attributes.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// A table phrase did not have the expected shape.
    #[error("malformed {field}: \"{text}\"")]
    Malformed {
        /// What was being parsed (e.g. "career skill").
        field: &'static str,
        /// The offending text.
        text: String,
    },

    /// The table file could not be read.
    #[error("cannot read tables: {0}")]
    Io(#[from] std::io::Error),

    /// The table file is not valid table JSON.
    #[error("invalid tables: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    pub(crate) fn malformed(field: &'static str, text: impl Into<String>) -> Self {
        Self::Malformed {
            field,
            text: text.into(),
        }
    }
}
