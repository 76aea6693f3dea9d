use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error from whichever reader backs a source format.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything that can go wrong between opening a source and handing a
/// prepared view to the UI.
#[derive(Debug, Error)]
pub enum DataError {
    /// The source file is missing, unreadable, corrupt or of an unknown format.
    #[error("cannot load data from `{}`", .path.display())]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: SourceError,
    },

    /// A required table or column is absent.
    #[error("missing {0}")]
    SchemaMissing(Missing),

    /// A cell that does not fit the measurement data model.
    #[error("table `{table}`, row {row}, column `{column}`: {reason}")]
    InvalidValue {
        table: String,
        /// 1-based data row, not counting the header.
        row: usize,
        column: String,
        reason: String,
    },

    /// A label outside the closed set reached the selector.
    #[error("unknown configuration label `{0}`")]
    UnknownLabel(String),

    /// A table with zero rows where a minimum was requested.
    #[error("no data to display for `{0}`")]
    EmptyTable(String),
}

impl DataError {
    pub(crate) fn resource(path: impl Into<PathBuf>, source: impl Into<SourceError>) -> Self {
        DataError::ResourceNotFound {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn missing_table(table: &str) -> Self {
        DataError::SchemaMissing(Missing::Table(table.to_string()))
    }

    pub(crate) fn missing_column(table: &str, column: &str) -> Self {
        DataError::SchemaMissing(Missing::Column {
            table: table.to_string(),
            column: column.to_string(),
        })
    }
}

/// What part of the expected schema was not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    Table(String),
    Column { table: String, column: String },
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Table(table) => write!(f, "table `{table}`"),
            Missing::Column { table, column } => {
                write!(f, "column `{column}` in table `{table}`")
            }
        }
    }
}
