use thiserror::Error;

// ---------------------------------------------------------------------------
// Load failures
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning a source into a table.
///
/// Each variant carries the underlying driver / parser message verbatim so
/// the notification shown to the user is exactly what the library reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Unrecognised source kind or file extension.
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    /// The driver could not establish a connection.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The query reached the engine but the engine reported an error.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Malformed file content.
    #[error("Parse failed: {0}")]
    ParseFailed(String),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::ParseFailed(err.to_string())
    }
}

impl From<calamine::Error> for LoadError {
    fn from(err: calamine::Error) -> Self {
        LoadError::ParseFailed(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Table model preconditions
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Column index {index} out of range (table has {columns} columns)")]
    ColumnOutOfRange { index: usize, columns: usize },
}
