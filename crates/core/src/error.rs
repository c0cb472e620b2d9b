use thiserror::Error;

/// Errors that can occur while reading, mutating, or round-tripping a grid
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("Invalid cell coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
