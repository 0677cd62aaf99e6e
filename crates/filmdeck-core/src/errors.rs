//! Error types for the filmdeck core library.

#[cfg(feature = "python")]
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
#[cfg(feature = "python")]
use pyo3::PyErr;

/// Top-level error enum for the filmdeck core library.
///
/// Row numbers are 1-based positions among data rows (the header is not
/// counted).
#[derive(Debug, thiserror::Error)]
pub enum FilmdeckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: missing value for column {column}")]
    MissingColumn { row: usize, column: &'static str },

    #[error("row {row}: malformed runtime {value:?}")]
    InvalidRuntime { row: usize, value: String },

    #[error("row {row}: IMDB rating {value:?} is not a number in [0, 10]")]
    InvalidRating { row: usize, value: String },

    #[error("row {row}: vote count {value:?} is not a non-negative integer")]
    InvalidVotes { row: usize, value: String },

    #[error("row {row}: genre list is empty")]
    EmptyGenres { row: usize },

    #[error("no row has a parseable release year")]
    NoReleaseYears,

    #[error("catalog source contains no data rows")]
    EmptyCatalog,

    #[error("Query error: {0}")]
    InvalidQuery(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "python")]
impl From<FilmdeckError> for PyErr {
    fn from(err: FilmdeckError) -> PyErr {
        match &err {
            FilmdeckError::Io(_) => PyIOError::new_err(err.to_string()),
            FilmdeckError::Csv(_)
            | FilmdeckError::MissingColumn { .. }
            | FilmdeckError::InvalidRuntime { .. }
            | FilmdeckError::InvalidRating { .. }
            | FilmdeckError::InvalidVotes { .. }
            | FilmdeckError::EmptyGenres { .. }
            | FilmdeckError::NoReleaseYears
            | FilmdeckError::EmptyCatalog
            | FilmdeckError::InvalidQuery(_)
            | FilmdeckError::Config(_) => PyValueError::new_err(err.to_string()),
            FilmdeckError::Json(_) => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

pub type FilmdeckResult<T> = Result<T, FilmdeckError>;
