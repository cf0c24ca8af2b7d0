use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `SocnetError` and maps other errors to
/// convert to a `SocnetError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum SocnetError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    ReportError(String),
    SocnetError(String),
}

impl From<io::Error> for SocnetError {
    fn from(error: io::Error) -> Self {
        SocnetError::IoError(error)
    }
}

impl From<serde_json::Error> for SocnetError {
    fn from(error: serde_json::Error) -> Self {
        SocnetError::JsonError(error)
    }
}

impl From<csv::Error> for SocnetError {
    fn from(error: csv::Error) -> Self {
        SocnetError::CsvError(error)
    }
}

impl From<String> for SocnetError {
    fn from(error: String) -> Self {
        SocnetError::SocnetError(error)
    }
}

impl From<&str> for SocnetError {
    fn from(error: &str) -> Self {
        SocnetError::SocnetError(error.to_string())
    }
}

impl std::error::Error for SocnetError {}

impl Display for SocnetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error: {self:?}")?;
        Ok(())
    }
}
