use thiserror::Error;

#[derive(Error, Debug)]
pub enum TangochoError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Notion API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Configuration incomplete: {0} is not set")]
    ConfigIncomplete(String),

    #[error("No record with id: {0}")]
    UnknownRecord(String),

    #[error("TangochoError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for TangochoError {
    fn from(error: std::io::Error) -> Self {
        TangochoError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for TangochoError {
    fn from(error: reqwest::Error) -> Self {
        TangochoError::Reqwest(Box::new(error))
    }
}
