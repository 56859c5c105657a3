use thiserror::Error;

#[derive(Error, Debug)]
pub enum TicketLensError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    NoData(String),

    #[error("Vectorization failed: {0}")]
    Vectorize(String),
}

pub type Result<T> = std::result::Result<T, TicketLensError>;
