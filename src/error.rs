use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("GOOGLE_CREDENTIALS not found")]
    MissingCredentials,

    #[error("invalid GOOGLE_CREDENTIALS: {0}")]
    InvalidCredentials(serde_json::Error),

    #[error("sheets API rejected append ({status}): {body}")]
    SheetsRejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("schema version mismatch: found {found}, expected {expected}")]
    SchemaVersion { found: i64, expected: i64 },
}

pub type Result<T> = std::result::Result<T, StatsError>;
