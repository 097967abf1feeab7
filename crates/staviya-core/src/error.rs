use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to fetch collection '{collection}': {message}")]
    Fetch { collection: String, message: String },

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Unknown navigation anchor: {0}")]
    UnknownAnchor(String),

    #[error("View was torn down before loading finished")]
    TornDown,

    #[error("Load was superseded by a newer request")]
    Superseded,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
