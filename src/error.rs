use std::io;

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    MissingCredentials(String),
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Search(String),
    #[error("{0}")]
    Send(String),
    #[error("{0}")]
    Label(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl AppError {
    /// Envelope taxonomy string for this error. Local input problems
    /// (io/json/url) count as validation failures; bare transport errors are
    /// reclassified into a domain variant by `scoped` before reaching here.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingCredentials(_) => "MissingCredentials",
            AppError::Auth(_) => "AuthenticationError",
            AppError::Validation(_) | AppError::Io(_) | AppError::Json(_) | AppError::Url(_) => {
                "ValidationError"
            }
            AppError::Search(_) | AppError::Http(_) => "SearchError",
            AppError::Send(_) => "SendError",
            AppError::Label(_) => "LabelError",
        }
    }

    /// Rewraps a bare transport failure into the domain error of the command
    /// that issued it. Every other variant already carries its taxonomy.
    pub fn scoped(self, wrap: fn(String) -> AppError) -> AppError {
        match self {
            AppError::Http(err) => wrap(format!("http error: {err}")),
            other => other,
        }
    }
}
