use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a run can fail. Nothing here is recovered from, the first
/// failure aborts the whole pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid url {0} (example: https://dosya.co/xxxxxxxxxxxx/name.html)")]
    InvalidUrl(String),

    #[error("browser navigation failed: {0}")]
    Navigation(String),

    #[error("no form named F1 was found on the landing page")]
    FormNotFound,

    #[error("form F1 exists but has no fields to replay")]
    EmptyForm,

    #[error("download request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("download request returned HTTP {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
