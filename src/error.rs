use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PriceWatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {}", .0.display())]
    FileMissing(PathBuf),

    #[error("Price element not found on page: {url}")]
    PriceElementMissing { url: String },

    #[error("Invalid price text: {0:?}")]
    InvalidPrice(String),

    #[error("No price records for product: {0}")]
    ProductNotFound(String),

    #[error("No previous price for product: {0}")]
    NoPreviousPrice(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl PriceWatchError {
    /// True for outcomes a dashboard should render as "no data yet".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PriceWatchError::FileMissing(_) | PriceWatchError::ProductNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PriceWatchError>;
