use thiserror::Error;

/// Why a dataset could not be obtained from its URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("response is not a valid dataset: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("dataset field `{field}` holds {value}, expected a non-negative number")]
    Invalid { field: String, value: f64 },
}
