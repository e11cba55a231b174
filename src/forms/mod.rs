//! Input payloads validated before they reach the store.

use thiserror::Error;
use validator::ValidationErrors;

pub mod advocates;

#[derive(Debug, Error)]
/// Errors that can occur when processing incoming advocate data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
