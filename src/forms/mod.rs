//! Form definitions accepted by the service layer.

use thiserror::Error;
use validator::ValidationErrors;

pub mod search;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid sort: {0}")]
    InvalidSort(String),
}
