//! Response bodies shared across resources.

use serde::Serialize;

/// `{"message": "..."}` acknowledgement for deletes and logout.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}
