//! Greeting response models

use serde::{Deserialize, Serialize};

/// Greeting response body
///
/// Transient value object, one per request; clients must validate that
/// `message` is a string before trusting the body.
#[derive(Serialize, Deserialize, Debug)]
pub struct HelloResponse {
    pub message: String,
}
