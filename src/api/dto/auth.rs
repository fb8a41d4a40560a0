//! DTO for credential issuance.

use serde::Serialize;

/// Response for `POST /jwt`.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
