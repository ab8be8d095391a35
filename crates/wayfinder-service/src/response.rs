//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Successful response with content type metadata, mirroring the `type`
/// field carried by [`ProblemDetails`](crate::problem::ProblemDetails).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,

    /// Content type for this response.
    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
