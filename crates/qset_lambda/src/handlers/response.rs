use qset_core::error::QSetError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, warn};

/// Seconds a client should wait before retrying after a storage outage.
pub const STORAGE_RETRY_AFTER_SECS: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

pub fn success_response(payload: impl Serialize) -> ApiGatewayResponse {
    match serde_json::to_string(&payload) {
        Ok(body) => ApiGatewayResponse {
            status_code: 200,
            headers: json!({"Content-Type": "application/json"}),
            body,
        },
        Err(error) => error_response(500, "serialization_error", &error.to_string()),
    }
}

pub fn text_response(status_code: u16, body: &str) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "text/plain"}),
        body: body.to_string(),
    }
}

pub fn validation_error_response(message: &str) -> ApiGatewayResponse {
    error_response(400, "validation_error", message)
}

pub fn error_response(status_code: u16, code: &str, message: &str) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: json!({
            "error": code,
            "message": message,
        })
        .to_string(),
    }
}

/// Maps a repository failure onto a status code and error body.
pub fn qset_error_response(error: &QSetError) -> ApiGatewayResponse {
    let message = error.to_string();
    match error {
        QSetError::InvalidIdentifier { .. } => error_response(400, "invalid_identifier", &message),
        QSetError::NotFound { .. } => error_response(404, "not_found", &message),
        QSetError::EmptyListing { .. } => error_response(404, "empty_listing", &message),
        QSetError::MalformedRecord { .. } => {
            warn!(error = %message, "stored record failed to parse");
            error_response(422, "malformed_record", &message)
        }
        QSetError::StorageUnavailable(_) => {
            error!(error = %message, "object store unavailable");
            let mut response = error_response(503, "storage_unavailable", &message);
            response.headers["Retry-After"] = json!(STORAGE_RETRY_AFTER_SECS.to_string());
            response
        }
    }
}
