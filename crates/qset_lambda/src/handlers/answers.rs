use qset_core::model::AnswerSubmission;
use qset_core::repository::QSetRepository;
use serde_json::Value;
use tracing::info;

use super::response::{
    qset_error_response, text_response, validation_error_response, ApiGatewayResponse,
};

/// Stores a submitted answer and replies with a plain `OK`.
pub fn handle_submit_answer(repository: &QSetRepository<'_>, body: Value) -> ApiGatewayResponse {
    let submission = match serde_json::from_value::<AnswerSubmission>(body) {
        Ok(value) => value,
        Err(error) => {
            return validation_error_response(&format!("Malformed answer submission: {error}"))
        }
    };

    match repository.record_answer(&submission) {
        Ok(key) => {
            info!(key = %key, "answer stored");
            text_response(200, "OK")
        }
        Err(error) => qset_error_response(&error),
    }
}
