use qset_core::repository::QSetRepository;

use super::response::{qset_error_response, success_response, ApiGatewayResponse};

/// Issues the next card `user` has not answered in `set_name`, or `null` when
/// every card has been answered.
pub fn handle_next_card(
    repository: &QSetRepository<'_>,
    set_name: &str,
    user: &str,
) -> ApiGatewayResponse {
    let next = repository
        .load_metadata(set_name)
        .and_then(|qset| repository.next_unanswered(&qset, user));

    match next {
        Ok(submission) => success_response(submission),
        Err(error) => qset_error_response(&error),
    }
}

#[cfg(test)]
mod tests {
    use qset_core::test_helpers::MemoryObjectStore;
    use serde_json::{json, Value};

    use super::*;

    fn seeded_store() -> MemoryObjectStore {
        let store = MemoryObjectStore::new();
        store.seed_json(
            "meta/colors.json",
            &json!({"name": "colors", "choices": ["red", "blue"], "tags": []}),
        );
        store.seed_json(
            "q_cards/colors/q1.json",
            &json!({"name": "q1", "prompt": "Sky?"}),
        );
        store
    }

    fn body_of(response: &ApiGatewayResponse) -> Value {
        serde_json::from_str(&response.body).expect("body should be JSON")
    }

    #[test]
    fn issues_first_unanswered_card() {
        let store = seeded_store();
        let response = handle_next_card(&QSetRepository::new(&store), "colors", "u1");

        assert_eq!(response.status_code, 200);
        assert_eq!(
            body_of(&response),
            json!({
                "qcard": {"name": "q1", "prompt": "Sky?"},
                "user": "u1",
                "a_round": 1,
                "answer": null,
                "s_name": "colors"
            })
        );
    }

    #[test]
    fn exhausted_set_returns_null() {
        let store = seeded_store();
        store.seed_json("answers/colors/u1/1/q1.json", &json!({}));

        let response = handle_next_card(&QSetRepository::new(&store), "colors", "u1");

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "null");
    }

    #[test]
    fn unknown_set_is_not_found() {
        let store = seeded_store();
        let response = handle_next_card(&QSetRepository::new(&store), "shapes", "u1");

        assert_eq!(response.status_code, 404);
        assert_eq!(body_of(&response)["error"], json!("not_found"));
    }

    #[test]
    fn listing_outage_is_service_unavailable() {
        let store = seeded_store();
        store.fail_listings("throttled");

        let response = handle_next_card(&QSetRepository::new(&store), "colors", "u1");
        assert_eq!(response.status_code, 503);
    }
}
