use qset_core::repository::QSetRepository;
use serde::Serialize;

use super::response::{qset_error_response, success_response, ApiGatewayResponse};

#[derive(Debug, Serialize)]
pub struct SetListResponse {
    #[serde(rename = "Sets")]
    pub sets: Vec<String>,
}

pub fn handle_list_sets(repository: &QSetRepository<'_>) -> ApiGatewayResponse {
    match repository.list_set_names() {
        Ok(sets) => success_response(SetListResponse { sets }),
        Err(error) => qset_error_response(&error),
    }
}

#[cfg(test)]
mod tests {
    use qset_core::test_helpers::MemoryObjectStore;
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn lists_set_names() {
        let store = MemoryObjectStore::new();
        store.seed_json("meta/colors.json", &json!({"name": "colors", "choices": []}));
        store.seed_json("meta/shapes.json", &json!({"name": "shapes", "choices": []}));

        let response = handle_list_sets(&QSetRepository::new(&store));

        assert_eq!(response.status_code, 200);
        let body: Value = serde_json::from_str(&response.body).expect("body should be JSON");
        assert_eq!(body, json!({"Sets": ["colors", "shapes"]}));
    }

    #[test]
    fn empty_catalog_is_not_found() {
        let store = MemoryObjectStore::new();
        let response = handle_list_sets(&QSetRepository::new(&store));
        assert_eq!(response.status_code, 404);
    }
}
