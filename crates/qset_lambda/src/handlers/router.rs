//! Dispatch of API Gateway proxy events onto the three handlers.
//!
//! Accepts REST (`httpMethod`) and HTTP API (`requestContext.http.method`)
//! event shapes. Events without a method are direct invocations and are routed
//! by shape: path parameters select the next-card lookup, a submission body
//! selects answer recording, anything else lists sets.

use qset_core::repository::QSetRepository;
use serde_json::Value;
use tracing::debug;

use super::answers::handle_submit_answer;
use super::cards::handle_next_card;
use super::response::{error_response, validation_error_response, ApiGatewayResponse};
use super::sets::handle_list_sets;

pub const SET_PATH_PARAM: &str = "qset";
pub const USER_PATH_PARAM: &str = "userid";

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    ListSets,
    NextCard { set_name: String, user: String },
    SubmitAnswer { body: Value },
}

pub fn handle_event(event: Value, repository: &QSetRepository<'_>) -> ApiGatewayResponse {
    let route = match route_event(event) {
        Ok(route) => route,
        Err(response) => return response,
    };

    match route {
        Route::ListSets => handle_list_sets(repository),
        Route::NextCard { set_name, user } => handle_next_card(repository, &set_name, &user),
        Route::SubmitAnswer { body } => handle_submit_answer(repository, body),
    }
}

pub fn route_event(event: Value) -> Result<Route, ApiGatewayResponse> {
    if !event.is_object() {
        return Err(validation_error_response(
            "Request payload must be a JSON object",
        ));
    }

    let method = http_method(&event).map(str::to_ascii_uppercase);
    debug!(method = method.as_deref().unwrap_or("direct"), "routing event");

    match method.as_deref() {
        Some("GET") => route_lookup(&event),
        Some("POST") | Some("PUT") => {
            normalize_body(event).map(|body| Route::SubmitAnswer { body })
        }
        Some(other) => Err(error_response(
            405,
            "method_not_allowed",
            &format!("Method {other} is not supported"),
        )),
        None if has_path_parameters(&event) => route_lookup(&event),
        None if event.get("body").is_some() || event.get("qcard").is_some() => {
            normalize_body(event).map(|body| Route::SubmitAnswer { body })
        }
        None => Ok(Route::ListSets),
    }
}

fn route_lookup(event: &Value) -> Result<Route, ApiGatewayResponse> {
    let set_name = path_parameter(event, SET_PATH_PARAM);
    let user = path_parameter(event, USER_PATH_PARAM);

    match (set_name, user) {
        (None, None) => Ok(Route::ListSets),
        (Some(set_name), Some(user)) => Ok(Route::NextCard {
            set_name: set_name.to_string(),
            user: user.to_string(),
        }),
        (None, Some(_)) => Err(missing_path_parameter(SET_PATH_PARAM)),
        (Some(_), None) => Err(missing_path_parameter(USER_PATH_PARAM)),
    }
}

fn http_method(event: &Value) -> Option<&str> {
    event
        .get("httpMethod")
        .and_then(Value::as_str)
        .or_else(|| event.pointer("/requestContext/http/method").and_then(Value::as_str))
}

fn has_path_parameters(event: &Value) -> bool {
    event
        .get("pathParameters")
        .and_then(Value::as_object)
        .map(|parameters| !parameters.is_empty())
        .unwrap_or(false)
}

fn path_parameter<'e>(event: &'e Value, name: &str) -> Option<&'e str> {
    event
        .get("pathParameters")
        .and_then(|parameters| parameters.get(name))
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn missing_path_parameter(name: &str) -> ApiGatewayResponse {
    validation_error_response(&format!("Missing path parameter '{name}'"))
}

fn normalize_body(event: Value) -> Result<Value, ApiGatewayResponse> {
    let Some(body) = event.get("body") else {
        return Ok(event);
    };

    if event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return Err(validation_error_response(
            "Base64-encoded request bodies are not supported",
        ));
    }

    match body {
        Value::Null => Err(validation_error_response("Request body is required")),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => serde_json::from_str(text)
            .map_err(|error| validation_error_response(&format!("Malformed JSON body: {error}"))),
        _ => Err(validation_error_response(
            "Request body must be a JSON object",
        )),
    }
}

#[cfg(test)]
mod tests {
    use qset_core::test_helpers::MemoryObjectStore;
    use serde_json::json;

    use super::*;

    #[test]
    fn routes_rest_get_without_params_to_set_listing() {
        let route = route_event(json!({"httpMethod": "GET", "pathParameters": null}))
            .expect("event should route");
        assert_eq!(route, Route::ListSets);
    }

    #[test]
    fn routes_rest_get_with_params_to_next_card() {
        let route = route_event(json!({
            "httpMethod": "GET",
            "pathParameters": {"qset": "colors", "userid": "u1"}
        }))
        .expect("event should route");

        assert_eq!(
            route,
            Route::NextCard {
                set_name: "colors".to_string(),
                user: "u1".to_string(),
            }
        );
    }

    #[test]
    fn routes_http_api_post_with_string_body() {
        let route = route_event(json!({
            "requestContext": {"http": {"method": "post"}},
            "body": "{\"user\":\"u1\"}"
        }))
        .expect("event should route");

        assert_eq!(
            route,
            Route::SubmitAnswer {
                body: json!({"user": "u1"})
            }
        );
    }

    #[test]
    fn routes_direct_invocations_by_shape() {
        assert_eq!(
            route_event(json!({})).expect("event should route"),
            Route::ListSets
        );
        assert!(matches!(
            route_event(json!({"pathParameters": {"qset": "colors", "userid": "u1"}})),
            Ok(Route::NextCard { .. })
        ));
        assert!(matches!(
            route_event(json!({"qcard": {"name": "q1"}, "user": "u1"})),
            Ok(Route::SubmitAnswer { .. })
        ));
    }

    #[test]
    fn rejects_partial_path_parameters() {
        let response = route_event(json!({
            "httpMethod": "GET",
            "pathParameters": {"qset": "colors"}
        }))
        .expect_err("missing user should fail");

        assert_eq!(response.status_code, 400);
        assert!(response.body.contains("userid"));
    }

    #[test]
    fn rejects_unsupported_method() {
        let response = route_event(json!({"httpMethod": "DELETE"}))
            .expect_err("delete should be rejected");
        assert_eq!(response.status_code, 405);
    }

    #[test]
    fn rejects_malformed_and_missing_bodies() {
        for body in [json!("{not json"), Value::Null, json!(42)] {
            let response = route_event(json!({"httpMethod": "POST", "body": body}))
                .expect_err("bad body should fail");
            assert_eq!(response.status_code, 400);
        }
    }

    #[test]
    fn rejects_non_object_payload() {
        let response = route_event(json!(["GET"])).expect_err("array payload should fail");
        assert_eq!(response.status_code, 400);
    }

    #[test]
    fn serves_issue_then_submit_round_trip() {
        let store = MemoryObjectStore::new();
        store.seed_json(
            "meta/colors.json",
            &json!({"name": "colors", "choices": ["red", "blue"]}),
        );
        store.seed_json("q_cards/colors/q1.json", &json!({"name": "q1"}));
        store.seed_json("q_cards/colors/q2.json", &json!({"name": "q2"}));
        let repository = QSetRepository::new(&store);

        let listed = handle_event(json!({"httpMethod": "GET"}), &repository);
        assert_eq!(listed.body, r#"{"Sets":["colors"]}"#);

        let lookup = json!({
            "httpMethod": "GET",
            "pathParameters": {"qset": "colors", "userid": "u1"}
        });
        let issued = handle_event(lookup.clone(), &repository);
        let mut card: Value = serde_json::from_str(&issued.body).expect("card should be JSON");
        assert_eq!(card["qcard"]["name"], json!("q1"));

        card["answer"] = json!("red");
        let submitted = handle_event(
            json!({"httpMethod": "POST", "body": card.to_string()}),
            &repository,
        );
        assert_eq!(submitted.status_code, 200);
        assert_eq!(submitted.body, "OK");

        let next = handle_event(lookup, &repository);
        let card: Value = serde_json::from_str(&next.body).expect("card should be JSON");
        assert_eq!(card["qcard"]["name"], json!("q2"));
    }
}
