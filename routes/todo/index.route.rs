use axum::http::StatusCode;
use file_router::http::response::json;
use file_router::RouteDefinition;
use serde_json::json;

pub fn route() -> RouteDefinition {
    RouteDefinition::new()
        .get(|_, _| async {
            json(StatusCode::OK, &json!({ "todos": [] }))
        })
        .post(|_, _| async {
            json(StatusCode::CREATED, &json!({ "created": true }))
        })
}
