use axum::http::StatusCode;
use file_router::http::response::json;
use file_router::RouteDefinition;
use serde_json::json;

pub fn route() -> RouteDefinition {
    RouteDefinition::new().get(|req, _| async move {
        json(
            StatusCode::OK,
            &json!({
                "ok": true,
                "url": req.uri().to_string(),
            }),
        )
    })
}
