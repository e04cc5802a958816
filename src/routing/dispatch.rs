//! Request dispatch against a route table.
//!
//! # Outcomes
//! - `NotFound`: no pattern matches the pathname → 404 `{}`
//! - `MethodNotAllowed`: the first match has no handler for the verb → 405 `{}`
//! - `Matched`: the handler's response is returned untouched
//!
//! # Design Decisions
//! - First match in table order wins; a verb mismatch never falls through
//!   to a later entry
//! - The only suspension point is awaiting the handler
//! - No timeout and no error translation around the handler

use axum::http::StatusCode;

use crate::http::response::status_only;
use crate::route::{Method, Request, Response, RouteHandler};
use crate::routing::pattern::MatchResult;
use crate::routing::table::RouteTable;

/// Result of resolving a request against a table.
#[derive(Debug)]
pub enum Resolution<'a> {
    NotFound,
    MethodNotAllowed {
        pattern: &'a str,
    },
    Matched {
        pattern: &'a str,
        handler: &'a RouteHandler,
        matched: MatchResult,
    },
}

/// Resolve a method and pathname without invoking anything.
pub fn resolve<'a>(method: &str, pathname: &str, table: &'a RouteTable) -> Resolution<'a> {
    let Some((entry, matched)) = table.find(pathname) else {
        return Resolution::NotFound;
    };

    let pattern = entry.pattern().as_str();
    match Method::from_name(method).and_then(|m| entry.definition().handler(m)) {
        Some(handler) => Resolution::Matched {
            pattern,
            handler,
            matched,
        },
        None => Resolution::MethodNotAllowed { pattern },
    }
}

/// Route a request and produce its response.
pub async fn dispatch(request: Request, table: &RouteTable) -> Response {
    let resolution = resolve(request.method().as_str(), request.uri().path(), table);

    match resolution {
        Resolution::Matched {
            pattern,
            handler,
            matched,
        } => {
            tracing::trace!(pattern = %pattern, params = ?matched, "Route matched");
            handler.call(request, matched).await
        }
        Resolution::MethodNotAllowed { pattern } => {
            tracing::debug!(
                method = %request.method(),
                pattern = %pattern,
                "Method not allowed"
            );
            status_only(StatusCode::METHOD_NOT_ALLOWED)
        }
        Resolution::NotFound => {
            tracing::debug!(path = %request.uri().path(), "No route matched");
            status_only(StatusCode::NOT_FOUND)
        }
    }
}
