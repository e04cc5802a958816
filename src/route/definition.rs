//! Route definitions: per-verb handler records.
//!
//! # Responsibilities
//! - Define the closed set of HTTP verbs a route can serve
//! - Define the async handler signature
//! - Bundle optional handlers into an immutable record
//!
//! # Design Decisions
//! - One `Option<RouteHandler>` per verb; an absent verb is `None`
//! - Handlers are `Arc`ed so definitions clone cheaply into every table rebuild
//! - Method lookup is case-normalized (`get` resolves like `GET`)

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use futures_util::future::BoxFuture;

use crate::routing::pattern::MatchResult;

/// Request type handed to route handlers.
pub type Request = axum::http::Request<Body>;

/// Response type produced by route handlers.
pub type Response = axum::response::Response;

/// HTTP verbs a route definition can bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl Method {
    /// All supported verbs, in declaration order.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Options,
        Method::Head,
    ];

    /// Parse a request method name, ignoring ASCII case.
    /// Returns `None` for verbs outside the supported set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "PATCH" => Some(Method::Patch),
            "DELETE" => Some(Method::Delete),
            "OPTIONS" => Some(Method::Options),
            "HEAD" => Some(Method::Head),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type HandlerFn = dyn Fn(Request, MatchResult) -> BoxFuture<'static, Response> + Send + Sync;

/// A shared async function serving one verb of a route.
#[derive(Clone)]
pub struct RouteHandler(Arc<HandlerFn>);

impl RouteHandler {
    /// Wrap an async function or closure.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, MatchResult) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: Arc<HandlerFn> =
            Arc::new(move |req, matched| -> BoxFuture<'static, Response> { Box::pin(f(req, matched)) });
        Self(handler)
    }

    /// Invoke the handler and wait for its response.
    pub async fn call(&self, req: Request, matched: MatchResult) -> Response {
        (self.0)(req, matched).await
    }
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RouteHandler")
    }
}

/// Immutable bundle of optional per-verb handlers.
///
/// Built with the consuming methods below:
///
/// ```
/// use file_router::route::RouteDefinition;
/// use file_router::http::response::status_only;
/// use axum::http::StatusCode;
///
/// let route = RouteDefinition::new()
///     .get(|_req, _matched| async { status_only(StatusCode::OK) });
/// assert!(route.has_handlers());
/// ```
#[derive(Clone, Default)]
pub struct RouteDefinition {
    get: Option<RouteHandler>,
    post: Option<RouteHandler>,
    put: Option<RouteHandler>,
    patch: Option<RouteHandler>,
    delete: Option<RouteHandler>,
    options: Option<RouteHandler>,
    head: Option<RouteHandler>,
}

macro_rules! verb_setter {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        pub fn $name<F, Fut>(mut self, f: F) -> Self
        where
            F: Fn(Request, MatchResult) -> Fut + Send + Sync + 'static,
            Fut: Future<Output = Response> + Send + 'static,
        {
            self.$name = Some(RouteHandler::new(f));
            self
        }
    };
}

impl RouteDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    verb_setter!(get, "Bind the GET handler.");
    verb_setter!(post, "Bind the POST handler.");
    verb_setter!(put, "Bind the PUT handler.");
    verb_setter!(patch, "Bind the PATCH handler.");
    verb_setter!(delete, "Bind the DELETE handler.");
    verb_setter!(options, "Bind the OPTIONS handler.");
    verb_setter!(head, "Bind the HEAD handler.");

    /// Bind an already-built handler to a verb.
    pub fn with_handler(mut self, method: Method, handler: RouteHandler) -> Self {
        *self.slot_mut(method) = Some(handler);
        self
    }

    /// The handler bound to `method`, if any.
    pub fn handler(&self, method: Method) -> Option<&RouteHandler> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Patch => self.patch.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Options => self.options.as_ref(),
            Method::Head => self.head.as_ref(),
        }
    }

    /// Verbs with a bound handler.
    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        Method::ALL.into_iter().filter(|m| self.handler(*m).is_some())
    }

    pub fn has_handlers(&self) -> bool {
        self.methods().next().is_some()
    }

    fn slot_mut(&mut self, method: Method) -> &mut Option<RouteHandler> {
        match method {
            Method::Get => &mut self.get,
            Method::Post => &mut self.post,
            Method::Put => &mut self.put,
            Method::Patch => &mut self.patch,
            Method::Delete => &mut self.delete,
            Method::Options => &mut self.options,
            Method::Head => &mut self.head,
        }
    }
}

impl fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("methods", &self.methods().collect::<Vec<_>>())
            .finish()
    }
}
