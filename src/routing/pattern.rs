//! Pathname templates and their compiled matchers.
//!
//! # Responsibilities
//! - Compile a template (`/thing/:id`) into an anchored regex
//! - Match request pathnames and extract named parameters
//! - Produce the normalized forms used for collision checks
//!
//! # Design Decisions
//! - A `:name` segment matches exactly one non-empty path segment
//! - Every other segment is literal, percent-encoded with the URL path set
//!   and then regex-escaped, so it compares against the encoded request path
//! - Trailing slash is significant: `/foo/` does not match `/foo`
//! - Parameter values are returned raw, not percent-decoded

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use thiserror::Error;

/// Bytes a URL path segment carries percent-encoded; non-ASCII is always encoded.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Placeholder substituted for parameter segments when normalizing.
pub const PARAM_PLACEHOLDER: &str = ":param";

/// Errors raised while compiling a template.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A `:` segment whose name is empty or not an identifier.
    #[error("invalid parameter segment `{0}`")]
    InvalidParameter(String),

    /// The same parameter name used twice in one template.
    #[error("parameter `{0}` appears more than once")]
    DuplicateParameter(String),

    #[error("pattern failed to compile: {0}")]
    Regex(#[from] regex::Error),
}

/// Named bindings extracted from a matched pathname.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    pathname: String,
    params: Vec<(String, String)>,
}

impl MatchResult {
    /// The pathname that was matched.
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Value bound to the parameter `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Bindings in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A compiled pathname template.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    regex: Regex,
    params: Vec<String>,
}

impl RoutePattern {
    /// Compile a template.
    pub fn compile(raw: impl Into<String>) -> Result<Self, PatternError> {
        let raw = raw.into();
        let mut params: Vec<String> = Vec::new();
        let mut expr = String::with_capacity(raw.len() + 8);
        expr.push('^');

        for (i, segment) in raw.split('/').enumerate() {
            if i > 0 {
                expr.push('/');
            }
            match parameter_name(segment)? {
                Some(name) => {
                    if params.iter().any(|p| p == name) {
                        return Err(PatternError::DuplicateParameter(name.to_string()));
                    }
                    expr.push_str(&format!("(?P<{name}>[^/]+)"));
                    params.push(name.to_string());
                }
                None => {
                    let encoded = utf8_percent_encode(segment, PATH_SEGMENT).to_string();
                    expr.push_str(&regex::escape(&encoded));
                }
            }
        }
        expr.push('$');

        Ok(Self {
            regex: Regex::new(&expr)?,
            raw,
            params,
        })
    }

    /// The template as derived from the file path.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parameter names in template order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn is_match(&self, pathname: &str) -> bool {
        self.regex.is_match(pathname)
    }

    /// Match a pathname, returning its bindings.
    pub fn match_path(&self, pathname: &str) -> Option<MatchResult> {
        let captures = self.regex.captures(pathname)?;
        let params = self
            .params
            .iter()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|m| (name.clone(), m.as_str().to_string()))
            })
            .collect();

        Some(MatchResult {
            pathname: pathname.to_string(),
            params,
        })
    }

    /// The template with every parameter segment replaced by
    /// [`PARAM_PLACEHOLDER`]. Two routes that differ only in parameter
    /// names normalize to the same string.
    pub fn normalized(&self) -> String {
        self.raw
            .split('/')
            .map(|segment| if is_parameter(segment) { PARAM_PLACEHOLDER } else { segment })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The raw template with exactly one trailing `/` removed.
    pub fn without_trailing_slash(&self) -> &str {
        self.raw.strip_suffix('/').unwrap_or(&self.raw)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn is_parameter(segment: &str) -> bool {
    segment.starts_with(':')
}

fn parameter_name(segment: &str) -> Result<Option<&str>, PatternError> {
    let Some(name) = segment.strip_prefix(':') else {
        return Ok(None);
    };

    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(Some(name))
    } else {
        Err(PatternError::InvalidParameter(segment.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let p = RoutePattern::compile("/todo/").unwrap();
        assert!(p.is_match("/todo/"));
        assert!(!p.is_match("/todo"));
        assert!(!p.is_match("/todo/x"));
        assert!(p.params().is_empty());
    }

    #[test]
    fn test_root_matches_only_root() {
        let p = RoutePattern::compile("/").unwrap();
        assert!(p.is_match("/"));
        assert!(!p.is_match("/missing"));
    }

    #[test]
    fn test_parameter_extraction() {
        let p = RoutePattern::compile("/users/:user_id/posts/:post").unwrap();
        let m = p.match_path("/users/7/posts/hello-world").unwrap();

        assert_eq!(m.pathname(), "/users/7/posts/hello-world");
        assert_eq!(m.get("user_id"), Some("7"));
        assert_eq!(m.get("post"), Some("hello-world"));
        assert_eq!(m.get("other"), None);
        assert_eq!(
            m.iter().collect::<Vec<_>>(),
            vec![("user_id", "7"), ("post", "hello-world")]
        );
    }

    #[test]
    fn test_parameter_spans_one_segment() {
        let p = RoutePattern::compile("/thing/:id").unwrap();
        assert!(p.is_match("/thing/42"));
        assert!(!p.is_match("/thing/"));
        assert!(!p.is_match("/thing/42/extra"));
    }

    #[test]
    fn test_literal_segments_are_escaped() {
        let p = RoutePattern::compile("/v1.0/a+b").unwrap();
        assert!(p.is_match("/v1.0/a+b"));
        assert!(!p.is_match("/v1x0/aab"));
    }

    #[test]
    fn test_literal_segments_match_encoded_paths() {
        let p = RoutePattern::compile("/seitsemän").unwrap();
        assert!(p.is_match("/seitsem%C3%A4n"));
        assert_eq!(p.as_str(), "/seitsemän");

        let p = RoutePattern::compile("/a b/:id").unwrap();
        let m = p.match_path("/a%20b/x%20y").unwrap();
        assert_eq!(m.get("id"), Some("x%20y"));
        assert!(!p.is_match("/a b/x"));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            RoutePattern::compile("/a/:"),
            Err(PatternError::InvalidParameter(s)) if s == ":"
        ));
        assert!(matches!(
            RoutePattern::compile("/a/:1st"),
            Err(PatternError::InvalidParameter(_))
        ));
        assert!(matches!(
            RoutePattern::compile("/a/:id/:id"),
            Err(PatternError::DuplicateParameter(name)) if name == "id"
        ));
    }

    #[test]
    fn test_normalization_ignores_parameter_names() {
        let a = RoutePattern::compile("/users/:id").unwrap();
        let b = RoutePattern::compile("/users/:userId").unwrap();
        let c = RoutePattern::compile("/users/me").unwrap();

        assert_eq!(a.normalized(), "/users/:param");
        assert_eq!(a.normalized(), b.normalized());
        assert_ne!(a.normalized(), c.normalized());
    }

    #[test]
    fn test_trailing_slash_strip_removes_one() {
        assert_eq!(RoutePattern::compile("/foo/").unwrap().without_trailing_slash(), "/foo");
        assert_eq!(RoutePattern::compile("/foo").unwrap().without_trailing_slash(), "/foo");
        assert_eq!(RoutePattern::compile("/").unwrap().without_trailing_slash(), "");
    }
}
