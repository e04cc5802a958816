//! Collision checks over an assembled route table.
//!
//! # Checks
//! - Duplicate (fatal): patterns equal after parameter normalization
//! - Ambiguous (warning): patterns equal after stripping one trailing `/`
//!
//! Both run once over all pairs, after the whole table is assembled.

use std::collections::HashMap;
use std::fmt;

use crate::routing::error::RouteError;
use crate::routing::table::RouteTableEntry;

/// Two routes that differ only by a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousRoute {
    pub first: String,
    pub second: String,
}

impl fmt::Display for AmbiguousRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "routes `{}` and `{}` differ only by a trailing slash",
            self.first, self.second
        )
    }
}

/// Fail if two entries normalize to the same pattern.
///
/// Groups are visited in order of first occurrence; the error names the first
/// and last entries of the first colliding group.
pub fn check_duplicates(entries: &[RouteTableEntry]) -> Result<(), RouteError> {
    let mut groups: Vec<(usize, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, entry) in entries.iter().enumerate() {
        let key = entry.pattern().normalized();
        match index.get(&key) {
            Some(&g) => groups[g].1 = i,
            None => {
                index.insert(key, groups.len());
                groups.push((i, i));
            }
        }
    }

    match groups.into_iter().find(|(first, last)| first != last) {
        Some((first, last)) => {
            let (first, last) = (&entries[first], &entries[last]);
            Err(RouteError::DuplicateRoute {
                first: first.pattern().to_string(),
                first_file: first.source().to_string(),
                last: last.pattern().to_string(),
                last_file: last.source().to_string(),
            })
        }
        None => Ok(()),
    }
}

/// Every pair of entries whose raw patterns match once a single trailing `/`
/// is stripped.
pub fn find_ambiguous(entries: &[RouteTableEntry]) -> Vec<AmbiguousRoute> {
    let mut found = Vec::new();

    for (i, a) in entries.iter().enumerate() {
        for b in &entries[i + 1..] {
            if a.pattern().without_trailing_slash() == b.pattern().without_trailing_slash() {
                found.push(AmbiguousRoute {
                    first: a.pattern().to_string(),
                    second: b.pattern().to_string(),
                });
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteDefinition;
    use crate::routing::pattern::RoutePattern;

    fn entries(patterns: &[&str]) -> Vec<RouteTableEntry> {
        patterns
            .iter()
            .enumerate()
            .map(|(i, p)| {
                RouteTableEntry::new(
                    RoutePattern::compile(*p).unwrap(),
                    RouteDefinition::new(),
                    format!("file{i}.route.rs"),
                )
            })
            .collect()
    }

    #[test]
    fn test_distinct_routes_pass() {
        assert!(check_duplicates(&entries(&["/", "/a", "/b", "/a/:id", "/a/me"])).is_ok());
    }

    #[test]
    fn test_identical_routes_collide() {
        let err = check_duplicates(&entries(&["/", "/a", "/"])).unwrap_err();
        match err {
            RouteError::DuplicateRoute { first, first_file, last, last_file } => {
                assert_eq!(first, "/");
                assert_eq!(last, "/");
                assert_eq!(first_file, "file0.route.rs");
                assert_eq!(last_file, "file2.route.rs");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parameter_names_are_ignored() {
        let err = check_duplicates(&entries(&["/users/:id", "/users/:userId"])).unwrap_err();
        assert!(matches!(
            err,
            RouteError::DuplicateRoute { ref first, ref last, .. }
                if first == "/users/:id" && last == "/users/:userId"
        ));
    }

    #[test]
    fn test_reports_first_and_last_of_group() {
        let err = check_duplicates(&entries(&["/x/:a", "/y", "/x/:b", "/x/:c"])).unwrap_err();
        assert!(matches!(
            err,
            RouteError::DuplicateRoute { ref first, ref last, .. }
                if first == "/x/:a" && last == "/x/:c"
        ));
    }

    #[test]
    fn test_reports_earliest_group() {
        let err = check_duplicates(&entries(&["/b", "/a", "/a", "/b"])).unwrap_err();
        assert!(matches!(
            err,
            RouteError::DuplicateRoute { ref first, .. } if first == "/b"
        ));
    }

    #[test]
    fn test_trailing_slash_pairs_are_ambiguous() {
        let found = find_ambiguous(&entries(&["/todo/", "/other", "/todo"]));
        assert_eq!(
            found,
            vec![AmbiguousRoute { first: "/todo/".into(), second: "/todo".into() }]
        );
    }

    #[test]
    fn test_root_and_empty_are_not_confused_with_others() {
        assert!(find_ambiguous(&entries(&["/", "/a/", "/b"])).is_empty());
    }
}
