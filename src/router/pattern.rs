//! Path patterns.
//!
//! A pattern is a `/`-separated list of segments:
//!
//! | Segment | Matches | Binds |
//! |---|---|---|
//! | `users` | exactly `users` (case-sensitive) | |
//! | `{login}` | any non-empty segment | `login` |
//! | `{id:[0-9]+}` | a non-empty segment the whole of which matches the regex | `id` |
//! | `{*rest}` | zero or more trailing segments, last position only | `rest` |

use regex::Regex;

use crate::error::Error;

#[derive(Debug)]
enum Segment {
    Literal(String),
    Capture { name: String, constraint: Option<Regex> },
    CatchAll(String),
}

/// A compiled path pattern.
#[derive(Debug)]
pub(crate) struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub(crate) fn parse(raw: &str) -> Result<Self, Error> {
        let body = raw
            .strip_prefix('/')
            .ok_or_else(|| Error::route(raw, "pattern must start with `/`"))?;

        let parts: Vec<&str> = body.split('/').collect();
        let mut segments = Vec::with_capacity(parts.len());
        let mut names: Vec<&str> = Vec::new();

        for (i, part) in parts.iter().enumerate() {
            let Some(inner) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) else {
                if part.contains(['{', '}']) {
                    return Err(Error::route(raw, format!("captures must span a whole segment: `{part}`")));
                }
                segments.push(Segment::Literal((*part).to_owned()));
                continue;
            };

            let (name, segment) = if let Some(name) = inner.strip_prefix('*') {
                if i + 1 != parts.len() {
                    return Err(Error::route(raw, "catch-all must be the last segment"));
                }
                (name, Segment::CatchAll(name.to_owned()))
            } else {
                let (name, constraint) = match inner.split_once(':') {
                    Some((name, re)) => {
                        let re = Regex::new(&format!("^(?:{re})$"))
                            .map_err(|e| Error::route(raw, e.to_string()))?;
                        (name, Some(re))
                    }
                    None => (inner, None),
                };
                (name, Segment::Capture { name: name.to_owned(), constraint })
            };

            if name.is_empty() {
                return Err(Error::route(raw, "capture name must not be empty"));
            }
            if names.contains(&name) {
                return Err(Error::route(raw, format!("duplicate capture `{name}`")));
            }
            names.push(name);
            segments.push(segment);
        }

        Ok(Self { raw: raw.to_owned(), segments })
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches a full path, returning the bound captures.
    pub(crate) fn captures(&self, path: &str) -> Option<Vec<(String, String)>> {
        let parts: Vec<&str> = path.strip_prefix('/')?.split('/').collect();
        let mut bound = Vec::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::CatchAll(name) => {
                    bound.push((name.clone(), parts.get(i..).unwrap_or_default().join("/")));
                    return Some(bound);
                }
                Segment::Literal(lit) => {
                    if parts.get(i)? != lit {
                        return None;
                    }
                }
                Segment::Capture { name, constraint } => {
                    let value = *parts.get(i)?;
                    if value.is_empty() {
                        return None;
                    }
                    if let Some(re) = constraint {
                        if !re.is_match(value) {
                            return None;
                        }
                    }
                    bound.push((name.clone(), value.to_owned()));
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound(pattern: &str, path: &str) -> Option<Vec<(String, String)>> {
        Pattern::parse(pattern).unwrap().captures(path)
    }

    #[test]
    fn literals_are_exact_and_case_sensitive() {
        assert_eq!(bound("/users", "/users"), Some(vec![]));
        assert_eq!(bound("/users", "/Users"), None);
        assert_eq!(bound("/users", "/users/"), None);
        assert_eq!(bound("/", "/"), Some(vec![]));
        assert_eq!(bound("/", "/x"), None);
    }

    #[test]
    fn capture_binds_non_empty_segment() {
        assert_eq!(
            bound("/users/{login}", "/users/evg"),
            Some(vec![("login".to_owned(), "evg".to_owned())])
        );
        assert_eq!(bound("/users/{login}", "/users/"), None);
        assert_eq!(bound("/users/{login}", "/users/a/b"), None);
    }

    #[test]
    fn constraint_must_match_whole_segment() {
        assert!(bound("/users/{id:[0-9]+}", "/users/42").is_some());
        assert_eq!(bound("/users/{id:[0-9]+}", "/users/42a"), None);
        assert_eq!(bound("/users/{id:[0-9]+}", "/users/a42"), None);
    }

    #[test]
    fn catch_all_takes_the_rest() {
        assert_eq!(bound("/{*rest}", "/"), Some(vec![("rest".to_owned(), String::new())]));
        assert_eq!(
            bound("/files/{*rest}", "/files/a/b"),
            Some(vec![("rest".to_owned(), "a/b".to_owned())])
        );
        assert_eq!(
            bound("/files/{*rest}", "/files"),
            Some(vec![("rest".to_owned(), String::new())])
        );
    }

    #[test]
    fn rejects_malformed_patterns() {
        for raw in ["users", "/{}", "/{*rest}/x", "/{a}/{a}", "/u{id}", "/{id:[0-9}"] {
            assert!(
                matches!(Pattern::parse(raw), Err(Error::InvalidRoute { .. })),
                "`{raw}` should be rejected"
            );
        }
    }
}
