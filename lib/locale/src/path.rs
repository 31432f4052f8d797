//! Request path grammar.

use crate::code::LocaleCode;

/// A request path split into segments.
///
/// The leading slash is dropped and one trailing slash is remembered and
/// dropped, so `/` has no segments and `/en/` has the single segment `en`.
/// Interior empty segments are kept: `//en` is `["", "en"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath<'a> {
    raw: &'a str,
    segments: Vec<&'a str>,
    trailing_slash: bool,
}

impl<'a> RequestPath<'a> {
    /// Splits a URI path into segments. Never fails.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        let body = raw.strip_prefix('/').unwrap_or(raw);
        let (body, trailing_slash) = match body.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (body, false),
        };
        let segments = if body.is_empty() {
            Vec::new()
        } else {
            body.split('/').collect()
        };

        Self {
            raw,
            segments,
            trailing_slash,
        }
    }

    /// Returns the path exactly as received.
    #[must_use]
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Returns the first segment, if any.
    #[must_use]
    pub fn first_segment(&self) -> Option<&'a str> {
        self.segments.first().copied()
    }

    /// Returns the first segment if it matches the locale pattern.
    ///
    /// Membership in the supported set is not checked here.
    #[must_use]
    pub fn locale_prefix(&self) -> Option<LocaleCode> {
        self.first_segment().and_then(LocaleCode::parse)
    }

    /// Returns true if the path is a locale root: exactly one segment that
    /// matches the locale pattern.
    #[must_use]
    pub fn is_locale_root(&self) -> bool {
        self.segments.len() == 1 && self.locale_prefix().is_some()
    }

    /// Returns true if the path bypasses the gate: its first segment is one
    /// of `excluded_prefixes`, or any segment contains a `.`.
    #[must_use]
    pub fn is_excluded<S: AsRef<str>>(&self, excluded_prefixes: &[S]) -> bool {
        let prefixed = self
            .first_segment()
            .is_some_and(|first| excluded_prefixes.iter().any(|p| p.as_ref() == first));

        prefixed || self.segments.iter().any(|segment| segment.contains('.'))
    }

    /// Renders the segments after the first one as an absolute path,
    /// keeping the trailing slash. `/ja/projects/42` gives `/projects/42`
    /// and `/ja` gives `/`.
    #[must_use]
    pub fn without_first_segment(&self) -> String {
        let rest = self.segments.get(1..).unwrap_or_default();
        if rest.is_empty() {
            return "/".to_string();
        }
        let mut path = format!("/{}", rest.join("/"));
        if self.trailing_slash {
            path.push('/');
        }
        path
    }
}
