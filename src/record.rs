//! The [`ImportRecord`] value type and its clone contract.

use std::fmt;

/// A resolved import, as produced by a resolver and stored by the cache.
///
/// A record carries the as-written import specifier plus three optional
/// fields a resolver may or may not have produced: the resolved absolute
/// path, the source text, and the source map. Records are immutable once
/// constructed; the cache only ever stores and hands out its own copies.
///
/// # Clone Contract
///
/// [`Clone`] produces a deep, independently owned copy. Absent fields stay
/// absent - they are never coerced into empty strings, so a consumer can
/// always distinguish "the resolver produced no source" from "the resolver
/// produced empty source".
///
/// # Examples
///
/// ```rust
/// use importcache::ImportRecord;
///
/// let record = ImportRecord::new("colors.scss")
///     .with_resolved_path("/project/styles/colors.scss")
///     .with_source("$red: #ff0000;");
///
/// assert_eq!(record.specifier(), "colors.scss");
/// assert_eq!(record.source(), Some("$red: #ff0000;"));
/// assert_eq!(record.source_map(), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ImportRecord {
    specifier: String,
    resolved_path: Option<String>,
    source: Option<String>,
    source_map: Option<String>,
}

impl ImportRecord {
    /// Creates a record for `specifier` with all optional fields absent.
    #[must_use]
    pub fn new(specifier: impl Into<String>) -> Self {
        ImportRecord {
            specifier: specifier.into(),
            resolved_path: None,
            source: None,
            source_map: None,
        }
    }

    /// Sets the resolved absolute path.
    #[must_use]
    pub fn with_resolved_path(mut self, path: impl Into<String>) -> Self {
        self.resolved_path = Some(path.into());
        self
    }

    /// Sets the source text.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the source map.
    #[must_use]
    pub fn with_source_map(mut self, source_map: impl Into<String>) -> Self {
        self.source_map = Some(source_map.into());
        self
    }

    /// Returns the as-written import specifier.
    #[must_use]
    pub fn specifier(&self) -> &str {
        &self.specifier
    }

    /// Returns the resolved absolute path, if the resolver produced one.
    #[must_use]
    pub fn resolved_path(&self) -> Option<&str> {
        self.resolved_path.as_deref()
    }

    /// Returns the source text, if the resolver produced it.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the source map, if the resolver produced one.
    #[must_use]
    pub fn source_map(&self) -> Option<&str> {
        self.source_map.as_deref()
    }
}

impl fmt::Debug for ImportRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportRecord")
            .field("specifier", &self.specifier)
            .field("resolved_path", &self.resolved_path)
            .field("source", &self.source.as_ref().map(|s| s.len()))
            .field("source_map", &self.source_map.as_ref().map(|s| s.len()))
            .finish()
    }
}
