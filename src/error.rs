use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can
/// potentially return.
///
/// The cache itself has no recoverable error path: an invalid insert is silently
/// absorbed as a no-op, a miss is a normal [`None`], and a failure of the locking
/// primitive aborts the process (see [`crate::cache`]). The variants here can only
/// surface from the resolution glue in [`crate::bridge`].
#[derive(Error, Debug)]
pub enum Error {
    /// The bridge was invoked for a specifier and produced no result.
    ///
    /// A cache miss followed by an empty bridge result list means the import
    /// cannot be satisfied. The associated value is the specifier that failed
    /// to resolve.
    #[error("Import unreachable or not found - {0}")]
    ImportNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_not_found_display() {
        let err = Error::ImportNotFound("missing.scss".to_string());
        assert_eq!(
            err.to_string(),
            "Import unreachable or not found - missing.scss"
        );
    }
}
