//! Instrumentation component identifiers for storage operations.

/// Component identifiers for tracing spans in storage operations.
pub(crate) mod components {
    /// BlockCacheDatabase operations.
    pub(crate) const STORAGE_BLOCK_CACHE: &str = "storage:block_cache";
}
