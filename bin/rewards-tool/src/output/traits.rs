//! Traits for output formatting

/// Trait for objects that can be formatted for porcelain output
pub(crate) trait Formattable {
    /// Format for machine-readable output, one `key: value` pair per line
    fn format_porcelain(&self) -> String;
}
