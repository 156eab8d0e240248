//! Output formatting for command results.

pub(crate) mod cache;
pub(crate) mod helpers;
pub(crate) mod sync;
pub(crate) mod traits;

pub(crate) use helpers::output;
