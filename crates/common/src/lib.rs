//! Ambient pieces shared by the binaries.

pub mod logging;
