//! Logging facilities for Roster.
//!
//! Roster uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("roster::selection=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "roster_core::signal";
    /// Observable list target.
    pub const LIST_MODEL: &str = "roster::list_model";
    /// Selection model target.
    pub const SELECTION: &str = "roster::selection";
}
