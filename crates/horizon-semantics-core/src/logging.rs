//! Tracing targets used throughout Horizon Semantics.
//!
//! Horizon Semantics uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. Filter by the targets below to follow a
//! single subsystem:
//!
//! ```text
//! RUST_LOG=horizon_semantics::registry=debug,horizon_semantics::dispatch=trace
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Action registry allocations and lookups.
    pub const REGISTRY: &str = "horizon_semantics::registry";
    /// Delegate installation decisions.
    pub const INSTALLER: &str = "horizon_semantics::installer";
    /// Native action invocations and event forwarding.
    pub const DISPATCH: &str = "horizon_semantics::dispatch";
    /// Snapshot population (role, states, hint, actions).
    pub const APPLY: &str = "horizon_semantics::apply";
}

