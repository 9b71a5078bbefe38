//! Core vocabulary for Horizon Semantics.
//!
//! This crate holds the parts of the accessibility bridge that have no
//! platform or UI dependencies:
//!
//! - **Role taxonomy**: the closed set of semantic [`Role`]s, their producer
//!   names and the native class each one maps to
//! - **Action registry**: the [`ActionRegistry`] binding action names to
//!   numeric [`ActionId`]s, with fixed IDs for well-known native actions
//!
//! # Example
//!
//! ```
//! use horizon_semantics_core::{ActionId, ActionRegistry, Role};
//!
//! let role: Role = "Header".parse()?;
//! assert_eq!(role, Role::Header);
//! assert_eq!(role.native_class(), "android.view.View");
//!
//! let registry = ActionRegistry::new();
//! assert_eq!(registry.resolve_id("increment")?, ActionId::SCROLL_FORWARD);
//! # Ok::<(), horizon_semantics_core::Error>(())
//! ```

pub mod action;
mod error;
pub mod logging;
pub mod role;

pub use action::{
    ActionId, ActionRegistry, RESERVED_ACTIONS, SharedActionRegistry, global_action_registry,
    reserved_action_id,
};
pub use error::{Error, Result};
pub use role::{Role, native_class};
