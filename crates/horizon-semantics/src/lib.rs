//! Accessibility semantics bridge for Horizon.
//!
//! This crate translates the semantics a rendering layer attaches to an
//! element (role, hint, state tokens, custom actions) into the snapshot a
//! native accessibility service expects, and relays native custom-action
//! invocations back to the owning application as named events.
//!
//! # Architecture
//!
//! - [`ElementMetadata`]: typed per-element metadata from the rendering layer
//! - [`apply_role`] / [`apply_states`]: stateless snapshot population
//! - [`ActionRegistry`]: shared table of action names and numeric IDs
//! - [`DelegateInstaller`]: installs a [`SemanticsDelegate`] on elements that
//!   carry metadata and have no delegate yet
//! - [`AccessibilityDelegate`]: the two callbacks a platform adapter invokes,
//!   snapshot population and action handling
//! - [`EventEmitter`]: the outbound channel for `performAction` events
//! - [`ElementTree`]: an in-memory platform adapter
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_semantics::{
//!     ActionDescriptor, ActionRegistry, ChannelEmitter, DelegateInstaller, ElementMetadata,
//!     ElementTree, Locale,
//! };
//!
//! let (emitter, events) = ChannelEmitter::unbounded();
//! let installer = DelegateInstaller::new(Arc::new(ActionRegistry::new()), Arc::new(emitter))
//!     .with_locale(Locale::parse("en-US"));
//!
//! let mut tree = ElementTree::new();
//! let article = tree.insert_with_description("Release notes");
//! tree.set_metadata(
//!     article,
//!     ElementMetadata::new().action(ActionDescriptor::labeled("bookmark", "Bookmark this")),
//! );
//! tree.install(article, &installer)?;
//!
//! let snapshot = tree.snapshot(article).unwrap();
//! let bookmark = snapshot.actions()[0].id;
//!
//! assert!(tree.perform_action(article, bookmark));
//! assert_eq!(events.try_recv().unwrap().action_name(), "bookmark");
//! # Ok::<(), horizon_semantics::Error>(())
//! ```

#[cfg(feature = "accesskit")]
pub mod accesskit_node;
mod apply;
mod config;
pub mod delegate;
mod element;
mod error;
pub mod event;
pub mod host;
pub mod locale;
pub mod metadata;
pub mod snapshot;
pub mod state;

pub use horizon_semantics_core::{
    ActionId, ActionRegistry, Role, SharedActionRegistry, action, global_action_registry, logging,
    native_class, role,
};

pub use apply::apply_role;
pub use config::SemanticsConfig;
pub use delegate::{
    AccessibilityDelegate, DelegateHost, DelegateInstaller, InstallOutcome, SemanticsDelegate,
};
pub use element::ElementId;
pub use error::{Error, Result};
pub use event::{AccessibilityEvent, ChannelEmitter, EventEmitter, EventType};
pub use host::{Element, ElementTree};
pub use locale::{EnglishRoleDescriptions, Locale, RoleDescriptions};
pub use metadata::{ActionDescriptor, ElementMetadata};
pub use snapshot::{CollectionItemInfo, NativeAction, NodeSnapshot, SpannedText};
pub use state::apply_states;
