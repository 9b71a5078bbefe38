//! Per-element semantic metadata supplied by the rendering layer.
//!
//! The inbound shape is:
//!
//! ```json
//! {
//!   "role": "link",
//!   "hint": "opens in browser",
//!   "states": ["selected"],
//!   "actions": [{ "name": "activate" }, { "name": "bookmark", "label": "Bookmark this" }]
//! }
//! ```
//!
//! Every field is optional. Metadata is read once when the delegate is
//! installed, except `states`, which may change afterwards and is re-read on
//! every snapshot.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A named custom action offered by an element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Action name, required. Forwarded verbatim when the action fires.
    #[serde(default)]
    pub name: String,
    /// Human-readable label; absent means the platform default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ActionDescriptor {
    /// An unlabelled action.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }

    /// A labelled action.
    pub fn labeled(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: Some(label.into()),
        }
    }
}

/// Semantic metadata attached to one element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementMetadata {
    /// Role name, parsed case-insensitively at installation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Free-text hint appended to the content description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Ordered state tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    /// Ordered custom actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionDescriptor>>,
}

impl ElementMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse metadata from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the role name.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the hint.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Set the state tokens.
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = Some(states.into_iter().map(Into::into).collect());
        self
    }

    /// Append a custom action.
    pub fn action(mut self, action: ActionDescriptor) -> Self {
        self.actions.get_or_insert_with(Vec::new).push(action);
        self
    }

    /// Whether no field is present.
    ///
    /// Elements without metadata are left alone by the installer.
    pub fn is_empty(&self) -> bool {
        self.role.is_none()
            && self.hint.is_none()
            && self.states.is_none()
            && self.actions.is_none()
    }
}
