//! The native accessibility snapshot populated for an element.
//!
//! A [`NodeSnapshot`] mirrors the node-info object a platform accessibility
//! service requests from a view. The platform adapter creates a fresh
//! snapshot for every query, lets the installed delegate populate it, and
//! hands the result to the native tree.

use std::ops::Range;

use horizon_semantics_core::ActionId;

/// Styling attached to a range of [`SpannedText`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpanStyle {
    /// Announce the range as a hyperlink.
    Link,
}

/// A styled range within a [`SpannedText`], in byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    /// Byte range covered by the span.
    pub range: Range<usize>,
    /// The style applied to the range.
    pub style: SpanStyle,
}

/// Text annotated with styled spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpannedText {
    text: String,
    spans: Vec<TextSpan>,
}

impl SpannedText {
    /// Plain text without spans.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Text wrapped entirely in a single link span.
    pub fn link(text: impl Into<String>) -> Self {
        let text = text.into();
        let range = 0..text.len();
        Self {
            text,
            spans: vec![TextSpan {
                range,
                style: SpanStyle::Link,
            }],
        }
    }

    /// The underlying text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The spans, in insertion order.
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    /// Whether the whole text is covered by a link span.
    pub fn is_link(&self) -> bool {
        self.spans
            .iter()
            .any(|span| span.style == SpanStyle::Link && span.range == (0..self.text.len()))
    }
}

/// Position of an element inside a collection.
///
/// Screen readers use the heading flag for heading-based navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionItemInfo {
    /// Row index within the collection.
    pub row_index: usize,
    /// Number of rows spanned.
    pub row_span: usize,
    /// Column index within the collection.
    pub column_index: usize,
    /// Number of columns spanned.
    pub column_span: usize,
    /// Whether the item is a heading.
    pub heading: bool,
}

impl CollectionItemInfo {
    /// A single-cell heading item: row 0 of 1, column 0 of 1.
    pub const fn single_heading() -> Self {
        Self {
            row_index: 0,
            row_span: 1,
            column_index: 0,
            column_span: 1,
            heading: true,
        }
    }
}

/// An action exposed to assistive technology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeAction {
    /// Numeric action ID.
    pub id: ActionId,
    /// Human-readable label; `None` lets the platform use its default.
    pub label: Option<String>,
}

/// The accessibility information exposed for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSnapshot {
    /// Native class name used to pick an interaction model.
    pub class_name: Option<String>,
    /// Content description announced for the element.
    pub content_description: Option<String>,
    /// Text payload, possibly span-annotated.
    pub text: Option<SpannedText>,
    /// Localized description of the role.
    pub role_description: Option<String>,
    /// Selected state.
    pub selected: bool,
    /// Enabled state.
    pub enabled: bool,
    /// Whether the element can be checked.
    pub checkable: bool,
    /// Checked state; meaningful only when checkable.
    pub checked: bool,
    /// Whether activating the element opens a popup.
    pub can_open_popup: bool,
    /// Whether the element responds to clicks.
    pub clickable: bool,
    /// Whether the element is busy updating its content.
    pub busy: bool,
    /// Expanded state for expandable elements.
    pub expanded: Option<bool>,
    /// Collection membership.
    pub collection_item: Option<CollectionItemInfo>,
    actions: Vec<NativeAction>,
}

impl Default for NodeSnapshot {
    fn default() -> Self {
        Self {
            class_name: None,
            content_description: None,
            text: None,
            role_description: None,
            selected: false,
            enabled: true,
            checkable: false,
            checked: false,
            can_open_popup: false,
            clickable: false,
            busy: false,
            expanded: None,
            collection_item: None,
            actions: Vec::new(),
        }
    }
}

impl NodeSnapshot {
    /// Create an empty, enabled snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a snapshot that already carries a content description.
    pub fn with_content_description(description: impl Into<String>) -> Self {
        Self {
            content_description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Register an action.
    ///
    /// An action with the same ID replaces the earlier entry in place, so
    /// repeated population leaves a single entry per ID.
    pub fn add_action(&mut self, action: NativeAction) {
        match self.actions.iter_mut().find(|a| a.id == action.id) {
            Some(existing) => *existing = action,
            None => self.actions.push(action),
        }
    }

    /// Registered actions, in registration order.
    pub fn actions(&self) -> &[NativeAction] {
        &self.actions
    }

    /// Look up a registered action by ID.
    pub fn action(&self, id: ActionId) -> Option<&NativeAction> {
        self.actions.iter().find(|a| a.id == id)
    }
}
