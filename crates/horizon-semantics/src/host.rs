//! In-memory platform adapter.
//!
//! [`ElementTree`] plays the role of the native view hierarchy: it owns a
//! delegate slot per element, builds a fresh [`NodeSnapshot`] for every
//! accessibility query and routes action invocations through the installed
//! delegate before falling back to the element's own actions. Platform
//! backends follow the same call sequence against their native objects.

use std::sync::Arc;

use horizon_semantics_core::ActionId;
use slotmap::SlotMap;

use crate::delegate::{AccessibilityDelegate, DelegateHost, DelegateInstaller, InstallOutcome};
use crate::element::ElementId;
use crate::error::Result;
use crate::metadata::ElementMetadata;
use crate::snapshot::NodeSnapshot;

/// A single element in an [`ElementTree`].
#[derive(Default)]
pub struct Element {
    id: ElementId,
    content_description: Option<String>,
    metadata: ElementMetadata,
    native_actions: Vec<ActionId>,
    delegate: Option<Arc<dyn AccessibilityDelegate>>,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("content_description", &self.content_description)
            .field("metadata", &self.metadata)
            .field("native_actions", &self.native_actions)
            .field("has_delegate", &self.delegate.is_some())
            .finish()
    }
}

impl Element {
    /// The element's metadata as currently attached.
    pub fn metadata(&self) -> &ElementMetadata {
        &self.metadata
    }

    /// The installed delegate, if any.
    pub fn delegate(&self) -> Option<&Arc<dyn AccessibilityDelegate>> {
        self.delegate.as_ref()
    }

    /// The content description the element exposes before any delegate runs.
    pub fn content_description(&self) -> Option<&str> {
        self.content_description.as_deref()
    }
}

impl DelegateHost for Element {
    fn element_id(&self) -> ElementId {
        self.id
    }

    fn has_accessibility_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    fn set_accessibility_delegate(&mut self, delegate: Arc<dyn AccessibilityDelegate>) {
        self.delegate = Some(delegate);
    }
}

/// A flat collection of elements addressed by [`ElementId`].
#[derive(Debug, Default)]
pub struct ElementTree {
    elements: SlotMap<ElementId, Element>,
}

impl ElementTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element with no content description.
    pub fn insert(&mut self) -> ElementId {
        self.elements.insert_with_key(|id| Element {
            id,
            ..Element::default()
        })
    }

    /// Add an element that exposes `description` as its content description.
    pub fn insert_with_description(&mut self, description: impl Into<String>) -> ElementId {
        let description = description.into();
        self.elements.insert_with_key(|id| Element {
            id,
            content_description: Some(description),
            ..Element::default()
        })
    }

    /// Remove an element and its delegate.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(id)
    }

    /// Look up an element.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Look up an element mutably.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Attach metadata to an element, replacing what was there.
    ///
    /// Returns `false` if the element does not exist.
    pub fn set_metadata(&mut self, id: ElementId, metadata: ElementMetadata) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.metadata = metadata;
                true
            }
            None => false,
        }
    }

    /// Replace an element's state tokens.
    ///
    /// Installed delegates see the new states on the next snapshot.
    pub fn set_states<I, S>(&mut self, id: ElementId, states: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.metadata.states = Some(states.into_iter().map(Into::into).collect());
                true
            }
            None => false,
        }
    }

    /// Declare an action the element handles natively, without a delegate.
    pub fn add_native_action(&mut self, id: ElementId, action: ActionId) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                if !element.native_actions.contains(&action) {
                    element.native_actions.push(action);
                }
                true
            }
            None => false,
        }
    }

    /// Install a delegate on someone else's behalf.
    pub fn set_delegate(
        &mut self,
        id: ElementId,
        delegate: Arc<dyn AccessibilityDelegate>,
    ) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.set_accessibility_delegate(delegate);
                true
            }
            None => false,
        }
    }

    /// Run `installer` against an element and its attached metadata.
    ///
    /// A missing element is treated as one without metadata.
    pub fn install(
        &mut self,
        id: ElementId,
        installer: &DelegateInstaller,
    ) -> Result<InstallOutcome> {
        let Some(element) = self.elements.get_mut(id) else {
            return Ok(InstallOutcome::NoMetadata);
        };
        let metadata = element.metadata.clone();
        installer.install_if_needed(element, &metadata)
    }

    /// Answer an accessibility query for an element.
    ///
    /// The snapshot is rebuilt from scratch each time, then handed to the
    /// delegate together with the element's current state tokens.
    pub fn snapshot(&self, id: ElementId) -> Option<NodeSnapshot> {
        let element = self.elements.get(id)?;

        let mut snapshot = NodeSnapshot::new();
        snapshot.content_description = element.content_description.clone();
        snapshot.clickable = element.native_actions.contains(&ActionId::CLICK);

        if let Some(delegate) = &element.delegate {
            let states = element.metadata.states.as_deref().unwrap_or_default();
            delegate.populate(&mut snapshot, states);
        }
        Some(snapshot)
    }

    /// Invoke an action on an element, as assistive technology would.
    ///
    /// Returns whether the action was handled, by the delegate or by the
    /// element's native actions.
    pub fn perform_action(&self, id: ElementId, action: ActionId) -> bool {
        let Some(element) = self.elements.get(id) else {
            return false;
        };
        let native = &element.native_actions;
        let mut default_handling = |action: ActionId| native.contains(&action);

        match &element.delegate {
            Some(delegate) => delegate.handle_action(action, &mut default_handling),
            None => default_handling(action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ChannelEmitter;
    use crate::locale::Locale;
    use horizon_semantics_core::ActionRegistry;

    fn installer() -> DelegateInstaller {
        let (emitter, _events) = ChannelEmitter::unbounded();
        DelegateInstaller::new(Arc::new(ActionRegistry::new()), Arc::new(emitter))
            .with_locale(Locale::parse("en"))
    }

    #[test]
    fn test_snapshot_without_delegate() {
        let mut tree = ElementTree::new();
        let id = tree.insert_with_description("Plain");
        tree.add_native_action(id, ActionId::CLICK);

        let snapshot = tree.snapshot(id).unwrap();
        assert_eq!(snapshot.content_description.as_deref(), Some("Plain"));
        assert!(snapshot.clickable);
        assert!(snapshot.class_name.is_none());
    }

    #[test]
    fn test_missing_element() {
        let mut tree = ElementTree::new();
        let id = tree.insert();
        tree.remove(id);

        assert!(tree.snapshot(id).is_none());
        assert!(!tree.perform_action(id, ActionId::CLICK));
        assert!(!tree.set_states(id, ["selected"]));
        assert_eq!(tree.install(id, &installer()).unwrap(), InstallOutcome::NoMetadata);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_native_actions_without_delegate() {
        let mut tree = ElementTree::new();
        let id = tree.insert();
        tree.add_native_action(id, ActionId::CLICK);

        assert!(tree.perform_action(id, ActionId::CLICK));
        assert!(!tree.perform_action(id, ActionId::LONG_CLICK));
    }

    #[test]
    fn test_install_reads_attached_metadata() {
        let mut tree = ElementTree::new();
        let id = tree.insert();
        tree.set_metadata(id, ElementMetadata::new().role("switch").states(["checked"]));

        assert_eq!(tree.install(id, &installer()).unwrap(), InstallOutcome::Installed);
        assert!(tree.get(id).unwrap().delegate().is_some());

        let snapshot = tree.snapshot(id).unwrap();
        assert_eq!(snapshot.class_name.as_deref(), Some("android.widget.Switch"));
        assert!(snapshot.checkable && snapshot.checked);
    }

    #[test]
    fn test_element_without_metadata_is_untouched() {
        let mut tree = ElementTree::new();
        let id = tree.insert_with_description("Decoration");

        assert_eq!(tree.install(id, &installer()).unwrap(), InstallOutcome::NoMetadata);
        assert!(tree.get(id).unwrap().delegate().is_none());
        assert_eq!(tree.len(), 1);
    }
}
