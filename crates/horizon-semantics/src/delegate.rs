//! Accessibility delegates and their installation.
//!
//! A platform adapter exposes each element through [`DelegateHost`] and calls
//! the installed [`AccessibilityDelegate`] whenever the native service asks
//! for the element's accessibility info or invokes an action on it.
//!
//! The [`DelegateInstaller`] reads an element's [`ElementMetadata`] once and,
//! if the element carries semantics and has no delegate yet, installs a
//! [`SemanticsDelegate`]. An element therefore moves from "uninstalled" to
//! "installed" at most once, and a delegate installed by other code is never
//! replaced.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_semantics::{
//!     ActionRegistry, ChannelEmitter, DelegateInstaller, ElementMetadata, ElementTree,
//!     InstallOutcome, Locale,
//! };
//!
//! let (emitter, events) = ChannelEmitter::unbounded();
//! let installer = DelegateInstaller::new(Arc::new(ActionRegistry::new()), Arc::new(emitter))
//!     .with_locale(Locale::parse("en-US"));
//!
//! let mut tree = ElementTree::new();
//! let button = tree.insert_with_description("Save");
//! tree.set_metadata(button, ElementMetadata::new().role("button").hint("saves the draft"));
//!
//! assert_eq!(tree.install(button, &installer)?, InstallOutcome::Installed);
//!
//! let snapshot = tree.snapshot(button).unwrap();
//! assert_eq!(snapshot.content_description.as_deref(), Some("Save, saves the draft"));
//! assert!(events.is_empty());
//! # Ok::<(), horizon_semantics::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_semantics_core::{ActionId, Role, SharedActionRegistry};

use crate::apply::apply_role;
use crate::element::ElementId;
use crate::error::{Error, Result};
use crate::event::{AccessibilityEvent, EventEmitter};
use crate::locale::{EnglishRoleDescriptions, Locale, RoleDescriptions};
use crate::logging::targets;
use crate::metadata::{ActionDescriptor, ElementMetadata};
use crate::snapshot::{NativeAction, NodeSnapshot};
use crate::state::apply_states;

/// Interception callbacks installed on an element.
pub trait AccessibilityDelegate: Send + Sync {
    /// Populate a freshly requested snapshot.
    ///
    /// `live_states` holds the element's state tokens as they are now, not as
    /// they were when the delegate was installed.
    fn populate(&self, snapshot: &mut NodeSnapshot, live_states: &[String]);

    /// Handle a native action invocation.
    ///
    /// Returns whether the action was handled. IDs the delegate does not own
    /// go to `fallback`, the element's default handling, whose result is
    /// returned unchanged.
    fn handle_action(&self, id: ActionId, fallback: &mut dyn FnMut(ActionId) -> bool) -> bool;
}

/// An element that can carry an accessibility delegate.
pub trait DelegateHost {
    /// The element's identity, used to key outbound events.
    fn element_id(&self) -> ElementId;

    /// Whether a delegate is already installed, by anyone.
    fn has_accessibility_delegate(&self) -> bool;

    /// Install `delegate` on the element.
    fn set_accessibility_delegate(&mut self, delegate: Arc<dyn AccessibilityDelegate>);
}

/// What [`DelegateInstaller::install_if_needed`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallOutcome {
    /// A [`SemanticsDelegate`] was installed.
    Installed,
    /// The element already had a delegate, which was left in place.
    DelegatePresent,
    /// The element carries no semantic metadata.
    NoMetadata,
}

/// The delegate installed for elements with semantic metadata.
///
/// Role, hint and actions are captured at installation; states are passed in
/// on every [`populate`](AccessibilityDelegate::populate) call.
pub struct SemanticsDelegate {
    element: ElementId,
    role: Option<Role>,
    hint: Option<String>,
    actions: Vec<ActionDescriptor>,
    locale: Locale,
    registry: SharedActionRegistry,
    emitter: Arc<dyn EventEmitter>,
    descriptions: Arc<dyn RoleDescriptions>,
}

impl fmt::Debug for SemanticsDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticsDelegate")
            .field("element", &self.element)
            .field("role", &self.role)
            .field("hint", &self.hint)
            .field("actions", &self.actions)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl SemanticsDelegate {
    /// The element this delegate was installed on.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The role captured at installation.
    pub fn role(&self) -> Option<Role> {
        self.role
    }
}

impl AccessibilityDelegate for SemanticsDelegate {
    fn populate(&self, snapshot: &mut NodeSnapshot, live_states: &[String]) {
        let _span =
            tracing::trace_span!(target: targets::APPLY, "populate", element = ?self.element)
                .entered();

        if let Some(hint) = &self.hint {
            snapshot.content_description = Some(match snapshot.content_description.take() {
                Some(existing) => format!("{existing}, {hint}"),
                None => hint.clone(),
            });
        }

        apply_role(snapshot, self.role, &self.locale, self.descriptions.as_ref());
        apply_states(snapshot, live_states);

        for action in &self.actions {
            match self.registry.resolve_id(&action.name) {
                Ok(id) => snapshot.add_action(NativeAction {
                    id,
                    label: action.label.clone(),
                }),
                Err(err) => tracing::warn!(
                    target: targets::APPLY,
                    action = %action.name,
                    error = %err,
                    "skipping unresolvable action"
                ),
            }
        }
    }

    fn handle_action(&self, id: ActionId, fallback: &mut dyn FnMut(ActionId) -> bool) -> bool {
        match self.registry.resolve_name(id) {
            Some(name) => {
                tracing::debug!(
                    target: targets::DISPATCH,
                    element = ?self.element,
                    %id,
                    action = %name,
                    "forwarding action"
                );
                self.emitter
                    .emit(AccessibilityEvent::perform_action(self.element, name));
                true
            }
            None => {
                tracing::debug!(
                    target: targets::DISPATCH,
                    element = ?self.element,
                    %id,
                    "unknown action id, using default handling"
                );
                fallback(id)
            }
        }
    }
}

/// Installs [`SemanticsDelegate`]s on elements that carry metadata.
#[derive(Clone)]
pub struct DelegateInstaller {
    registry: SharedActionRegistry,
    emitter: Arc<dyn EventEmitter>,
    descriptions: Arc<dyn RoleDescriptions>,
    locale: Locale,
}

impl fmt::Debug for DelegateInstaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateInstaller")
            .field("registry", &self.registry)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl DelegateInstaller {
    /// Create an installer using the system locale and English descriptions.
    pub fn new(registry: SharedActionRegistry, emitter: Arc<dyn EventEmitter>) -> Self {
        Self {
            registry,
            emitter,
            descriptions: Arc::new(EnglishRoleDescriptions),
            locale: Locale::current(),
        }
    }

    /// Use `locale` for role descriptions.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Use `descriptions` as the role description provider.
    pub fn with_descriptions(mut self, descriptions: Arc<dyn RoleDescriptions>) -> Self {
        self.descriptions = descriptions;
        self
    }

    /// The registry shared by every delegate this installer creates.
    pub fn registry(&self) -> &SharedActionRegistry {
        &self.registry
    }

    /// The locale used for role descriptions.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Install a [`SemanticsDelegate`] on `host` if it needs one.
    ///
    /// Nothing happens if the host already has a delegate or if `metadata`
    /// is empty. Otherwise the role is parsed, every action is checked for a
    /// name and every name is resolved to its ID before anything is
    /// installed, so a failed call leaves the host untouched.
    #[tracing::instrument(
        skip_all,
        target = "horizon_semantics::installer",
        level = "debug",
        fields(element = ?host.element_id())
    )]
    pub fn install_if_needed<H>(
        &self,
        host: &mut H,
        metadata: &ElementMetadata,
    ) -> Result<InstallOutcome>
    where
        H: DelegateHost + ?Sized,
    {
        if host.has_accessibility_delegate() {
            tracing::debug!(
                target: targets::INSTALLER,
                "delegate already present, leaving it alone"
            );
            return Ok(InstallOutcome::DelegatePresent);
        }
        if metadata.is_empty() {
            tracing::trace!(target: targets::INSTALLER, "no semantic metadata");
            return Ok(InstallOutcome::NoMetadata);
        }

        let role = metadata
            .role
            .as_deref()
            .map(Role::from_name)
            .transpose()?;

        let actions = metadata.actions.clone().unwrap_or_default();
        if let Some(index) = actions.iter().position(|a| a.name.is_empty()) {
            return Err(Error::MissingActionName { index });
        }
        for action in &actions {
            self.registry.resolve_id(&action.name)?;
        }

        let delegate = SemanticsDelegate {
            element: host.element_id(),
            role,
            hint: metadata.hint.clone(),
            actions,
            locale: self.locale.clone(),
            registry: Arc::clone(&self.registry),
            emitter: Arc::clone(&self.emitter),
            descriptions: Arc::clone(&self.descriptions),
        };
        tracing::debug!(
            target: targets::INSTALLER,
            ?role,
            action_count = delegate.actions.len(),
            "installing delegate"
        );

        host.set_accessibility_delegate(Arc::new(delegate));
        Ok(InstallOutcome::Installed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ChannelEmitter;
    use horizon_semantics_core::{ActionRegistry, Error as CoreError};
    use slotmap::SlotMap;

    struct TestHost {
        id: ElementId,
        delegate: Option<Arc<dyn AccessibilityDelegate>>,
    }

    impl TestHost {
        fn new() -> Self {
            let mut ids: SlotMap<ElementId, ()> = SlotMap::with_key();
            Self {
                id: ids.insert(()),
                delegate: None,
            }
        }
    }

    impl DelegateHost for TestHost {
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

    struct ForeignDelegate;

    impl AccessibilityDelegate for ForeignDelegate {
        fn populate(&self, snapshot: &mut NodeSnapshot, _: &[String]) {
            snapshot.class_name = Some("foreign".into());
        }

        fn handle_action(&self, _: ActionId, _: &mut dyn FnMut(ActionId) -> bool) -> bool {
            false
        }
    }

    fn installer() -> (DelegateInstaller, crossbeam_channel::Receiver<AccessibilityEvent>) {
        let (emitter, events) = ChannelEmitter::unbounded();
        let installer = DelegateInstaller::new(Arc::new(ActionRegistry::new()), Arc::new(emitter))
            .with_locale(Locale::parse("en-US"));
        (installer, events)
    }

    #[test]
    fn test_installs_with_metadata() {
        let (installer, _) = installer();
        let mut host = TestHost::new();

        let outcome = installer
            .install_if_needed(&mut host, &ElementMetadata::new().role("button"))
            .unwrap();

        assert_eq!(outcome, InstallOutcome::Installed);
        assert!(host.delegate.is_some());
    }

    #[test]
    fn test_skips_empty_metadata() {
        let (installer, _) = installer();
        let mut host = TestHost::new();

        let outcome = installer
            .install_if_needed(&mut host, &ElementMetadata::new())
            .unwrap();

        assert_eq!(outcome, InstallOutcome::NoMetadata);
        assert!(host.delegate.is_none());
    }

    #[test]
    fn test_never_replaces_foreign_delegate() {
        let (installer, _) = installer();
        let mut host = TestHost::new();
        let foreign: Arc<dyn AccessibilityDelegate> = Arc::new(ForeignDelegate);
        host.set_accessibility_delegate(Arc::clone(&foreign));

        let outcome = installer
            .install_if_needed(&mut host, &ElementMetadata::new().role("link").hint("x"))
            .unwrap();

        assert_eq!(outcome, InstallOutcome::DelegatePresent);
        assert!(Arc::ptr_eq(host.delegate.as_ref().unwrap(), &foreign));
    }

    #[test]
    fn test_second_install_is_a_no_op() {
        let (installer, _) = installer();
        let mut host = TestHost::new();
        let metadata = ElementMetadata::new().role("tab");

        installer.install_if_needed(&mut host, &metadata).unwrap();
        let first = Arc::clone(host.delegate.as_ref().unwrap());

        let outcome = installer.install_if_needed(&mut host, &metadata).unwrap();
        assert_eq!(outcome, InstallOutcome::DelegatePresent);
        assert!(Arc::ptr_eq(host.delegate.as_ref().unwrap(), &first));
    }

    #[test]
    fn test_invalid_role_fails_without_installing() {
        let (installer, _) = installer();
        let mut host = TestHost::new();

        let err = installer
            .install_if_needed(&mut host, &ElementMetadata::new().role("carousel"))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Core(CoreError::InvalidRole { ref name }) if name == "carousel"
        ));
        assert!(host.delegate.is_none());
    }

    #[test]
    fn test_unnamed_action_fails_without_installing() {
        let (installer, _) = installer();
        let mut host = TestHost::new();
        let metadata = ElementMetadata::new()
            .action(ActionDescriptor::new("activate"))
            .action(ActionDescriptor::labeled("", "Nameless"));

        let err = installer.install_if_needed(&mut host, &metadata).unwrap_err();

        assert!(matches!(err, Error::MissingActionName { index: 1 }));
        assert!(host.delegate.is_none());
    }

    #[test]
    fn test_exhausted_registry_fails_without_installing() {
        let (emitter, _events) = ChannelEmitter::unbounded();
        let registry = Arc::new(ActionRegistry::with_base(i32::MAX).unwrap());
        let installer = DelegateInstaller::new(registry, Arc::new(emitter))
            .with_locale(Locale::parse("en-US"));
        let metadata = ElementMetadata::new()
            .action(ActionDescriptor::new("archive"))
            .action(ActionDescriptor::new("share"));

        let mut host = TestHost::new();
        let err = installer.install_if_needed(&mut host, &metadata).unwrap_err();

        assert!(matches!(
            err,
            Error::Core(CoreError::ActionIdsExhausted { base: i32::MAX })
        ));
        assert!(host.delegate.is_none());

        let mut other = TestHost::new();
        let reused = ElementMetadata::new().action(ActionDescriptor::new("archive"));
        assert_eq!(
            installer.install_if_needed(&mut other, &reused).unwrap(),
            InstallOutcome::Installed
        );
    }

    #[test]
    fn test_populate_appends_hint() {
        let (installer, _) = installer();
        let mut host = TestHost::new();
        installer
            .install_if_needed(&mut host, &ElementMetadata::new().hint("double tap"))
            .unwrap();
        let delegate = host.delegate.unwrap();

        let mut described = NodeSnapshot::with_content_description("Play");
        delegate.populate(&mut described, &[]);
        assert_eq!(described.content_description.as_deref(), Some("Play, double tap"));

        let mut bare = NodeSnapshot::new();
        delegate.populate(&mut bare, &[]);
        assert_eq!(bare.content_description.as_deref(), Some("double tap"));
    }

    #[test]
    fn test_dispatch_forwards_known_ids() {
        let (installer, events) = installer();
        let mut host = TestHost::new();
        let metadata =
            ElementMetadata::new().action(ActionDescriptor::labeled("bookmark", "Bookmark"));
        installer.install_if_needed(&mut host, &metadata).unwrap();
        let delegate = host.delegate.unwrap();

        let mut snapshot = NodeSnapshot::new();
        delegate.populate(&mut snapshot, &[]);
        let id = snapshot.actions()[0].id;

        let mut fell_back = false;
        let handled = delegate.handle_action(id, &mut |_| {
            fell_back = true;
            false
        });

        assert!(handled);
        assert!(!fell_back);
        let event = events.try_recv().unwrap();
        assert_eq!(event.target, host.id);
        assert_eq!(event.action_name(), "bookmark");
    }

    #[test]
    fn test_dispatch_falls_back_for_unknown_ids() {
        let (installer, events) = installer();
        let mut host = TestHost::new();
        installer
            .install_if_needed(&mut host, &ElementMetadata::new().role("button"))
            .unwrap();
        let delegate = host.delegate.unwrap();

        let mut seen = None;
        let handled = delegate.handle_action(ActionId(0x40), &mut |id| {
            seen = Some(id);
            true
        });
        assert!(handled);
        assert_eq!(seen, Some(ActionId(0x40)));

        assert!(!delegate.handle_action(ActionId(0x80), &mut |_| false));
        assert!(events.is_empty());
    }
}
