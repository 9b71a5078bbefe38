//! Translation of state tokens into snapshot flags.

use crate::logging::targets;
use crate::snapshot::NodeSnapshot;

/// State tokens understood by [`apply_states`].
pub mod tokens {
    /// Marks the element selected.
    pub const SELECTED: &str = "selected";
    /// Marks the element not enabled.
    pub const DISABLED: &str = "disabled";
    /// Marks the element checkable and checked.
    pub const CHECKED: &str = "checked";
    /// Marks the element checkable and not checked.
    pub const UNCHECKED: &str = "unchecked";
    /// Marks the element as able to open a popup.
    pub const HAS_POPUP: &str = "hasPopup";
    /// Marks the element busy.
    pub const BUSY: &str = "busy";
    /// Marks the element expanded.
    pub const EXPANDED: &str = "expanded";
    /// Marks the element collapsed.
    pub const COLLAPSED: &str = "collapsed";
}

/// Apply `states` to `snapshot` in order.
///
/// Later tokens win when they touch the same flag. Unknown tokens are
/// skipped: producers may ship states this bridge does not know yet.
pub fn apply_states<S: AsRef<str>>(snapshot: &mut NodeSnapshot, states: &[S]) {
    for state in states {
        match state.as_ref() {
            tokens::SELECTED => snapshot.selected = true,
            tokens::DISABLED => snapshot.enabled = false,
            tokens::CHECKED => {
                snapshot.checkable = true;
                snapshot.checked = true;
            }
            tokens::UNCHECKED => {
                snapshot.checkable = true;
                snapshot.checked = false;
            }
            tokens::HAS_POPUP => snapshot.can_open_popup = true,
            tokens::BUSY => snapshot.busy = true,
            tokens::EXPANDED => snapshot.expanded = Some(true),
            tokens::COLLAPSED => snapshot.expanded = Some(false),
            other => {
                tracing::trace!(target: targets::APPLY, state = other, "ignoring unknown state");
            }
        }
    }
}
