//! Conversion between snapshots and [AccessKit](https://accesskit.dev/).
//!
//! Hosts built on AccessKit turn a populated [`NodeSnapshot`] into an
//! [`accesskit::Node`] with [`to_accesskit_node`] and translate incoming
//! [`ActionRequest`]s back to numeric action IDs with [`action_request_id`]
//! before handing them to the installed delegate.

use accesskit::{Action, ActionData, ActionRequest, CustomAction, HasPopup, Node, Toggled};
use horizon_semantics_core::{ActionId, Role};

use crate::snapshot::NodeSnapshot;

/// Convert a semantic role to AccessKit's role.
pub fn to_accesskit_role(role: Role) -> accesskit::Role {
    use accesskit::Role as Ak;

    match role {
        Role::Button | Role::ImageButton | Role::KeyboardKey => Ak::Button,
        Role::Link => Ak::Link,
        Role::Search => Ak::SearchInput,
        Role::Image => Ak::Image,
        Role::Text | Role::Summary => Ak::Label,
        Role::Adjustable => Ak::Slider,
        Role::Header => Ak::Heading,
        Role::Alert => Ak::Alert,
        Role::Checkbox => Ak::CheckBox,
        Role::Combobox => Ak::ComboBox,
        Role::EditableText => Ak::TextInput,
        Role::Menu => Ak::Menu,
        Role::Menubar => Ak::MenuBar,
        Role::Menuitem => Ak::MenuItem,
        Role::Progressbar => Ak::ProgressIndicator,
        Role::Radiobutton => Ak::RadioButton,
        Role::Radiogroup => Ak::RadioGroup,
        Role::Scrollbar => Ak::ScrollBar,
        Role::Spinbutton => Ak::SpinButton,
        Role::Switch => Ak::Switch,
        Role::Tab => Ak::Tab,
        Role::Tablist => Ak::TabList,
        Role::Timer => Ak::Timer,
        Role::Toolbar => Ak::Toolbar,
        _ => Ak::GenericContainer,
    }
}

/// Map a native action ID to a standard AccessKit action.
///
/// Returns `None` for IDs that AccessKit only knows as custom actions.
fn standard_action(id: ActionId) -> Option<Action> {
    match id {
        ActionId::CLICK => Some(Action::Click),
        ActionId::LONG_CLICK => Some(Action::ShowContextMenu),
        ActionId::SCROLL_FORWARD => Some(Action::Increment),
        ActionId::SCROLL_BACKWARD => Some(Action::Decrement),
        _ => None,
    }
}

/// Build an AccessKit node from a populated snapshot.
pub fn to_accesskit_node(snapshot: &NodeSnapshot, role: Role) -> Node {
    let mut node = Node::new(to_accesskit_role(role));

    if let Some(class_name) = &snapshot.class_name {
        node.set_class_name(class_name.as_str());
    }
    if let Some(description) = &snapshot.content_description {
        node.set_label(description.as_str());
    }
    if let Some(role_description) = &snapshot.role_description {
        node.set_role_description(role_description.as_str());
    }

    if snapshot.selected {
        node.set_selected(true);
    }
    if !snapshot.enabled {
        node.set_disabled();
    }
    if snapshot.checkable {
        node.set_toggled(if snapshot.checked {
            Toggled::True
        } else {
            Toggled::False
        });
    }
    if snapshot.can_open_popup {
        node.set_has_popup(HasPopup::Menu);
    }
    if snapshot.busy {
        node.set_busy();
    }
    if let Some(expanded) = snapshot.expanded {
        node.set_expanded(expanded);
    }
    if snapshot.clickable {
        node.add_action(Action::Click);
    }

    if let Some(item) = snapshot.collection_item {
        node.set_row_index(item.row_index);
        node.set_column_index(item.column_index);
    }

    let mut custom = Vec::new();
    for action in snapshot.actions() {
        match standard_action(action.id) {
            Some(standard) => node.add_action(standard),
            None => custom.push(CustomAction {
                id: action.id.get(),
                description: action.label.clone().unwrap_or_default().into(),
            }),
        }
    }
    if !custom.is_empty() {
        node.add_action(Action::CustomAction);
        node.set_custom_actions(custom);
    }

    node
}

/// The numeric action ID an AccessKit request refers to.
pub fn action_request_id(request: &ActionRequest) -> Option<ActionId> {
    match request.action {
        Action::Click => Some(ActionId::CLICK),
        Action::ShowContextMenu => Some(ActionId::LONG_CLICK),
        Action::Increment => Some(ActionId::SCROLL_FORWARD),
        Action::Decrement => Some(ActionId::SCROLL_BACKWARD),
        Action::CustomAction => match request.data {
            Some(ActionData::CustomAction(id)) => Some(ActionId(id)),
            _ => None,
        },
        _ => None,
    }
}
