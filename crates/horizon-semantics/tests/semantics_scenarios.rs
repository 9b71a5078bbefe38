//! End-to-end tests driving installation, snapshots and dispatch through
//! the in-memory element tree.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use horizon_semantics::{
    AccessibilityDelegate, AccessibilityEvent, ActionDescriptor, ActionId, ActionRegistry,
    ChannelEmitter, DelegateInstaller, ElementMetadata, ElementTree, InstallOutcome, Locale,
    NodeSnapshot, Role, native_class,
};

fn setup() -> (DelegateInstaller, Receiver<AccessibilityEvent>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_semantics=trace")
        .with_test_writer()
        .try_init();

    let (emitter, events) = ChannelEmitter::unbounded();
    let installer = DelegateInstaller::new(Arc::new(ActionRegistry::new()), Arc::new(emitter))
        .with_locale(Locale::parse("en-US"));
    (installer, events)
}

#[test]
fn link_with_hint_is_announced_as_link() {
    let (installer, _events) = setup();
    let mut tree = ElementTree::new();
    let link = tree.insert_with_description("Homepage");
    tree.set_metadata(link, ElementMetadata::new().role("link").hint("opens in browser"));
    tree.install(link, &installer).unwrap();

    let snapshot = tree.snapshot(link).unwrap();

    assert_eq!(
        snapshot.content_description.as_deref(),
        Some("Homepage, opens in browser")
    );
    assert_eq!(snapshot.class_name.as_deref(), Some(Role::Link.native_class()));
    assert_eq!(snapshot.role_description.as_deref(), Some("Link"));
    let text = snapshot.text.as_ref().unwrap();
    assert!(text.is_link());
    assert_eq!(text.text(), "Homepage, opens in browser");
}

#[test]
fn custom_actions_are_registered_and_dispatched() {
    let (installer, events) = setup();
    let mut tree = ElementTree::new();
    let card = tree.insert_with_description("Article");
    tree.set_metadata(
        card,
        ElementMetadata::new()
            .action(ActionDescriptor::new("activate"))
            .action(ActionDescriptor::labeled("bookmark", "Bookmark this")),
    );
    tree.install(card, &installer).unwrap();

    let snapshot = tree.snapshot(card).unwrap();
    let actions = snapshot.actions();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].id, ActionId::CLICK);
    assert_eq!(actions[0].label, None);
    assert!(actions[1].id >= ActionId::DYNAMIC_BASE);
    assert_eq!(actions[1].label.as_deref(), Some("Bookmark this"));

    assert!(tree.perform_action(card, actions[1].id));
    let event = events.try_recv().unwrap();
    assert_eq!(event.target, card);
    assert_eq!(event.action_name(), "bookmark");

    let json: serde_json::Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();
    assert_eq!(json["eventType"], "performAction");
    assert_eq!(json["payload"]["actionName"], "bookmark");
}

#[test]
fn states_are_read_live() {
    let (installer, _events) = setup();
    let mut tree = ElementTree::new();
    let checkbox = tree.insert_with_description("Subscribe");
    tree.set_metadata(
        checkbox,
        ElementMetadata::new().role("checkbox").states(["checked"]),
    );
    tree.install(checkbox, &installer).unwrap();

    let before = tree.snapshot(checkbox).unwrap();
    assert!(before.checkable && before.checked);

    tree.set_states(checkbox, ["unchecked"]);
    let after = tree.snapshot(checkbox).unwrap();
    assert!(after.checkable);
    assert!(!after.checked);
    assert_eq!(after.class_name.as_deref(), Some(native_class::CHECK_BOX));
}

#[test]
fn foreign_delegate_is_preserved() {
    struct Foreign;

    impl AccessibilityDelegate for Foreign {
        fn populate(&self, snapshot: &mut NodeSnapshot, _: &[String]) {
            snapshot.role_description = Some("custom widget".into());
        }

        fn handle_action(&self, _: ActionId, fallback: &mut dyn FnMut(ActionId) -> bool) -> bool {
            fallback(ActionId::CLICK)
        }
    }

    let (installer, events) = setup();
    let mut tree = ElementTree::new();
    let widget = tree.insert();
    let foreign: Arc<dyn AccessibilityDelegate> = Arc::new(Foreign);
    tree.set_delegate(widget, Arc::clone(&foreign));
    tree.set_metadata(
        widget,
        ElementMetadata::new()
            .role("button")
            .action(ActionDescriptor::new("bookmark")),
    );

    assert_eq!(
        tree.install(widget, &installer).unwrap(),
        InstallOutcome::DelegatePresent
    );
    assert!(Arc::ptr_eq(tree.get(widget).unwrap().delegate().unwrap(), &foreign));

    let snapshot = tree.snapshot(widget).unwrap();
    assert_eq!(snapshot.role_description.as_deref(), Some("custom widget"));
    assert!(snapshot.class_name.is_none());
    assert!(events.is_empty());
}

#[test]
fn action_ids_are_shared_across_elements() {
    let (installer, events) = setup();
    let mut tree = ElementTree::new();
    let first = tree.insert();
    let second = tree.insert();
    for id in [first, second] {
        tree.set_metadata(
            id,
            ElementMetadata::new().action(ActionDescriptor::labeled("archive", "Archive")),
        );
        tree.install(id, &installer).unwrap();
    }

    let first_id = tree.snapshot(first).unwrap().actions()[0].id;
    let second_id = tree.snapshot(second).unwrap().actions()[0].id;
    assert_eq!(first_id, second_id);
    assert_eq!(installer.registry().len(), 1);

    assert!(tree.perform_action(second, second_id));
    assert_eq!(events.try_recv().unwrap().target, second);
}

#[test]
fn unknown_ids_fall_through_to_native_handling() {
    let (installer, events) = setup();
    let mut tree = ElementTree::new();
    let button = tree.insert_with_description("Send");
    tree.add_native_action(button, ActionId::LONG_CLICK);
    tree.set_metadata(button, ElementMetadata::new().role("button"));
    tree.install(button, &installer).unwrap();

    assert!(tree.perform_action(button, ActionId::LONG_CLICK));
    assert!(!tree.perform_action(button, ActionId(0x3f7f_ffff)));
    assert!(events.is_empty());
}

#[test]
fn header_snapshot_is_stable_across_queries() {
    let (installer, _events) = setup();
    let mut tree = ElementTree::new();
    let title = tree.insert_with_description("Settings");
    tree.set_metadata(title, ElementMetadata::new().role("HEADER").hint("section"));
    tree.install(title, &installer).unwrap();

    let first = tree.snapshot(title).unwrap();
    let second = tree.snapshot(title).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.content_description.as_deref(), Some("Settings, section"));
    assert!(first.collection_item.unwrap().heading);
}

#[test]
fn non_english_locale_omits_role_description() {
    let (emitter, _events) = ChannelEmitter::unbounded();
    let installer = DelegateInstaller::new(Arc::new(ActionRegistry::new()), Arc::new(emitter))
        .with_locale(Locale::parse("ja-JP"));
    let mut tree = ElementTree::new();
    let tabs = tree.insert();
    tree.set_metadata(tabs, ElementMetadata::new().role("tablist"));
    tree.install(tabs, &installer).unwrap();

    let snapshot = tree.snapshot(tabs).unwrap();
    assert_eq!(snapshot.class_name.as_deref(), Some(native_class::VIEW));
    assert_eq!(snapshot.role_description, None);
}

#[test]
fn metadata_from_json_installs() {
    let (installer, _events) = setup();
    let mut tree = ElementTree::new();
    let menu = tree.insert_with_description("File");
    let metadata = ElementMetadata::from_json(
        r#"{"role": "menu", "states": ["hasPopup", "busy", "unknownState"]}"#,
    )
    .unwrap();
    tree.set_metadata(menu, metadata);
    tree.install(menu, &installer).unwrap();

    let snapshot = tree.snapshot(menu).unwrap();
    assert!(snapshot.can_open_popup);
    assert!(snapshot.busy);
    assert_eq!(snapshot.role_description.as_deref(), Some("Menu"));
}

#[cfg(feature = "accesskit")]
#[test]
fn populated_snapshot_converts_to_accesskit() {
    use horizon_semantics::accesskit_node::{action_request_id, to_accesskit_node};

    let (installer, events) = setup();
    let mut tree = ElementTree::new();
    let slider = tree.insert_with_description("Volume");
    tree.set_metadata(
        slider,
        ElementMetadata::new()
            .role("adjustable")
            .action(ActionDescriptor::new("increment"))
            .action(ActionDescriptor::labeled("mute", "Mute")),
    );
    tree.install(slider, &installer).unwrap();

    let snapshot = tree.snapshot(slider).unwrap();
    let node = to_accesskit_node(&snapshot, Role::Adjustable);
    assert_eq!(node.role(), accesskit::Role::Slider);
    assert!(node.supports_action(accesskit::Action::Increment));
    assert_eq!(node.custom_actions().len(), 1);

    let request = accesskit::ActionRequest {
        action: accesskit::Action::CustomAction,
        target: accesskit::NodeId(slider.as_raw()),
        data: Some(accesskit::ActionData::CustomAction(
            node.custom_actions()[0].id,
        )),
    };
    let id = action_request_id(&request).unwrap();
    assert!(tree.perform_action(slider, id));
    assert_eq!(events.try_recv().unwrap().action_name(), "mute");
}
