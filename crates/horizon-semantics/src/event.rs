//! Events forwarded to the owning application.
//!
//! When assistive technology fires a custom action, the bridge emits an
//! [`AccessibilityEvent`] through an [`EventEmitter`]. Emission is
//! fire-and-forget: the bridge neither waits for delivery nor retries.
//!
//! # Example
//!
//! ```
//! use horizon_semantics::event::{AccessibilityEvent, ChannelEmitter, EventEmitter};
//! use horizon_semantics::ElementId;
//!
//! let (emitter, events) = ChannelEmitter::unbounded();
//! emitter.emit(AccessibilityEvent::perform_action(ElementId::default(), "bookmark"));
//!
//! let event = events.try_recv().unwrap();
//! assert_eq!(event.action_name(), "bookmark");
//! ```

use crossbeam_channel::{Receiver, Sender};
use serde::{Serialize, Serializer};

use crate::element::ElementId;
use crate::logging::targets;

/// Kinds of outbound events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum EventType {
    /// A custom action was invoked on the element.
    #[serde(rename = "performAction")]
    PerformAction,
}

impl EventType {
    /// The wire name of the event.
    pub fn name(self) -> &'static str {
        match self {
            Self::PerformAction => "performAction",
        }
    }
}

/// Payload of a [`EventType::PerformAction`] event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    /// Name of the invoked action.
    pub action_name: String,
}

/// An event targeted at one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityEvent {
    /// The element that fired the event.
    #[serde(serialize_with = "serialize_element_id")]
    pub target: ElementId,
    /// The event kind.
    pub event_type: EventType,
    /// Event data.
    pub payload: ActionPayload,
}

fn serialize_element_id<S: Serializer>(id: &ElementId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(id.as_raw())
}

impl AccessibilityEvent {
    /// A `performAction` event for `action_name` on `target`.
    pub fn perform_action(target: ElementId, action_name: impl Into<String>) -> Self {
        Self {
            target,
            event_type: EventType::PerformAction,
            payload: ActionPayload {
                action_name: action_name.into(),
            },
        }
    }

    /// Name of the invoked action.
    pub fn action_name(&self) -> &str {
        &self.payload.action_name
    }

    /// Serialize the event to its JSON wire form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A channel that delivers events to the owning application.
pub trait EventEmitter: Send + Sync {
    /// Deliver `event`. Must not block.
    fn emit(&self, event: AccessibilityEvent);
}

impl<F> EventEmitter for F
where
    F: Fn(AccessibilityEvent) + Send + Sync,
{
    fn emit(&self, event: AccessibilityEvent) {
        self(event);
    }
}

/// An [`EventEmitter`] backed by a crossbeam channel.
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    sender: Sender<AccessibilityEvent>,
}

impl ChannelEmitter {
    /// Wrap an existing sender.
    pub fn new(sender: Sender<AccessibilityEvent>) -> Self {
        Self { sender }
    }

    /// Create an emitter with an unbounded channel and return its receiver.
    pub fn unbounded() -> (Self, Receiver<AccessibilityEvent>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self::new(sender), receiver)
    }
}

impl EventEmitter for ChannelEmitter {
    fn emit(&self, event: AccessibilityEvent) {
        if let Err(err) = self.sender.try_send(event) {
            let event = err.into_inner();
            tracing::warn!(
                target: targets::DISPATCH,
                action = event.action_name(),
                "event channel unavailable, dropping event"
            );
        }
    }
}
