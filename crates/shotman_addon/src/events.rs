// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host event subscriptions.
//!
//! The host raises events at fixed points of its lifecycle. The add-on
//! subscribes listeners under a stable name so registering twice replaces
//! the earlier listener instead of running it twice.

use crate::host::Host;
use indexmap::IndexMap;
use shotman_sequencer::SceneId;

/// Events raised by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A document finished loading
    DocumentLoaded,
    /// A document is about to be written
    DocumentSaving,
    /// The current frame of a scene is about to change
    FrameChangePre {
        /// Scene whose frame changes
        scene: SceneId,
    },
}

impl HostEvent {
    /// Kind used to route the event
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::DocumentLoaded => EventKind::LoadPost,
            HostEvent::DocumentSaving => EventKind::SavePre,
            HostEvent::FrameChangePre { .. } => EventKind::FrameChangePre,
        }
    }
}

/// Hook points a listener can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// After a document is loaded
    LoadPost,
    /// Before a document is saved
    SavePre,
    /// Before the frame changes
    FrameChangePre,
}

/// Something that reacts to host events
pub trait EventListener {
    /// Handle an event
    fn on_event(&mut self, event: &HostEvent, host: &mut dyn Host);
}

struct Subscription {
    kind: EventKind,
    listener: Box<dyn EventListener>,
}

/// Named listener registry
#[derive(Default)]
pub struct EventBus {
    subscriptions: IndexMap<&'static str, Subscription>,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a listener under `name`, replacing any listener of that name
    pub fn subscribe(
        &mut self,
        name: &'static str,
        kind: EventKind,
        listener: Box<dyn EventListener>,
    ) {
        if self
            .subscriptions
            .insert(name, Subscription { kind, listener })
            .is_some()
        {
            tracing::debug!("Replaced event listener {}", name);
        }
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, name: &str) -> bool {
        self.subscriptions.shift_remove(name).is_some()
    }

    /// Whether a listener is subscribed under `name`
    pub fn is_subscribed(&self, name: &str) -> bool {
        self.subscriptions.contains_key(name)
    }

    /// Number of subscribed listeners
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether no listener is subscribed
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Run every listener of the event's kind, in subscription order
    pub fn dispatch(&mut self, event: &HostEvent, host: &mut dyn Host) {
        let kind = event.kind();
        for (name, subscription) in self.subscriptions.iter_mut() {
            if subscription.kind == kind {
                tracing::trace!("Dispatching {:?} to {}", kind, name);
                subscription.listener.on_event(event, host);
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.subscriptions.iter().map(|(name, s)| (name, s.kind)))
            .finish()
    }
}
