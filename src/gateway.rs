//! Event gateway: listener attachment and pointer-event routing.
//!
//! The gateway owns the listener table. Widgets attach and detach listeners
//! keyed by `(node, event name, listener, capture)`; the application feeds
//! raw mouse input through [`DispatchGateway::dispatch`] and routes the
//! resulting deliveries to whichever widget owns each listener id. A
//! handler may call [`EventGateway::stop_event`] mid-dispatch to suppress
//! both the remaining deliveries and the default routing of that input
//! (forwarding it to the focused pane, closing menus, and so on).

use crossterm::event::MouseEvent;

use crate::event::{EventName, PointerEvent, classify};
use crate::node::{NodeId, NodeTree};

/// Stable handle for an attached handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Construct from a raw counter value; gateways hand these out through
    /// [`EventGateway::allocate_listener`].
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Listener attachment and event introspection, as consumed by widgets.
///
/// Attach is idempotent per key and detach of an absent key is a no-op, so
/// rebinding code never has to track whether a previous detach already
/// happened.
pub trait EventGateway {
    fn allocate_listener(&mut self) -> ListenerId;

    fn attach(&mut self, node: NodeId, event: EventName, listener: ListenerId, capture: bool);

    fn detach(&mut self, node: NodeId, event: EventName, listener: ListenerId, capture: bool);

    /// Suppress default routing of `event`'s dispatch and stop delivering it
    /// to any further listeners.
    fn stop_event(&mut self, event: &PointerEvent);

    /// The innermost node the event hit.
    fn event_target(&self, event: &PointerEvent) -> NodeId {
        event.target
    }

    /// The pointer coordinates of the event, `(column, row)`.
    fn event_position(&self, event: &PointerEvent) -> (u16, u16) {
        event.position()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListenerKey {
    node: NodeId,
    event: EventName,
    listener: ListenerId,
    capture: bool,
}

/// One listener invocation produced by a dispatch.
#[derive(Debug, Clone, Copy)]
pub struct Delivery {
    pub listener: ListenerId,
    pub event: PointerEvent,
}

/// Production [`EventGateway`]: a listener table plus node-tree hit-testing.
#[derive(Debug, Default)]
pub struct DispatchGateway {
    /// Attachment order is preserved; listeners on the same node fire in the
    /// order they were attached.
    listeners: Vec<ListenerKey>,
    next_listener: u64,
    sequence: u64,
    stopped: Option<u64>,
}

impl DispatchGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one raw mouse event.
    ///
    /// Hit-tests the node tree, then plans deliveries in two phases:
    /// capture listeners from the outermost hit node inward, then bubble
    /// listeners from the innermost hit node outward. The caller must check
    /// [`DispatchGateway::propagation_stopped`] between deliveries, since a
    /// handler may stop the event partway through.
    pub fn dispatch(&mut self, raw: &MouseEvent, tree: &NodeTree) -> Vec<Delivery> {
        let Some(name) = classify(raw.kind) else {
            return Vec::new();
        };
        let path = tree.hit_path(raw.column, raw.row);
        let Some(target) = path.last().copied() else {
            return Vec::new();
        };

        self.sequence += 1;
        let event = PointerEvent {
            sequence: self.sequence,
            name,
            column: raw.column,
            row: raw.row,
            modifiers: raw.modifiers,
            target,
        };

        let mut deliveries = Vec::new();
        for node in path.iter().copied() {
            self.plan_phase(node, name, true, event, &mut deliveries);
        }
        for node in path.iter().rev().copied() {
            self.plan_phase(node, name, false, event, &mut deliveries);
        }
        if !deliveries.is_empty() {
            tracing::debug!(?name, count = deliveries.len(), "dispatching pointer event");
        }
        deliveries
    }

    fn plan_phase(
        &self,
        node: NodeId,
        name: EventName,
        capture: bool,
        event: PointerEvent,
        out: &mut Vec<Delivery>,
    ) {
        for key in &self.listeners {
            if key.node == node && key.event == name && key.capture == capture {
                out.push(Delivery {
                    listener: key.listener,
                    event,
                });
            }
        }
    }

    /// Whether a handler stopped the dispatch `event` belongs to.
    pub fn propagation_stopped(&self, event: &PointerEvent) -> bool {
        self.stopped == Some(event.sequence)
    }

    /// Whether default routing of `event`'s raw input was suppressed.
    ///
    /// Stopping an event suppresses both propagation and default routing,
    /// so this currently coincides with `propagation_stopped`; callers that
    /// forward unhandled input elsewhere should consult this one.
    pub fn default_suppressed(&self, event: &PointerEvent) -> bool {
        self.stopped == Some(event.sequence)
    }

    #[cfg(test)]
    fn attached_count(&self) -> usize {
        self.listeners.len()
    }
}

impl EventGateway for DispatchGateway {
    fn allocate_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        id
    }

    fn attach(&mut self, node: NodeId, event: EventName, listener: ListenerId, capture: bool) {
        let key = ListenerKey {
            node,
            event,
            listener,
            capture,
        };
        if !self.listeners.contains(&key) {
            self.listeners.push(key);
        }
    }

    fn detach(&mut self, node: NodeId, event: EventName, listener: ListenerId, capture: bool) {
        let key = ListenerKey {
            node,
            event,
            listener,
            capture,
        };
        self.listeners.retain(|existing| *existing != key);
    }

    fn stop_event(&mut self, event: &PointerEvent) {
        self.stopped = Some(event.sequence);
    }
}
