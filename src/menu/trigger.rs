//! Trigger binding: the mapping from configured trigger value to attached
//! gateway listeners.
//!
//! Rebinding always detaches the previous set completely before attaching
//! the new one, so no listener leaks across trigger changes and no node
//! fires twice. An empty or absent trigger is a valid state meaning
//! "fully detached", never an error.

use crate::event::{Capabilities, EventName};
use crate::gateway::{EventGateway, ListenerId};
use crate::node::{NodeId, NodeTree, Trigger, TriggerRef};

#[derive(Debug)]
pub struct TriggerBinder {
    caps: Capabilities,
    gesture_listener: ListenerId,
    /// Attached alongside the gesture listener on the surrogate path only,
    /// to swallow the secondary click's default action.
    click_listener: ListenerId,
    trigger: Option<Trigger>,
    bound: Vec<NodeId>,
}

impl TriggerBinder {
    pub fn new(caps: Capabilities, gateway: &mut dyn EventGateway) -> Self {
        Self {
            caps,
            gesture_listener: gateway.allocate_listener(),
            click_listener: gateway.allocate_listener(),
            trigger: None,
            bound: Vec::new(),
        }
    }

    pub fn gesture_listener(&self) -> ListenerId {
        self.gesture_listener
    }

    pub fn click_listener(&self) -> ListenerId {
        self.click_listener
    }

    pub fn trigger(&self) -> Option<&Trigger> {
        self.trigger.as_ref()
    }

    pub fn bound_nodes(&self) -> &[NodeId] {
        &self.bound
    }

    /// Replace the bound trigger set.
    ///
    /// Listeners register in the capture phase so the menu intercepts the
    /// gesture ahead of bubble-order page handlers. References that do not
    /// resolve are skipped; duplicate nodes bind once.
    pub fn set_trigger(
        &mut self,
        new: Option<Trigger>,
        tree: &NodeTree,
        gateway: &mut dyn EventGateway,
    ) {
        self.detach_all(gateway);

        let trigger = match new {
            Some(trigger) if !trigger.is_empty() => trigger,
            _ => {
                self.trigger = None;
                return;
            }
        };

        let mut bound = Vec::new();
        for reference in trigger.iter() {
            let node = match reference {
                TriggerRef::Node(id) => tree.area(*id).map(|_| *id),
                TriggerRef::Name(name) => tree.resolve(name),
            };
            let Some(node) = node else {
                tracing::debug!(?reference, "trigger reference did not resolve; skipping");
                continue;
            };
            if bound.contains(&node) {
                continue;
            }
            gateway.attach(node, self.caps.gesture_event(), self.gesture_listener, true);
            if !self.caps.has_native_menu_event() {
                gateway.attach(node, EventName::Click, self.click_listener, true);
            }
            bound.push(node);
        }
        tracing::debug!(nodes = bound.len(), "bound trigger set");
        self.bound = bound;
        self.trigger = Some(trigger);
    }

    fn detach_all(&mut self, gateway: &mut dyn EventGateway) {
        for node in self.bound.drain(..) {
            gateway.detach(node, self.caps.gesture_event(), self.gesture_listener, true);
            if !self.caps.has_native_menu_event() {
                gateway.detach(node, EventName::Click, self.click_listener, true);
            }
        }
    }
}
