//! Gesture activation: the ordered show sequence behind a context-menu
//! gesture.
//!
//! Each accepted gesture runs synchronously to completion inside one
//! handler invocation: stop the raw event, hide every other visible menu,
//! capture the originating node, fire the cancellable trigger
//! notification, then position and show unless a subscriber vetoed it.
//! The cancellation flag is cleared at the end of every cycle, so a veto
//! applies to exactly one activation.

use crate::constants::SECONDARY_ACTION_MODIFIER;
use crate::event::{Capabilities, EventName, PointerEvent};
use crate::gateway::EventGateway;
use crate::menu::{Menu, MenuServices, MenuWidget};
use crate::node::NodeId;
use crate::signal::Notification;

/// How one gesture resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The gesture did not qualify (surrogate press without the secondary
    /// modifier); nothing happened.
    NotApplicable,
    /// A notification subscriber vetoed the show step.
    Cancelled,
    /// The menu was positioned at the pointer and shown.
    Shown,
}

#[derive(Debug)]
pub struct ActivationController {
    caps: Capabilities,
    cancelled: bool,
    context_event_target: Option<NodeId>,
    /// Fired once per accepted gesture, before the menu is shown.
    pub trigger_notification: Notification<PointerEvent>,
}

impl ActivationController {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            cancelled: false,
            context_event_target: None,
            trigger_notification: Notification::new(),
        }
    }

    /// Veto the next show decision.
    ///
    /// Usually called from a trigger-notification subscriber, but any call
    /// before a gesture's show decision counts: the flag stays set until
    /// the next activation reads it, then clears at the end of that cycle.
    /// A veto therefore applies to exactly one activation, never more.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// The node that originated the most recent accepted gesture.
    pub fn context_event_target(&self) -> Option<NodeId> {
        self.context_event_target
    }

    /// Run one activation cycle for a delivered gesture event.
    pub fn on_gesture(
        &mut self,
        event: &PointerEvent,
        base: &mut Menu,
        services: &mut MenuServices<'_>,
    ) -> ActivationOutcome {
        // Surrogate presses only qualify with the secondary-action
        // modifier held; anything else is not a menu gesture.
        if event.name == EventName::PointerDown
            && !event.modifiers.contains(SECONDARY_ACTION_MODIFIER)
        {
            return ActivationOutcome::NotApplicable;
        }

        // Stop the raw event so overlapping instances do not also
        // activate, and so default routing is suppressed.
        services.gateway.stop_event(event);

        // At most one context menu visible page-wide.
        services.registry.hide_visible();

        self.context_event_target = Some(services.gateway.event_target(event));

        // Synchronous single-pass dispatch; subscribers observe the target
        // captured above and may cancel.
        if self.trigger_notification.fire(event) {
            self.cancelled = true;
        }

        let outcome = if self.cancelled {
            tracing::debug!(menu = %base.name(), "activation cancelled");
            ActivationOutcome::Cancelled
        } else {
            let (column, row) = services.gateway.event_position(event);
            base.move_to(column, row);
            base.show(services);
            ActivationOutcome::Shown
        };

        // Cancellation is per-activation, never sticky.
        self.cancelled = false;
        outcome
    }

    /// Surrogate-path click handler: swallow the secondary click so the
    /// press that opened the menu does not also act on what is under it.
    pub fn on_click_suppress(&self, event: &PointerEvent, gateway: &mut dyn EventGateway) {
        if event.modifiers.contains(SECONDARY_ACTION_MODIFIER) {
            gateway.stop_event(event);
        }
    }

    pub(crate) fn is_legacy(&self) -> bool {
        !self.caps.has_native_menu_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::DispatchGateway;
    use crate::node::NodeTree;
    use crate::registry::MenuRegistry;
    use crossterm::event::KeyModifiers;

    fn gesture(name: EventName, column: u16, row: u16, modifiers: KeyModifiers, target: NodeId) -> PointerEvent {
        PointerEvent {
            sequence: 1,
            name,
            column,
            row,
            modifiers,
            target,
        }
    }

    #[test]
    fn cancelled_flag_never_leaks_into_the_next_cycle() {
        let mut gateway = DispatchGateway::new();
        let mut tree = NodeTree::new();
        let mut registry = MenuRegistry::new();
        let mut base = Menu::new("m", &mut tree, &mut registry);
        base.init_default_config();
        let target = tree.insert(ratatui::layout::Rect::new(0, 0, 5, 5));
        let mut controller = ActivationController::new(Capabilities::native());
        controller
            .trigger_notification
            .subscribe(|_, activation| activation.cancel());

        let event = gesture(EventName::ContextMenu, 1, 1, KeyModifiers::NONE, target);
        let mut services = MenuServices {
            gateway: &mut gateway,
            tree: &mut tree,
            registry: &mut registry,
        };
        assert_eq!(
            controller.on_gesture(&event, &mut base, &mut services),
            ActivationOutcome::Cancelled
        );
        assert!(!base.is_visible());

        // fresh controller state: replace the vetoing subscriber set
        controller.trigger_notification = Notification::new();
        assert_eq!(
            controller.on_gesture(&event, &mut base, &mut services),
            ActivationOutcome::Shown
        );
        assert!(base.is_visible());
        assert_eq!(base.position(), (1, 1));
    }

    #[test]
    fn surrogate_without_modifier_is_a_silent_noop() {
        let mut gateway = DispatchGateway::new();
        let mut tree = NodeTree::new();
        let mut registry = MenuRegistry::new();
        let mut base = Menu::new("m", &mut tree, &mut registry);
        base.init_default_config();
        let target = tree.insert(ratatui::layout::Rect::new(0, 0, 5, 5));
        let mut controller = ActivationController::new(Capabilities::legacy());

        let event = gesture(EventName::PointerDown, 2, 2, KeyModifiers::NONE, target);
        let mut services = MenuServices {
            gateway: &mut gateway,
            tree: &mut tree,
            registry: &mut registry,
        };
        assert_eq!(
            controller.on_gesture(&event, &mut base, &mut services),
            ActivationOutcome::NotApplicable
        );
        assert!(!base.is_visible());
        assert!(controller.context_event_target().is_none());
    }
}
