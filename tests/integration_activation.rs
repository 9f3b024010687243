//! Activation-pipeline tests against a recording fake gateway.
//!
//! The fake keeps an attach/detach call log plus the live attachment set,
//! so rebinding and teardown can be checked for leaked or duplicated
//! listeners without a terminal.

use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::KeyModifiers;
use ratatui::layout::Rect;

use term_menu::event::{Capabilities, EventName, PointerEvent};
use term_menu::gateway::{EventGateway, ListenerId};
use term_menu::menu::{ActivationOutcome, ContextMenu, MenuServices, MenuWidget};
use term_menu::node::{NodeId, NodeTree, Trigger, TriggerRef};
use term_menu::registry::MenuRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
enum GatewayCall {
    Attach {
        node: NodeId,
        event: EventName,
        listener: ListenerId,
        capture: bool,
    },
    Detach {
        node: NodeId,
        event: EventName,
        listener: ListenerId,
        capture: bool,
    },
    Stop {
        sequence: u64,
    },
}

#[derive(Debug, Default)]
struct FakeGateway {
    next: u64,
    log: Vec<GatewayCall>,
    attached: Vec<(NodeId, EventName, ListenerId, bool)>,
}

impl EventGateway for FakeGateway {
    fn allocate_listener(&mut self) -> ListenerId {
        let id = ListenerId::from_raw(self.next);
        self.next += 1;
        id
    }

    fn attach(&mut self, node: NodeId, event: EventName, listener: ListenerId, capture: bool) {
        self.log.push(GatewayCall::Attach {
            node,
            event,
            listener,
            capture,
        });
        let key = (node, event, listener, capture);
        if !self.attached.contains(&key) {
            self.attached.push(key);
        }
    }

    fn detach(&mut self, node: NodeId, event: EventName, listener: ListenerId, capture: bool) {
        self.log.push(GatewayCall::Detach {
            node,
            event,
            listener,
            capture,
        });
        self.attached
            .retain(|key| *key != (node, event, listener, capture));
    }

    fn stop_event(&mut self, event: &PointerEvent) {
        self.log.push(GatewayCall::Stop {
            sequence: event.sequence,
        });
    }
}

struct World {
    gateway: FakeGateway,
    tree: NodeTree,
    registry: MenuRegistry,
}

impl World {
    fn new() -> Self {
        Self {
            gateway: FakeGateway::default(),
            tree: NodeTree::new(),
            registry: MenuRegistry::new(),
        }
    }

    fn services(&mut self) -> MenuServices<'_> {
        MenuServices {
            gateway: &mut self.gateway,
            tree: &mut self.tree,
            registry: &mut self.registry,
        }
    }

    fn menu(&mut self, caps: Capabilities) -> ContextMenu {
        let mut services = self.services();
        let mut menu = ContextMenu::new("ctx", caps, &mut services);
        menu.init(&mut services);
        menu
    }

    fn pane(&mut self, name: &str) -> NodeId {
        self.tree
            .insert_named(name, Rect::new(0, 0, 20, 10))
            .unwrap()
    }
}

fn gesture(sequence: u64, target: NodeId, column: u16, row: u16) -> PointerEvent {
    PointerEvent {
        sequence,
        name: EventName::ContextMenu,
        column,
        row,
        modifiers: KeyModifiers::NONE,
        target,
    }
}

fn surrogate(sequence: u64, target: NodeId, modifiers: KeyModifiers) -> PointerEvent {
    PointerEvent {
        sequence,
        name: EventName::PointerDown,
        column: 3,
        row: 3,
        modifiers,
        target,
    }
}

#[test]
fn rebinding_detaches_every_previous_listener() {
    let mut world = World::new();
    let a = world.pane("a");
    let b = world.pane("b");
    let c = world.pane("c");
    let mut menu = world.menu(Capabilities::native());

    menu.configure_trigger(
        Some(Trigger::many([TriggerRef::Node(a), TriggerRef::Node(b)])),
        &mut world.services(),
    );
    assert_eq!(world.gateway.attached.len(), 2);

    menu.configure_trigger(Some(Trigger::node(c)), &mut world.services());
    // nothing from the first set survives
    assert_eq!(world.gateway.attached.len(), 1);
    assert_eq!(world.gateway.attached[0].0, c);

    // detaches were recorded for both old nodes before the new attach
    let detaches: Vec<NodeId> = world
        .gateway
        .log
        .iter()
        .filter_map(|call| match call {
            GatewayCall::Detach { node, .. } => Some(*node),
            _ => None,
        })
        .collect();
    assert_eq!(detaches, vec![a, b]);
}

#[test]
fn clearing_the_trigger_leaves_zero_attachments() {
    let mut world = World::new();
    let a = world.pane("a");
    let mut menu = world.menu(Capabilities::native());
    menu.configure_trigger(Some(Trigger::node(a)), &mut world.services());
    menu.configure_trigger(None, &mut world.services());
    assert!(world.gateway.attached.is_empty());
    assert!(menu.bound_nodes().is_empty());
}

#[test]
fn accepted_gesture_runs_the_full_sequence() {
    let mut world = World::new();
    let pane = world.pane("pane");
    let other_pane = world.pane("other");
    let mut menu = world.menu(Capabilities::native());
    menu.configure_trigger(Some(Trigger::node(pane)), &mut world.services());

    // a second menu is visible page-wide and must get hidden
    let mut other = world.menu(Capabilities::native());
    other.configure_trigger(Some(Trigger::node(other_pane)), &mut world.services());
    let shown = other.handle_event(
        other.gesture_listener(),
        &gesture(1, other_pane, 1, 1),
        &mut world.services(),
    );
    assert_eq!(shown, Some(ActivationOutcome::Shown));
    assert!(other.is_visible());

    let event = gesture(2, pane, 5, 4);
    let outcome = menu.handle_event(menu.gesture_listener(), &event, &mut world.services());
    assert_eq!(outcome, Some(ActivationOutcome::Shown));

    // the raw gesture was stopped
    assert!(world.gateway.log.contains(&GatewayCall::Stop { sequence: 2 }));
    // hide-all ran before our menu showed itself
    assert!(!other.is_visible());
    assert!(menu.is_visible());
    assert_eq!(world.registry.visible_count(), 1);
    // target and position captured from the event
    assert_eq!(menu.context_event_target(), Some(pane));
    assert_eq!(menu.base().position(), (5, 4));
}

#[test]
fn cancel_from_a_subscriber_vetoes_exactly_one_activation() {
    let mut world = World::new();
    let pane = world.pane("pane");
    let mut menu = world.menu(Capabilities::native());
    menu.configure_trigger(Some(Trigger::node(pane)), &mut world.services());

    let veto = Rc::new(Cell::new(true));
    let flag = Rc::clone(&veto);
    menu.on_trigger(move |_, activation| {
        if flag.get() {
            activation.cancel();
        }
    });

    let first = menu.handle_event(
        menu.gesture_listener(),
        &gesture(1, pane, 2, 2),
        &mut world.services(),
    );
    assert_eq!(first, Some(ActivationOutcome::Cancelled));
    assert!(!menu.is_visible());

    // same trigger, new gesture, veto withdrawn: the flag must not stick
    veto.set(false);
    let second = menu.handle_event(
        menu.gesture_listener(),
        &gesture(2, pane, 2, 2),
        &mut world.services(),
    );
    assert_eq!(second, Some(ActivationOutcome::Shown));
    assert!(menu.is_visible());
}

#[test]
fn direct_cancel_while_armed_vetoes_the_next_activation_only() {
    let mut world = World::new();
    let pane = world.pane("pane");
    let mut menu = world.menu(Capabilities::native());
    menu.configure_trigger(Some(Trigger::node(pane)), &mut world.services());

    // set the flag with no gesture in flight
    menu.cancel();

    let first = menu.handle_event(
        menu.gesture_listener(),
        &gesture(1, pane, 2, 2),
        &mut world.services(),
    );
    assert_eq!(first, Some(ActivationOutcome::Cancelled));
    assert!(!menu.is_visible());

    // the flag cleared with that activation; the next gesture shows
    let second = menu.handle_event(
        menu.gesture_listener(),
        &gesture(2, pane, 2, 2),
        &mut world.services(),
    );
    assert_eq!(second, Some(ActivationOutcome::Shown));
    assert!(menu.is_visible());
}

#[test]
fn subscribers_observe_the_captured_target_during_dispatch() {
    let mut world = World::new();
    let pane = world.pane("pane");
    let mut menu = world.menu(Capabilities::native());
    menu.configure_trigger(Some(Trigger::node(pane)), &mut world.services());

    let seen = Rc::new(Cell::new(None));
    let sink = Rc::clone(&seen);
    menu.on_trigger(move |event, _| sink.set(Some(event.target)));

    let _ = menu.handle_event(
        menu.gesture_listener(),
        &gesture(1, pane, 2, 2),
        &mut world.services(),
    );
    assert_eq!(seen.get(), Some(pane));
}

#[test]
fn surrogate_gesture_requires_the_secondary_modifier() {
    let mut world = World::new();
    let pane = world.pane("pane");
    let mut menu = world.menu(Capabilities::legacy());
    menu.configure_trigger(Some(Trigger::node(pane)), &mut world.services());
    let log_len = world.gateway.log.len();

    // no modifier: silent no-op, no suppression, no show
    let outcome = menu.handle_event(
        menu.gesture_listener(),
        &surrogate(1, pane, KeyModifiers::NONE),
        &mut world.services(),
    );
    assert_eq!(outcome, Some(ActivationOutcome::NotApplicable));
    assert!(!menu.is_visible());
    assert_eq!(world.gateway.log.len(), log_len);
    assert!(menu.context_event_target().is_none());

    // with the modifier it behaves like the native path
    let outcome = menu.handle_event(
        menu.gesture_listener(),
        &surrogate(2, pane, KeyModifiers::CONTROL),
        &mut world.services(),
    );
    assert_eq!(outcome, Some(ActivationOutcome::Shown));
    assert!(menu.is_visible());
}

#[test]
fn legacy_binding_attaches_the_click_suppressor_too() {
    let mut world = World::new();
    let pane = world.pane("pane");
    let mut menu = world.menu(Capabilities::legacy());
    menu.configure_trigger(Some(Trigger::node(pane)), &mut world.services());

    let events: Vec<EventName> = world
        .gateway
        .attached
        .iter()
        .map(|(_, event, _, _)| *event)
        .collect();
    assert_eq!(events, vec![EventName::PointerDown, EventName::Click]);
    // both capture-phase
    assert!(world.gateway.attached.iter().all(|(_, _, _, cap)| *cap));

    menu.configure_trigger(None, &mut world.services());
    assert!(world.gateway.attached.is_empty());
}

#[test]
fn legacy_click_listener_swallows_only_modified_clicks() {
    let mut world = World::new();
    let pane = world.pane("pane");
    let mut menu = world.menu(Capabilities::legacy());
    menu.configure_trigger(Some(Trigger::node(pane)), &mut world.services());

    let click = |sequence, modifiers| PointerEvent {
        sequence,
        name: EventName::Click,
        column: 3,
        row: 3,
        modifiers,
        target: pane,
    };

    let _ = menu.handle_event(
        menu.click_listener(),
        &click(1, KeyModifiers::NONE),
        &mut world.services(),
    );
    assert!(!world
        .gateway
        .log
        .contains(&GatewayCall::Stop { sequence: 1 }));

    let _ = menu.handle_event(
        menu.click_listener(),
        &click(2, KeyModifiers::CONTROL),
        &mut world.services(),
    );
    assert!(world.gateway.log.contains(&GatewayCall::Stop { sequence: 2 }));
}

#[test]
fn destroy_releases_all_listeners() {
    let mut world = World::new();
    let a = world.pane("a");
    let b = world.pane("b");
    let mut menu = world.menu(Capabilities::legacy());
    menu.configure_trigger(
        Some(Trigger::many([TriggerRef::Node(a), TriggerRef::Node(b)])),
        &mut world.services(),
    );
    assert_eq!(world.gateway.attached.len(), 4);

    menu.destroy(&mut world.services());
    assert!(world.gateway.attached.is_empty());
    assert_eq!(world.registry.visible_count(), 0);
}
