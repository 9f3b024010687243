//! Context menu: a popup shown in response to a secondary-action gesture
//! on one or more trigger nodes.
//!
//! Composes the generic [`Menu`] base with a [`TriggerBinder`] and an
//! [`ActivationController`]. The only way to (re)bind triggers is through
//! the `trigger` configuration property; its change handler is the
//! binder's `set_trigger`, so configuration and listener state can never
//! drift apart.

use crate::config::{self, ConfigValue, PropertyKey};
use crate::event::{Capabilities, PointerEvent};
use crate::gateway::ListenerId;
use crate::menu::{
    ActivationController, ActivationOutcome, ItemKind, Menu, MenuItem, MenuServices, MenuWidget,
    TriggerBinder,
};
use crate::node::{NodeId, Trigger};
use crate::signal::Activation;
use crate::ui::UiFrame;

#[derive(Debug)]
pub struct ContextMenu {
    base: Menu,
    binder: TriggerBinder,
    controller: ActivationController,
}

impl ContextMenu {
    /// Construct an uninitialized context menu. Call
    /// [`ContextMenu::init_with`] before binding triggers.
    pub fn new(name: &str, caps: Capabilities, services: &mut MenuServices<'_>) -> Self {
        let base = Menu::new(name, services.tree, services.registry);
        let binder = TriggerBinder::new(caps, services.gateway);
        let controller = ActivationController::new(caps);
        Self {
            base,
            binder,
            controller,
        }
    }

    /// Initialize, optionally bulk-applying a configuration object.
    ///
    /// Runs the lifecycle in order: ensure a default item kind, declare the
    /// configuration schema, wire events, base init, before-init
    /// notification, configuration apply, init notification. Unknown keys
    /// in `config` are skipped by the store, so a partially applicable
    /// object still takes effect.
    pub fn init_with(
        &mut self,
        config: Vec<(PropertyKey, ConfigValue)>,
        services: &mut MenuServices<'_>,
    ) {
        if self.base.default_item_kind().is_none() {
            self.base.set_default_item_kind(ItemKind::Command);
        }
        self.init_default_config();
        self.init_events();
        self.base.init(services);
        let _ = self.base.before_init.fire(&());
        if !config.is_empty() {
            self.base.cfg.apply(config);
            self.sync_config(services);
        }
        let _ = self.base.init_event.fire(&());
    }

    /// Set the trigger property. `None` (or an empty list) detaches every
    /// listener and leaves the menu armed for nothing.
    pub fn configure_trigger(&mut self, value: Option<Trigger>, services: &mut MenuServices<'_>) {
        let value = match value {
            Some(trigger) => ConfigValue::Trigger(trigger),
            None => ConfigValue::None,
        };
        if !self.base.cfg.set(config::TRIGGER, value) {
            tracing::debug!(
                menu = %self.base.name(),
                "trigger set before the schema was declared; ignoring"
            );
        }
        self.sync_config(services);
    }

    /// Drain queued configuration changes; `trigger` routes to the binder,
    /// everything else to the base menu.
    fn sync_config(&mut self, services: &mut MenuServices<'_>) {
        for (key, value) in self.base.cfg.take_changes() {
            match (key, value) {
                (config::TRIGGER, ConfigValue::Trigger(trigger)) => {
                    self.binder
                        .set_trigger(Some(trigger), services.tree, services.gateway);
                }
                (config::TRIGGER, _) => {
                    self.binder.set_trigger(None, services.tree, services.gateway);
                }
                (key, value) => self.base.handle_config_change(key, value),
            }
        }
    }

    /// Subscribe to the trigger notification. Subscribers run synchronously
    /// during activation and may veto the show step via the activation
    /// handle.
    pub fn on_trigger(
        &mut self,
        subscriber: impl FnMut(&PointerEvent, &mut Activation) + 'static,
    ) {
        self.controller.trigger_notification.subscribe(subscriber);
    }

    /// Veto the next show decision. Callable any time before a gesture's
    /// show step evaluates; the flag clears once that activation resolves.
    pub fn cancel(&mut self) {
        self.controller.cancel();
    }

    /// The node that originated the most recent accepted gesture.
    pub fn context_event_target(&self) -> Option<NodeId> {
        self.controller.context_event_target()
    }

    /// Route one delivered event to this menu's listeners.
    ///
    /// Returns `None` when the listener id belongs to someone else, so an
    /// application can offer the delivery to each of its menus in turn.
    pub fn handle_event(
        &mut self,
        listener: ListenerId,
        event: &PointerEvent,
        services: &mut MenuServices<'_>,
    ) -> Option<ActivationOutcome> {
        if listener == self.binder.gesture_listener() {
            return Some(self.controller.on_gesture(event, &mut self.base, services));
        }
        if self.controller.is_legacy() && listener == self.binder.click_listener() {
            self.controller.on_click_suppress(event, services.gateway);
            return Some(ActivationOutcome::NotApplicable);
        }
        None
    }

    pub fn gesture_listener(&self) -> ListenerId {
        self.binder.gesture_listener()
    }

    pub fn click_listener(&self) -> ListenerId {
        self.binder.click_listener()
    }

    pub fn bound_nodes(&self) -> &[NodeId] {
        self.binder.bound_nodes()
    }

    pub fn is_visible(&self) -> bool {
        self.base.is_visible()
    }

    pub fn set_items(&mut self, items: Vec<MenuItem>) {
        self.base.set_items(items);
    }

    pub fn add_item(&mut self, label: impl Into<String>) {
        self.base.add_item(label);
    }

    pub fn base(&self) -> &Menu {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut Menu {
        &mut self.base
    }

    pub fn render(&self, frame: &mut UiFrame<'_>) {
        self.base.render(frame);
    }
}

impl MenuWidget for ContextMenu {
    /// Declares the base schema plus exactly one extra property: `trigger`.
    fn init_default_config(&mut self) {
        self.base.init_default_config();
        self.base.cfg.add_property(config::TRIGGER, ConfigValue::None);
    }

    fn init_events(&mut self) {
        self.base.init_events();
        // The trigger notification lives in the controller and is
        // constructed with it.
    }

    fn init(&mut self, services: &mut MenuServices<'_>) {
        self.init_with(Vec::new(), services);
    }

    fn show(&mut self, services: &mut MenuServices<'_>) {
        self.base.show(services);
    }

    /// Listeners are released before the surface node is removed, so no
    /// attachment can outlive the node it points at.
    fn destroy(&mut self, services: &mut MenuServices<'_>) {
        self.binder.set_trigger(None, services.tree, services.gateway);
        self.base.destroy(services);
    }
}
