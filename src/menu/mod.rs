//! Popup menu widgets.
//!
//! [`Menu`] is the generic popup: identity, items, position, visibility
//! through the registry handle, lifecycle notifications, and a minimal
//! render. [`ContextMenu`] composes trigger binding and gesture activation
//! on top of it. The split mirrors the widget contract captured by
//! [`MenuWidget`]: concrete menu variants fulfill the same
//! init/show/destroy surface instead of inheriting it.

pub mod activation;
pub mod context_menu;
pub mod trigger;

pub use activation::{ActivationController, ActivationOutcome};
pub use context_menu::ContextMenu;
pub use trigger::TriggerBinder;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{self, ConfigStore, ConfigValue, PropertyKey};
use crate::constants::{MENU_ITEM_PADDING, MIN_MENU_WIDTH};
use crate::gateway::EventGateway;
use crate::node::{NodeId, NodeTree};
use crate::registry::{MenuId, MenuRegistry, VisibilityHandle};
use crate::signal::Notification;
use crate::ui::UiFrame;

/// Collaborators a menu needs while handling configuration or input.
///
/// Bundled so widget methods take one context parameter instead of three,
/// and so tests can swap the gateway for a recording fake.
pub struct MenuServices<'a> {
    pub gateway: &'a mut dyn EventGateway,
    pub tree: &'a mut NodeTree,
    pub registry: &'a mut MenuRegistry,
}

/// The widget contract shared by menu variants.
pub trait MenuWidget {
    /// Declare the configuration schema.
    fn init_default_config(&mut self);

    /// Wire up the widget's notifications.
    fn init_events(&mut self);

    /// One-time initialization after construction.
    fn init(&mut self, services: &mut MenuServices<'_>);

    /// Make the menu visible at its current position.
    fn show(&mut self, services: &mut MenuServices<'_>);

    /// Release everything the widget attached, then remove its surface.
    fn destroy(&mut self, services: &mut MenuServices<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemKind {
    #[default]
    Command,
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub kind: ItemKind,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ItemKind::Command,
        }
    }

    pub fn separator() -> Self {
        Self {
            label: String::new(),
            kind: ItemKind::Separator,
        }
    }
}

/// Generic popup menu base.
#[derive(Debug)]
pub struct Menu {
    id: MenuId,
    node: NodeId,
    name: String,
    pub cfg: ConfigStore,
    items: Vec<MenuItem>,
    default_item_kind: Option<ItemKind>,
    position: (u16, u16),
    visibility: VisibilityHandle,
    pub before_init: Notification<()>,
    pub init_event: Notification<()>,
    initialized: bool,
}

impl Menu {
    /// Register a new menu surface with the node tree and the registry.
    pub fn new(name: &str, tree: &mut NodeTree, registry: &mut MenuRegistry) -> Self {
        let (id, visibility) = registry.register();
        let node = tree.insert(Rect::default());
        Self {
            id,
            node,
            name: name.to_string(),
            cfg: ConfigStore::new(),
            items: Vec::new(),
            default_item_kind: None,
            position: (0, 0),
            visibility,
            before_init: Notification::new(),
            init_event: Notification::new(),
            initialized: false,
        }
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<MenuItem>) {
        self.items = items;
    }

    /// Append a command item using the menu's default item kind.
    pub fn add_item(&mut self, label: impl Into<String>) {
        self.items.push(MenuItem {
            label: label.into(),
            kind: self.default_item_kind.unwrap_or_default(),
        });
    }

    pub fn default_item_kind(&self) -> Option<ItemKind> {
        self.default_item_kind
    }

    pub fn set_default_item_kind(&mut self, kind: ItemKind) {
        self.default_item_kind = Some(kind);
    }

    pub fn position(&self) -> (u16, u16) {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn visibility_handle(&self) -> VisibilityHandle {
        self.visibility.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Move the menu by writing through the position property, so the
    /// change is observable in the configuration store like any other.
    pub fn move_to(&mut self, column: u16, row: u16) {
        let _ = self.cfg.set(config::POSITION, ConfigValue::Position(column, row));
        self.sync_config();
    }

    /// Drain queued configuration changes and route each to its handler.
    pub fn sync_config(&mut self) {
        for (key, value) in self.cfg.take_changes() {
            self.handle_config_change(key, value);
        }
    }

    pub(crate) fn handle_config_change(&mut self, key: PropertyKey, value: ConfigValue) {
        match (key, value) {
            (config::POSITION, ConfigValue::Position(column, row)) => {
                self.position = (column, row);
            }
            _ => {}
        }
    }

    /// The rectangle the menu occupies at its current position.
    pub fn surface_rect(&self) -> Rect {
        let label_width = self
            .items
            .iter()
            .map(|item| item.label.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let width = (label_width + 2 + MENU_ITEM_PADDING * 2).max(MIN_MENU_WIDTH);
        let height = self.items.len() as u16 + 2;
        Rect {
            x: self.position.0,
            y: self.position.1,
            width,
            height,
        }
    }

    /// Paint the menu if visible. Clipping is handled by [`UiFrame`].
    pub fn render(&self, frame: &mut UiFrame<'_>) {
        if !self.is_visible() {
            return;
        }
        let rect = self.surface_rect();
        frame.render_widget(Clear, rect);
        let block = Block::bordered().title(self.name.as_str());
        let inner_width = rect.width.saturating_sub(2) as usize;
        let lines: Vec<Line<'_>> = self
            .items
            .iter()
            .map(|item| match item.kind {
                ItemKind::Separator => Line::from("─".repeat(inner_width)),
                ItemKind::Command => Line::from(format!(
                    "{pad}{label}",
                    pad = " ".repeat(MENU_ITEM_PADDING as usize),
                    label = item.label
                )),
            })
            .collect();
        let body = Paragraph::new(lines)
            .block(block)
            .style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(body, rect);
    }
}

impl MenuWidget for Menu {
    fn init_default_config(&mut self) {
        self.cfg.add_property(config::POSITION, ConfigValue::None);
    }

    fn init_events(&mut self) {
        // The lifecycle notifications are constructed with the widget;
        // nothing extra to wire at the base level.
    }

    fn init(&mut self, _services: &mut MenuServices<'_>) {
        self.initialized = true;
    }

    fn show(&mut self, services: &mut MenuServices<'_>) {
        self.visibility.set(true);
        services.tree.set_area(self.node, self.surface_rect());
        tracing::debug!(menu = %self.name, position = ?self.position, "showing menu");
    }

    fn destroy(&mut self, services: &mut MenuServices<'_>) {
        self.visibility.set(false);
        services.registry.unregister(self.id);
        services.tree.remove(self.node);
        tracing::debug!(menu = %self.name, "destroyed menu");
    }
}
