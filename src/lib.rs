//! Context-menu widgets for terminal shells.
//!
//! The crate centers on the trigger-to-display pipeline: bind a set of
//! trigger nodes, normalize the secondary-action gesture across terminal
//! emulators, give observers a synchronous chance to veto, then position
//! and show the menu at the pointer.
//!
//! ```no_run
//! use term_menu::event::Capabilities;
//! use term_menu::gateway::DispatchGateway;
//! use term_menu::menu::{ContextMenu, MenuServices, MenuWidget};
//! use term_menu::node::{NodeTree, Trigger};
//! use term_menu::registry::MenuRegistry;
//!
//! let mut gateway = DispatchGateway::new();
//! let mut tree = NodeTree::new();
//! let mut registry = MenuRegistry::new();
//! let pane = tree
//!     .insert_named("pane", ratatui::layout::Rect::new(0, 0, 40, 10))
//!     .unwrap();
//!
//! let mut services = MenuServices {
//!     gateway: &mut gateway,
//!     tree: &mut tree,
//!     registry: &mut registry,
//! };
//! let mut menu = ContextMenu::new("demo", Capabilities::detect(), &mut services);
//! menu.init(&mut services);
//! menu.add_item("Copy");
//! menu.configure_trigger(Some(Trigger::node(pane)), &mut services);
//! ```

pub mod config;
pub mod constants;
pub mod drivers;
pub mod event;
pub mod event_loop;
pub mod gateway;
pub mod menu;
pub mod node;
pub mod registry;
pub mod signal;
pub mod tracing_sub;
pub mod ui;

pub use event::{Capabilities, EventName, PointerEvent};
pub use gateway::{Delivery, DispatchGateway, EventGateway, ListenerId};
pub use menu::{ActivationOutcome, ContextMenu, Menu, MenuItem, MenuServices, MenuWidget};
pub use node::{NodeId, NodeTree, Trigger, TriggerRef};
pub use registry::MenuRegistry;
pub use signal::{Activation, Notification};
