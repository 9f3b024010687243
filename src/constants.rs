//! Shared crate-wide constants.

use crossterm::event::KeyModifiers;

/// Modifier that marks a primary-button press as a secondary action on
/// emulators without native right-button reporting (Ctrl+click).
pub const SECONDARY_ACTION_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Narrowest surface a menu will render with, including borders. Keeps
/// single-item menus from collapsing into an unclickable sliver.
pub const MIN_MENU_WIDTH: u16 = 12;

/// Horizontal padding inside the menu border, in columns, applied on each
/// side of an item label.
pub const MENU_ITEM_PADDING: u16 = 1;

/// Default event-loop poll interval for the demo binary, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 16;
