//! Event identifiers and pointer-event payloads.
//!
//! Exactly two terminal-dependent identifiers matter for menu activation:
//! the gesture event (a right-button press where the emulator reports it,
//! otherwise a plain left-button press used as a surrogate) and the click
//! event attached only on the surrogate path to swallow the secondary
//! action. [`Capabilities`] makes that choice once at startup; it is never
//! re-evaluated per event.

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::node::NodeId;

/// Named event classes a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventName {
    /// The native "open a context menu" gesture (right-button press).
    ContextMenu,
    /// A primary-button press; doubles as the gesture surrogate on legacy
    /// emulators.
    PointerDown,
    /// A primary-button release.
    Click,
}

/// What the hosting terminal can report, resolved once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    native_menu_event: bool,
}

impl Capabilities {
    /// Detect from the environment. `TERM_PROGRAM=Apple_Terminal` is the
    /// known emulator that swallows right-button reporting; everything else
    /// is assumed to deliver it.
    pub fn detect() -> Self {
        match std::env::var("TERM_PROGRAM") {
            Ok(program) if program == "Apple_Terminal" => Self::legacy(),
            _ => Self::native(),
        }
    }

    pub const fn native() -> Self {
        Self {
            native_menu_event: true,
        }
    }

    pub const fn legacy() -> Self {
        Self {
            native_menu_event: false,
        }
    }

    pub const fn has_native_menu_event(&self) -> bool {
        self.native_menu_event
    }

    /// The event name trigger listeners subscribe to.
    pub const fn gesture_event(&self) -> EventName {
        if self.native_menu_event {
            EventName::ContextMenu
        } else {
            EventName::PointerDown
        }
    }
}

/// A pointer event as delivered to listeners.
///
/// `sequence` identifies the dispatch the event belongs to; stopping an
/// event addresses that dispatch. `target` is the innermost node that was
/// hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub sequence: u64,
    pub name: EventName,
    pub column: u16,
    pub row: u16,
    pub modifiers: KeyModifiers,
    pub target: NodeId,
}

impl PointerEvent {
    pub fn position(&self) -> (u16, u16) {
        (self.column, self.row)
    }
}

/// Map a raw mouse event onto the event name it dispatches as, if any.
///
/// Drag, move, scroll and non-primary releases do not participate in menu
/// activation and map to `None`.
pub fn classify(kind: MouseEventKind) -> Option<EventName> {
    match kind {
        MouseEventKind::Down(MouseButton::Right) => Some(EventName::ContextMenu),
        MouseEventKind::Down(MouseButton::Left) => Some(EventName::PointerDown),
        MouseEventKind::Up(MouseButton::Left) => Some(EventName::Click),
        _ => None,
    }
}

/// Convenience for tests and drivers constructing raw events.
pub fn mouse_event(kind: MouseEventKind, column: u16, row: u16, modifiers: KeyModifiers) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers,
    }
}
