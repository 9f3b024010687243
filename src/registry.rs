//! Menu registry: the page-wide service tracking which menus are visible.
//!
//! Created once per application and injected into each menu rather than
//! reached through a global. Each registered menu holds a shared
//! [`VisibilityHandle`]; `hide_visible` clears every handle so at most one
//! context menu is on screen after the next activation shows its own.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MenuId(u32);

/// Shared visibility flag for one menu.
///
/// The menu flips it on show/hide; the registry flips it off during
/// `hide_visible`. Single-threaded by design, hence `Rc<Cell<_>>`.
#[derive(Debug, Clone, Default)]
pub struct VisibilityHandle {
    inner: Rc<Cell<bool>>,
}

impl VisibilityHandle {
    pub fn is_visible(&self) -> bool {
        self.inner.get()
    }

    pub(crate) fn set(&self, visible: bool) {
        self.inner.set(visible);
    }
}

#[derive(Debug, Default)]
pub struct MenuRegistry {
    menus: BTreeMap<MenuId, VisibilityHandle>,
    next: u32,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> (MenuId, VisibilityHandle) {
        let id = MenuId(self.next);
        self.next += 1;
        let handle = VisibilityHandle::default();
        self.menus.insert(id, handle.clone());
        tracing::debug!(menu_id = ?id, "registered menu");
        (id, handle)
    }

    pub fn unregister(&mut self, id: MenuId) {
        self.menus.remove(&id);
    }

    /// Hide every currently visible menu.
    pub fn hide_visible(&mut self) {
        let hidden = self
            .menus
            .values()
            .filter(|handle| handle.is_visible())
            .count();
        if hidden > 0 {
            tracing::debug!(hidden, "hiding visible menus");
        }
        for handle in self.menus.values() {
            handle.set(false);
        }
    }

    pub fn visible_count(&self) -> usize {
        self.menus
            .values()
            .filter(|handle| handle.is_visible())
            .count()
    }
}
