use prism_core::entities::{PracticeEntry, SelectionState};

use crate::keys::{Key, KeyHub, KeyListenerGuard};

/// Owner of the shared [`SelectionState`].
///
/// Every transition replaces the whole state in one assignment, so no
/// observer sees the panel open with nothing selected.
#[derive(Debug)]
pub struct SelectionCoordinator {
    state: SelectionState,
    hub: KeyHub,
    escape: Option<KeyListenerGuard>,
}

impl SelectionCoordinator {
    #[must_use]
    pub fn new(hub: KeyHub) -> Self {
        Self {
            state: SelectionState::default(),
            hub,
            escape: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.state.selected_entry_id.as_deref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.panel_open
    }

    /// Select `id` and open the panel.
    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        tracing::debug!(%id, "select entry");
        self.state = SelectionState {
            selected_entry_id: Some(id),
            panel_open: true,
        };
        self.sync_listener();
    }

    /// Close the panel. The selection is kept so reopening shows the same
    /// entry.
    pub fn close(&mut self) {
        if !self.state.panel_open {
            return;
        }
        tracing::debug!("close detail panel");
        self.state = SelectionState {
            selected_entry_id: self.state.selected_entry_id.take(),
            panel_open: false,
        };
        self.sync_listener();
    }

    /// Selecting the entry whose panel is already open closes it.
    pub fn toggle(&mut self, id: &str) {
        if self.state.panel_open && self.selected_id() == Some(id) {
            self.close();
        } else {
            self.select(id);
        }
    }

    /// Close and forget the selection.
    pub fn clear(&mut self) {
        tracing::debug!("clear selection");
        self.state = SelectionState::default();
        self.sync_listener();
    }

    /// Keep a restored selection without opening the panel.
    pub fn restore(&mut self, id: Option<String>) {
        self.state = SelectionState {
            selected_entry_id: id,
            panel_open: false,
        };
        self.sync_listener();
    }

    /// Clear the selection if its entry is no longer present. Returns whether
    /// anything changed.
    pub fn reconcile(&mut self, entries: &[PracticeEntry]) -> bool {
        let Some(id) = self.selected_id() else {
            return false;
        };
        if entries.iter().any(|e| e.id == id) {
            return false;
        }
        tracing::debug!(%id, "selected entry left the store");
        self.clear();
        true
    }

    /// Route a key press. Returns whether the coordinator consumed it.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if key != Key::Escape || self.escape.is_none() {
            return false;
        }
        self.close();
        true
    }

    #[must_use]
    pub const fn has_escape_listener(&self) -> bool {
        self.escape.is_some()
    }

    fn sync_listener(&mut self) {
        match (self.state.panel_open, self.escape.is_some()) {
            (true, false) => self.escape = Some(self.hub.attach(Key::Escape)),
            (false, true) => self.escape = None,
            _ => {}
        }
    }
}
