use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Escape,
    Enter,
    Up,
    Down,
    Char(char),
}

#[derive(Debug, Default)]
struct Listeners {
    next_id: u64,
    attached: BTreeMap<u64, Key>,
}

/// Table of global key listeners. Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct KeyHub {
    inner: Arc<Mutex<Listeners>>,
}

impl KeyHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn listeners(&self) -> MutexGuard<'_, Listeners> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach a listener for `key`. It stays attached until the guard drops.
    #[must_use = "dropping the guard detaches the listener immediately"]
    pub fn attach(&self, key: Key) -> KeyListenerGuard {
        let mut listeners = self.listeners();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.attached.insert(id, key);
        tracing::debug!(?key, id, "key listener attached");
        KeyListenerGuard {
            hub: self.clone(),
            id,
            key,
        }
    }

    /// Whether any attached listener wants `key`.
    #[must_use]
    pub fn is_listening(&self, key: Key) -> bool {
        self.listeners().attached.values().any(|k| *k == key)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners().attached.len()
    }

    fn detach(&self, id: u64) {
        if let Some(key) = self.listeners().attached.remove(&id) {
            tracing::debug!(?key, id, "key listener detached");
        }
    }
}

/// Scoped registration on a [`KeyHub`].
#[derive(Debug)]
pub struct KeyListenerGuard {
    hub: KeyHub,
    id: u64,
    key: Key,
}

impl KeyListenerGuard {
    #[must_use]
    pub const fn key(&self) -> Key {
        self.key
    }
}

impl Drop for KeyListenerGuard {
    fn drop(&mut self) {
        self.hub.detach(self.id);
    }
}
