//! # prism-selection
//!
//! Tracks which entry is selected and whether its detail panel is open.
//!
//! The panel can only be open while an entry is selected. While it is open
//! the coordinator holds an Escape listener on the shared [`KeyHub`]; the
//! listener is an RAII guard, so closing the panel detaches it.

mod coordinator;
mod keys;

pub use coordinator::SelectionCoordinator;
pub use keys::{Key, KeyHub, KeyListenerGuard};
