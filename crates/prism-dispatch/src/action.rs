//! Actions emitted by mounted variants.
//!
//! Variants never mutate shared state. They report what the user did through
//! an [`ActionSink`]; the owner of the selection and query state drains the
//! receiving end and applies each action in order.

use prism_core::query::SortConfig;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    /// The user picked an entry.
    Select(String),
    /// A timeline variant asked for a different ordering.
    ChangeSort(SortConfig),
}

/// Cloneable sending half handed to every variant through its props.
#[derive(Debug, Clone)]
pub struct ActionSink {
    tx: mpsc::UnboundedSender<ViewAction>,
}

impl ActionSink {
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ViewAction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, action: ViewAction) {
        if self.tx.send(action).is_err() {
            tracing::debug!("view action dropped; no receiver");
        }
    }

    pub fn on_select(&self, id: impl Into<String>) {
        self.emit(ViewAction::Select(id.into()));
    }

    pub fn on_sort_change(&self, sort: SortConfig) {
        self.emit(ViewAction::ChangeSort(sort));
    }
}
