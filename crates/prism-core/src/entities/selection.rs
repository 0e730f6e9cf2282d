use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which entry is selected and whether its detail panel is showing.
///
/// `panel_open` implies `selected_entry_id.is_some()`. The id is a non-owning
/// reference into the entry store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub selected_entry_id: Option<String>,
    pub panel_open: bool,
}

impl SelectionState {
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        !self.panel_open || self.selected_entry_id.is_some()
    }
}
