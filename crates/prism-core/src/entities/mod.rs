//! Entity structs for all Prism domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip
//! and schema export.

mod entry;
mod question;
mod selection;
mod view;

pub use entry::PracticeEntry;
pub use question::QuestionEntry;
pub use selection::SelectionState;
pub use view::ViewDescriptor;
