//! # prism-session
//!
//! Wires the pieces together in the order data flows through them:
//! entry store, query state and derivation cache, the mounted view, and the
//! selection coordinator. Also owns the optional persistence collaborator.

mod error;
mod persist;
mod session;

pub use error::PersistError;
pub use persist::{JsonFileStore, MemoryStateStore, PersistedState, StateStore};
pub use session::{Frame, SessionOptions, VariantSources, ViewSession};
