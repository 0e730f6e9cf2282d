//! # prism-registry
//!
//! Catalog of every rendering strategy, keyed by `(category, variant id)`.
//!
//! This crate provides:
//! - `ViewRegistry`: the single owned catalog of `ViewDescriptor`s
//! - `ensure_*_views_registered`: idempotent, ordered bootstrap steps that
//!   register each category's built-in descriptors
//!
//! ## Architecture
//!
//! The registry is built once during startup and then shared read-only
//! (typically behind an `Arc`) with the dispatcher and the picker. Only
//! descriptors live here; implementations are resolved lazily by
//! `prism-dispatch`.

mod catalog;
mod error;
mod registry;

pub use catalog::{
    ensure_all_views_registered, ensure_entry_views_registered, ensure_question_views_registered,
    ensure_timeline_views_registered,
};
pub use error::RegistryError;
pub use registry::{RegistrationOutcome, ViewRegistry};
