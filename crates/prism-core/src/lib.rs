//! # prism-core
//!
//! Core types and error types for Prism.
//!
//! This crate provides the foundational types shared across all Prism crates:
//! - Practice entries and their questions (read-only records owned by the entry store)
//! - Subject, pace, difficulty and view-category enums
//! - View descriptors used by the registry
//! - Filter criteria and sort configuration for the derivation pipeline
//! - Selection state shared by every mounted view
//! - The flattened question projection used by question-oriented views
//! - Cross-cutting error types

pub mod collection;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod projection;
pub mod query;

pub use collection::EntryCollection;
pub use errors::CoreError;
