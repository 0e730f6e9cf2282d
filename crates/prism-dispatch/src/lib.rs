//! # prism-dispatch
//!
//! Resolves a `(category, variant id)` pair to a mounted view implementation.
//!
//! - [`family`] defines one view trait per category plus the props each
//!   receives. Every variant in a category accepts the same props.
//! - [`VariantSource`] is the loader seam; loads are asynchronous and may
//!   fail, hang, or panic.
//! - [`Dispatcher`] tracks a request generation so that a resolution
//!   superseded by a newer pick is aborted and, if it still arrives, ignored.
//! - [`builtin`] ships plain-text reference variants for each category.
//!
//! A missing or broken variant never surfaces as an error to the caller: the
//! dispatcher degrades to [`MountState::Fallback`] and logs a warning.

pub mod action;
pub mod builtin;
mod dispatcher;
pub mod error;
pub mod family;
mod source;

pub use action::{ActionSink, ViewAction};
pub use dispatcher::{Dispatcher, EMPTY_STATE, FallbackReason, FallbackStub, MountState, Phase, Rendered};
pub use error::{LoadError, RenderError};
pub use family::{
    BaseProps, EntryFamily, EntryView, QuestionFamily, QuestionProps, QuestionView,
    TimelineFamily, TimelineProps, TimelineView, ViewFamily,
};
pub use source::{BuiltinVariants, LoadFuture, VariantSource};
