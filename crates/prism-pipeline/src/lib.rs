//! # prism-pipeline
//!
//! Derives the visible entry list from the entry store and the current query.
//!
//! - [`filter`]: per-dimension predicates, AND across dimensions, OR within one
//! - [`sort`]: stable comparator over the sortable fields
//! - [`derive()`]: the pure `filter + sort` function
//! - [`DerivationCache`]: memoizes `derive` on (collection identity, filters, sort)
//! - [`QueryState`]: the mutation boundary; invalid ranges and sort keys are
//!   rejected before they are stored
//! - [`FilterFacets`]: distinct values and observed bounds for filter widgets

mod cache;
mod clock;
mod derive;
mod error;
mod facets;
pub mod filter;
pub mod sort;
mod state;

pub use cache::DerivationCache;
pub use clock::{Clock, FixedClock, SystemClock};
pub use derive::{derive, derive_refs};
pub use error::PipelineError;
pub use facets::FilterFacets;
pub use state::QueryState;
