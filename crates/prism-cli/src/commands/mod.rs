pub mod dispatch;
pub mod entries;
pub mod facets;
pub mod questions;
pub mod render;
pub mod schema;
pub mod views;
