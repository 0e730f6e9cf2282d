use clap::{Args, Subcommand};
use prism_core::enums::ViewCategory;

use crate::cli::query::QueryArgs;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List registered view variants.
    Views(ViewsArgs),
    /// Filtered, sorted entry list.
    Entries(QueryArgs),
    /// Flattened questions of the filtered entries.
    Questions(QueryArgs),
    /// Mount a view variant and print its rendered frame.
    Render(RenderArgs),
    /// Filter values present in the entry file.
    Facets,
    /// Print the JSON Schema of a public type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ViewsArgs {
    /// Only this category (entry, question, timeline).
    #[arg(long)]
    pub category: Option<ViewCategory>,
    /// Include experimental variants.
    #[arg(long)]
    pub all: bool,
    /// Only variants carrying this tag.
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct RenderArgs {
    /// View category; defaults to the saved or configured one.
    #[arg(long)]
    pub category: Option<ViewCategory>,
    /// Variant id within the category.
    #[arg(long)]
    pub variant: Option<u32>,
    /// Open the detail panel for this entry id.
    #[arg(long)]
    pub select: Option<String>,
    /// Neither read nor write the saved view state.
    #[arg(long)]
    pub no_state: bool,
    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name, e.g. `practice_entry` or `persisted_state`.
    pub type_name: String,
}
