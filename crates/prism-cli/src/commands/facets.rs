use prism_pipeline::FilterFacets;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `prism facets`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&FilterFacets::from_entries(ctx.entries.iter()), flags.format)
}
