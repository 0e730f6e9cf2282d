use prism_core::projection::flatten_questions;
use prism_pipeline::derive_refs;

use crate::cli::{GlobalFlags, QueryArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `prism questions`: every question of the derived entries, in
/// entry order.
pub fn handle(args: &QueryArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let query = ctx.query_state(&args.to_patch()?)?;
    let visible = derive_refs(ctx.entries.as_slice(), query.filters(), query.sort());
    let mut questions = flatten_questions(visible);
    questions.truncate(ctx.limit(flags.limit)?);
    output(&questions, flags.format)
}
