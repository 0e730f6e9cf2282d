use prism_config::PrismConfig;
use prism_core::entities::ViewDescriptor;
use prism_core::enums::ViewCategory;
use prism_registry::ViewRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ViewsArgs;
use crate::output::output;

/// Handle `prism views`.
pub fn handle(args: &ViewsArgs, config: &PrismConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = ViewRegistry::bootstrap();
    let limit = usize::try_from(flags.limit.unwrap_or(config.general.default_limit))?;
    let mut views = list(&registry, args, config.view.include_experimental);
    views.truncate(limit);
    output(&views, flags.format)
}

fn list(registry: &ViewRegistry, args: &ViewsArgs, include_experimental: bool) -> Vec<ViewDescriptor> {
    let include_experimental = args.all || include_experimental;
    let categories = args
        .category
        .map_or_else(|| ViewCategory::ALL.to_vec(), |category| vec![category]);

    categories
        .into_iter()
        .flat_map(|category| registry.list_visible(category, include_experimental))
        .filter(|view| args.tag.as_deref().is_none_or(|tag| view.tags.contains(tag)))
        .collect()
}
