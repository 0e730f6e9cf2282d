//! Built-in descriptor catalog and the per-category bootstrap steps.
//!
//! Each `ensure_*_views_registered` call registers its category's descriptors
//! once per registry; repeated calls are no-ops. Startup code calls all three
//! (or [`ensure_all_views_registered`]) before any picker is shown.

use prism_core::entities::ViewDescriptor;
use prism_core::enums::ViewCategory;

use crate::registry::{RegistrationOutcome, ViewRegistry};

struct CatalogItem {
    id: u32,
    name: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
    experimental: bool,
}

const ENTRY_VIEWS: &[CatalogItem] = &[
    CatalogItem {
        id: 1,
        name: "Card List",
        description: "One line per session with subject, score and date",
        tags: &["list", "compact"],
        experimental: false,
    },
    CatalogItem {
        id: 2,
        name: "Data Table",
        description: "Aligned columns for every sortable field",
        tags: &["grid", "table"],
        experimental: false,
    },
    CatalogItem {
        id: 3,
        name: "Subject Board",
        description: "Kanban-style columns grouped by subject",
        tags: &["kanban", "grouped"],
        experimental: false,
    },
    CatalogItem {
        id: 4,
        name: "Scoreboard",
        description: "Aggregate accuracy and time per subject",
        tags: &["summary"],
        experimental: false,
    },
    CatalogItem {
        id: 5,
        name: "Celestial Map",
        description: "Sessions plotted as stars sized by question count",
        tags: &["decorative"],
        experimental: true,
    },
    CatalogItem {
        id: 6,
        name: "Manuscript",
        description: "Illuminated-page rendering of each session",
        tags: &["decorative"],
        experimental: true,
    },
];

const QUESTION_VIEWS: &[CatalogItem] = &[
    CatalogItem {
        id: 1,
        name: "Question Ledger",
        description: "Every question with its set, topic and outcome",
        tags: &["list", "compact"],
        experimental: false,
    },
    CatalogItem {
        id: 2,
        name: "Topic Breakdown",
        description: "Correct/total counts grouped by topic",
        tags: &["grouped", "summary"],
        experimental: false,
    },
    CatalogItem {
        id: 3,
        name: "Accuracy Heatmap",
        description: "Topic by difficulty grid shaded by accuracy",
        tags: &["decorative", "grid"],
        experimental: true,
    },
];

const TIMELINE_VIEWS: &[CatalogItem] = &[
    CatalogItem {
        id: 1,
        name: "Chronicle",
        description: "Sessions in date order with running position",
        tags: &["list", "chronological"],
        experimental: false,
    },
    CatalogItem {
        id: 2,
        name: "Day Calendar",
        description: "Sessions bucketed by calendar day",
        tags: &["calendar", "grouped"],
        experimental: false,
    },
    CatalogItem {
        id: 3,
        name: "River of Time",
        description: "Flowing band whose width tracks daily volume",
        tags: &["decorative", "chronological"],
        experimental: true,
    },
];

const fn catalog(category: ViewCategory) -> &'static [CatalogItem] {
    match category {
        ViewCategory::Entry => ENTRY_VIEWS,
        ViewCategory::Question => QUESTION_VIEWS,
        ViewCategory::Timeline => TIMELINE_VIEWS,
    }
}

fn ensure_registered(registry: &mut ViewRegistry, category: ViewCategory) -> usize {
    if !registry.mark_bootstrapped(category) {
        tracing::debug!(%category, "views already registered");
        return 0;
    }

    let inserted = catalog(category)
        .iter()
        .map(|item| {
            let mut descriptor = ViewDescriptor::new(category, item.id, item.name, item.description)
                .with_tags(item.tags.iter().copied());
            if item.experimental {
                descriptor = descriptor.experimental();
            }
            registry.register(descriptor)
        })
        .filter(|outcome| *outcome == RegistrationOutcome::Inserted)
        .count();

    tracing::debug!(%category, inserted, "registered built-in views");
    inserted
}

/// Register the per-entry views. Returns the number of newly inserted descriptors.
pub fn ensure_entry_views_registered(registry: &mut ViewRegistry) -> usize {
    ensure_registered(registry, ViewCategory::Entry)
}

/// Register the per-question views. Returns the number of newly inserted descriptors.
pub fn ensure_question_views_registered(registry: &mut ViewRegistry) -> usize {
    ensure_registered(registry, ViewCategory::Question)
}

/// Register the timeline views. Returns the number of newly inserted descriptors.
pub fn ensure_timeline_views_registered(registry: &mut ViewRegistry) -> usize {
    ensure_registered(registry, ViewCategory::Timeline)
}

/// Run every category's bootstrap step in a fixed order.
pub fn ensure_all_views_registered(registry: &mut ViewRegistry) -> usize {
    ensure_entry_views_registered(registry)
        + ensure_question_views_registered(registry)
        + ensure_timeline_views_registered(registry)
}
