//! One browsing session: entry store, query, mounted view and selection.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use prism_core::EntryCollection;
use prism_core::entities::PracticeEntry;
use prism_core::enums::ViewCategory;
use prism_core::projection::flatten_questions;
use prism_core::query::SortConfig;
use prism_dispatch::{
    ActionSink, BaseProps, BuiltinVariants, Dispatcher, EntryFamily, Phase, QuestionFamily,
    QuestionProps, Rendered, TimelineFamily, TimelineProps, VariantSource, ViewAction, ViewFamily,
};
use prism_pipeline::{Clock, DerivationCache, PipelineError, QueryState, SystemClock};
use prism_registry::ViewRegistry;
use prism_selection::{Key, KeyHub, SelectionCoordinator};
use tokio::sync::mpsc;

use crate::persist::{PersistedState, StateStore};

/// Variant loaders, one per category.
#[derive(Clone)]
pub struct VariantSources {
    pub entry: Arc<dyn VariantSource<EntryFamily>>,
    pub question: Arc<dyn VariantSource<QuestionFamily>>,
    pub timeline: Arc<dyn VariantSource<TimelineFamily>>,
}

impl Default for VariantSources {
    fn default() -> Self {
        Self {
            entry: Arc::new(BuiltinVariants),
            question: Arc::new(BuiltinVariants),
            timeline: Arc::new(BuiltinVariants),
        }
    }
}

#[derive(Clone, Default)]
pub struct SessionOptions {
    pub sort: SortConfig,
    pub load_timeout: Option<Duration>,
    pub sources: VariantSources,
}

enum Slot {
    Entry(Dispatcher<EntryFamily>),
    Question(Dispatcher<QuestionFamily>),
    Timeline(Dispatcher<TimelineFamily>),
}

fn dispatcher<F: ViewFamily>(
    registry: &Arc<ViewRegistry>,
    source: &Arc<dyn VariantSource<F>>,
    timeout: Option<Duration>,
) -> Dispatcher<F> {
    Dispatcher::new(Arc::clone(registry), Arc::clone(source)).with_load_timeout(timeout)
}

impl Slot {
    fn new(
        category: ViewCategory,
        registry: &Arc<ViewRegistry>,
        sources: &VariantSources,
        timeout: Option<Duration>,
    ) -> Self {
        match category {
            ViewCategory::Entry => Self::Entry(dispatcher(registry, &sources.entry, timeout)),
            ViewCategory::Question => {
                Self::Question(dispatcher(registry, &sources.question, timeout))
            }
            ViewCategory::Timeline => {
                Self::Timeline(dispatcher(registry, &sources.timeline, timeout))
            }
        }
    }

    const fn category(&self) -> ViewCategory {
        match self {
            Self::Entry(_) => ViewCategory::Entry,
            Self::Question(_) => ViewCategory::Question,
            Self::Timeline(_) => ViewCategory::Timeline,
        }
    }

    fn resolve(&mut self, id: u32) -> u64 {
        match self {
            Self::Entry(d) => d.resolve(id),
            Self::Question(d) => d.resolve(id),
            Self::Timeline(d) => d.resolve(id),
        }
    }

    async fn settle(&mut self) {
        match self {
            Self::Entry(d) => d.settle().await,
            Self::Question(d) => d.settle().await,
            Self::Timeline(d) => d.settle().await,
        }
    }

    const fn phase(&self) -> Phase {
        match self {
            Self::Entry(d) => d.phase(),
            Self::Question(d) => d.phase(),
            Self::Timeline(d) => d.phase(),
        }
    }
}

/// A rendered screen: header, mounted view output, optional detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub header: String,
    pub phase: Phase,
    pub body: String,
    pub detail: Option<String>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f, "{}", "-".repeat(self.header.chars().count()))?;
        write!(f, "{}", self.body)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n\n-- detail --\n{detail}")?;
        }
        Ok(())
    }
}

pub struct ViewSession {
    registry: Arc<ViewRegistry>,
    entries: EntryCollection,
    query: QueryState,
    cache: DerivationCache,
    selection: SelectionCoordinator,
    keys: KeyHub,
    slot: Slot,
    variant_id: Option<u32>,
    sources: VariantSources,
    load_timeout: Option<Duration>,
    actions: ActionSink,
    action_rx: mpsc::UnboundedReceiver<ViewAction>,
    clock: Arc<dyn Clock + Send + Sync>,
    store: Option<Arc<dyn StateStore>>,
}

impl ViewSession {
    /// A session over `entries` with nothing mounted yet. Call
    /// [`Self::restore`] and/or [`Self::switch_view`] next.
    #[must_use]
    pub fn new(entries: EntryCollection, registry: Arc<ViewRegistry>, options: SessionOptions) -> Self {
        let keys = KeyHub::new();
        let (actions, action_rx) = ActionSink::channel();
        let slot = Slot::new(
            ViewCategory::Entry,
            &registry,
            &options.sources,
            options.load_timeout,
        );
        Self {
            registry,
            entries,
            query: QueryState::new(options.sort),
            cache: DerivationCache::new(),
            selection: SelectionCoordinator::new(keys.clone()),
            keys,
            slot,
            variant_id: None,
            sources: options.sources,
            load_timeout: options.load_timeout,
            actions,
            action_rx,
            clock: Arc::new(SystemClock),
            store: None,
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn StateStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    // -- accessors -----------------------------------------------------------

    #[must_use]
    pub const fn entries(&self) -> &EntryCollection {
        &self.entries
    }

    #[must_use]
    pub const fn query(&self) -> &QueryState {
        &self.query
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionCoordinator {
        &self.selection
    }

    #[must_use]
    pub const fn keys(&self) -> &KeyHub {
        &self.keys
    }

    #[must_use]
    pub const fn category(&self) -> ViewCategory {
        self.slot.category()
    }

    #[must_use]
    pub const fn variant_id(&self) -> Option<u32> {
        self.variant_id
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.slot.phase()
    }

    #[must_use]
    pub const fn recompute_count(&self) -> u64 {
        self.cache.recompute_count()
    }

    /// Sink handed to variants; exposed so embedders can inject actions.
    #[must_use]
    pub const fn actions(&self) -> &ActionSink {
        &self.actions
    }

    // -- persistence ---------------------------------------------------------

    #[must_use]
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            category: self.category(),
            variant_id: self
                .variant_id
                .or_else(|| self.registry.first_id(self.category()))
                .unwrap_or(1),
            selected_id: self.selection.selected_id().map(str::to_owned),
            filters: self.query.filters().clone(),
            sort: self.query.sort(),
        }
    }

    /// Read the store once and apply what it holds. Returns whether a state
    /// was applied. Unreadable or invalid state is logged and ignored.
    pub fn restore(&mut self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };
        let state = match store.load() {
            Ok(Some(state)) => state,
            Ok(None) => return false,
            Err(error) => {
                tracing::warn!(%error, "could not read saved view state");
                return false;
            }
        };

        let query = match QueryState::from_parts(state.filters, state.sort) {
            Ok(query) => query,
            Err(error) => {
                tracing::warn!(%error, "discarding saved view state with invalid filters");
                return false;
            }
        };
        self.query = query;
        self.query.refresh_date_presets(&*self.clock);

        match state.selected_id {
            Some(id) if self.entries.contains(&id) => self.selection.restore(Some(id)),
            Some(id) => tracing::debug!(%id, "saved selection no longer in store"),
            None => {}
        }

        self.mount(state.category, state.variant_id);
        true
    }

    fn save(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(error) = store.save(&self.snapshot()) {
            tracing::warn!(%error, "failed to save view state");
        }
    }

    // -- view switching ------------------------------------------------------

    /// Mount variant `id` of `category`. Returns the request generation.
    pub fn switch_view(&mut self, category: ViewCategory, id: u32) -> u64 {
        let generation = self.mount(category, id);
        self.save();
        generation
    }

    fn mount(&mut self, category: ViewCategory, id: u32) -> u64 {
        if self.slot.category() != category {
            self.slot = Slot::new(category, &self.registry, &self.sources, self.load_timeout);
        }
        self.variant_id = Some(id);
        self.slot.resolve(id)
    }

    /// Wait for the mounted view to leave Loading.
    pub async fn settle(&mut self) {
        self.slot.settle().await;
    }

    // -- query ---------------------------------------------------------------

    /// Apply a query mutation. The closure works on a copy, so a rejected
    /// mutation leaves the query as it was and is not saved.
    ///
    /// # Errors
    ///
    /// Propagates the `PipelineError` returned by `update`.
    pub fn update_query<F>(&mut self, update: F) -> Result<(), PipelineError>
    where
        F: FnOnce(&mut QueryState, &dyn Clock) -> Result<(), PipelineError>,
    {
        let mut next = self.query.clone();
        update(&mut next, &*self.clock)?;
        self.query = next;
        self.save();
        Ok(())
    }

    /// Re-resolve date presets against the clock. Returns whether any moved.
    pub fn refresh_date_presets(&mut self) -> bool {
        self.query.refresh_date_presets(&*self.clock)
    }

    /// The filtered, sorted entries for the current query.
    pub fn derived(&mut self) -> Arc<[PracticeEntry]> {
        self.cache
            .get_or_derive(&self.entries, self.query.filters(), self.query.sort())
    }

    /// Swap in new store contents. A selection whose entry disappeared is
    /// cleared.
    pub fn replace_entries(&mut self, entries: EntryCollection) {
        self.entries = entries;
        if self.selection.reconcile(self.entries.as_slice()) {
            self.save();
        }
    }

    // -- selection -----------------------------------------------------------

    pub fn select(&mut self, id: impl Into<String>) {
        self.selection.select(id);
        self.save();
    }

    pub fn close_panel(&mut self) {
        self.selection.close();
    }

    /// Deliver a key press to whoever is listening for it.
    pub fn press(&mut self, key: Key) -> bool {
        if !self.keys.is_listening(key) {
            return false;
        }
        self.selection.handle_key(key)
    }

    /// Apply every action the mounted view emitted. Returns how many were
    /// applied.
    pub fn apply_actions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            match action {
                ViewAction::Select(id) if self.entries.contains(&id) => {
                    self.selection.select(id);
                }
                ViewAction::Select(id) => {
                    tracing::warn!(%id, "view selected an unknown entry; ignored");
                    continue;
                }
                ViewAction::ChangeSort(sort) => self.query.set_sort(sort),
            }
            applied += 1;
        }
        if applied > 0 {
            self.save();
        }
        applied
    }

    // -- rendering -----------------------------------------------------------

    pub fn render(&mut self) -> Frame {
        let derived = self.derived();
        let selected = self.selection.selected_id();
        let rendered: Rendered = match &mut self.slot {
            Slot::Entry(d) => d.render(&BaseProps::new(&derived, selected, &self.actions)),
            Slot::Question(d) => {
                let questions = flatten_questions(derived.iter());
                d.render(&QuestionProps {
                    base: BaseProps::new(&derived, selected, &self.actions),
                    questions: &questions,
                })
            }
            Slot::Timeline(d) => d.render(&TimelineProps {
                base: BaseProps::new(&derived, selected, &self.actions),
                sort: self.query.sort(),
            }),
        };

        Frame {
            header: self.header(derived.len()),
            phase: rendered.phase,
            body: rendered.body,
            detail: self.detail(),
        }
    }

    fn header(&self, shown: usize) -> String {
        let category = self.category();
        let view = match self.variant_id {
            Some(id) => match self.registry.get(category, id) {
                Some(descriptor) => format!("#{id} {}", descriptor.name),
                None => format!("#{id} (unregistered)"),
            },
            None => "(none)".to_owned(),
        };
        let filtered = if self.query.filters().is_active() {
            " | filtered"
        } else {
            ""
        };
        format!(
            "{category} view {view} | {shown} of {} entries | sort {}{filtered}",
            self.entries.len(),
            self.query.sort()
        )
    }

    fn detail(&self) -> Option<String> {
        if !self.selection.is_open() {
            return None;
        }
        let entry = self.entries.get(self.selection.selected_id()?)?;
        Some(format!(
            "{}  {} / {}\naccuracy {}%  time {}m  pace {}  difficulty {}\ncompleted {}\nquestions {}/{} correct, {} total",
            entry.id,
            entry.subject,
            entry.entry_type,
            entry.accuracy,
            entry.time_used_minutes(),
            entry.pace,
            entry.difficulty,
            entry.date_completed.to_rfc3339(),
            entry.correct_count(),
            entry.answered_count(),
            entry.question_count(),
        ))
    }
}
