//! Per-category view contracts.
//!
//! Every variant receives the base capability set: the derived entries, the
//! selected id and an action sink for `on_select`. Question and timeline
//! variants get a category-specific extension on top. Variants return the
//! rendered text or a [`RenderError`]; nothing else of their output is used.

use prism_core::entities::PracticeEntry;
use prism_core::enums::ViewCategory;
use prism_core::projection::FlattenedQuestion;
use prism_core::query::SortConfig;

use crate::action::ActionSink;
use crate::error::RenderError;

/// Props shared by every variant in every category.
#[derive(Debug, Clone, Copy)]
pub struct BaseProps<'a> {
    pub entries: &'a [PracticeEntry],
    pub selected_id: Option<&'a str>,
    pub actions: &'a ActionSink,
}

impl<'a> BaseProps<'a> {
    #[must_use]
    pub const fn new(
        entries: &'a [PracticeEntry],
        selected_id: Option<&'a str>,
        actions: &'a ActionSink,
    ) -> Self {
        Self {
            entries,
            selected_id,
            actions,
        }
    }

    pub fn on_select(&self, id: impl Into<String>) {
        self.actions.on_select(id);
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id == Some(id)
    }
}

/// Question variants also see every question of the derived entries.
#[derive(Debug, Clone, Copy)]
pub struct QuestionProps<'a> {
    pub base: BaseProps<'a>,
    pub questions: &'a [FlattenedQuestion<'a>],
}

/// Timeline variants see the active ordering and may ask to change it.
#[derive(Debug, Clone, Copy)]
pub struct TimelineProps<'a> {
    pub base: BaseProps<'a>,
    pub sort: SortConfig,
}

impl TimelineProps<'_> {
    pub fn on_sort_change(&self, sort: SortConfig) {
        self.base.actions.on_sort_change(sort);
    }
}

pub trait EntryView: Send + Sync {
    /// # Errors
    ///
    /// Returns `RenderError` when the variant cannot draw the given props.
    fn render(&self, props: &BaseProps<'_>) -> Result<String, RenderError>;
}

pub trait QuestionView: Send + Sync {
    /// # Errors
    ///
    /// Returns `RenderError` when the variant cannot draw the given props.
    fn render(&self, props: &QuestionProps<'_>) -> Result<String, RenderError>;
}

pub trait TimelineView: Send + Sync {
    /// # Errors
    ///
    /// Returns `RenderError` when the variant cannot draw the given props.
    fn render(&self, props: &TimelineProps<'_>) -> Result<String, RenderError>;
}

/// Ties a category to its view trait and props so one [`Dispatcher`]
/// implementation serves all three.
///
/// [`Dispatcher`]: crate::Dispatcher
pub trait ViewFamily: Send + Sync + 'static {
    const CATEGORY: ViewCategory;

    type View: ?Sized + Send + Sync + 'static;

    type Props<'a>
    where
        Self: 'a;

    /// # Errors
    ///
    /// Propagates the variant's `RenderError`.
    fn render(view: &Self::View, props: &Self::Props<'_>) -> Result<String, RenderError>;

    fn base<'p, 'a>(props: &'p Self::Props<'a>) -> &'p BaseProps<'a>;
}

#[derive(Debug, Clone, Copy)]
pub struct EntryFamily;

impl ViewFamily for EntryFamily {
    const CATEGORY: ViewCategory = ViewCategory::Entry;
    type View = dyn EntryView;
    type Props<'a> = BaseProps<'a>;

    fn render(view: &Self::View, props: &Self::Props<'_>) -> Result<String, RenderError> {
        view.render(props)
    }

    fn base<'p, 'a>(props: &'p Self::Props<'a>) -> &'p BaseProps<'a> {
        props
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QuestionFamily;

impl ViewFamily for QuestionFamily {
    const CATEGORY: ViewCategory = ViewCategory::Question;
    type View = dyn QuestionView;
    type Props<'a> = QuestionProps<'a>;

    fn render(view: &Self::View, props: &Self::Props<'_>) -> Result<String, RenderError> {
        view.render(props)
    }

    fn base<'p, 'a>(props: &'p Self::Props<'a>) -> &'p BaseProps<'a> {
        &props.base
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimelineFamily;

impl ViewFamily for TimelineFamily {
    const CATEGORY: ViewCategory = ViewCategory::Timeline;
    type View = dyn TimelineView;
    type Props<'a> = TimelineProps<'a>;

    fn render(view: &Self::View, props: &Self::Props<'_>) -> Result<String, RenderError> {
        view.render(props)
    }

    fn base<'p, 'a>(props: &'p Self::Props<'a>) -> &'p BaseProps<'a> {
        &props.base
    }
}
