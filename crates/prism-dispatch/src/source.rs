use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::builtin;
use crate::error::LoadError;
use crate::family::{EntryFamily, QuestionFamily, TimelineFamily, ViewFamily};

pub type LoadFuture<V> = BoxFuture<'static, Result<Arc<V>, LoadError>>;

/// Loader seam between the dispatcher and variant implementations.
///
/// A load may resolve, fail, or never finish; the dispatcher handles all
/// three.
pub trait VariantSource<F: ViewFamily>: Send + Sync {
    fn load(&self, id: u32) -> LoadFuture<F::View>;
}

/// The plain-text variants compiled into this crate. Ids without a built-in
/// implementation, such as the decorative catalog entries, fail with
/// [`LoadError::Missing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinVariants;

fn ready<F: ViewFamily>(id: u32, found: Option<Arc<F::View>>) -> LoadFuture<F::View> {
    let outcome = found.ok_or(LoadError::Missing {
        category: F::CATEGORY,
        id,
    });
    futures::future::ready(outcome).boxed()
}

impl VariantSource<EntryFamily> for BuiltinVariants {
    fn load(&self, id: u32) -> LoadFuture<<EntryFamily as ViewFamily>::View> {
        ready::<EntryFamily>(id, builtin::entry_view(id))
    }
}

impl VariantSource<QuestionFamily> for BuiltinVariants {
    fn load(&self, id: u32) -> LoadFuture<<QuestionFamily as ViewFamily>::View> {
        ready::<QuestionFamily>(id, builtin::question_view(id))
    }
}

impl VariantSource<TimelineFamily> for BuiltinVariants {
    fn load(&self, id: u32) -> LoadFuture<<TimelineFamily as ViewFamily>::View> {
        ready::<TimelineFamily>(id, builtin::timeline_view(id))
    }
}
