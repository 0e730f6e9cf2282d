//! Variant dispatcher.
//!
//! `resolve(id)` bumps a generation counter, aborts the previous in-flight
//! load and spawns a new one. Finished loads come back over an mpsc channel
//! tagged with the generation that started them; anything older than the
//! current generation is dropped on arrival.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use prism_core::entities::ViewDescriptor;
use prism_core::enums::ViewCategory;
use prism_registry::ViewRegistry;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{LoadError, RenderError};
use crate::family::ViewFamily;
use crate::source::VariantSource;

/// Shown when the derived list is empty and the variant drew nothing.
pub const EMPTY_STATE: &str = "No matching entries";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    NotRegistered,
    NoRuntime,
    Load(LoadError),
    Render(RenderError),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRegistered => f.write_str("not registered"),
            Self::NoRuntime => f.write_str("no async runtime available"),
            Self::Load(error) => write!(f, "{error}"),
            Self::Render(error) => write!(f, "{error}"),
        }
    }
}

/// Placeholder for a variant that could not be mounted. Always carries the
/// requested id so the picker stays consistent with what is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackStub {
    pub category: ViewCategory,
    pub id: u32,
    pub name: Option<String>,
    pub reason: FallbackReason,
}

impl FallbackStub {
    fn for_descriptor(descriptor: &ViewDescriptor, reason: FallbackReason) -> Self {
        Self {
            category: descriptor.category,
            id: descriptor.id,
            name: Some(descriptor.name.clone()),
            reason,
        }
    }
}

impl fmt::Display for FallbackStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} view #{}", self.category, self.id)?;
        if let Some(name) = &self.name {
            write!(f, " \"{name}\"")?;
        }
        write!(f, " unavailable: {}]", self.reason)
    }
}

pub enum MountState<F: ViewFamily> {
    Idle,
    Loading(ViewDescriptor),
    Ready {
        descriptor: ViewDescriptor,
        view: Arc<F::View>,
    },
    Fallback(FallbackStub),
}

impl<F: ViewFamily> MountState<F> {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Loading(_) => Phase::Loading,
            Self::Ready { .. } => Phase::Ready,
            Self::Fallback(_) => Phase::Fallback,
        }
    }

    #[must_use]
    pub const fn fallback(&self) -> Option<&FallbackStub> {
        match self {
            Self::Fallback(stub) => Some(stub),
            _ => None,
        }
    }

    #[must_use]
    pub const fn descriptor(&self) -> Option<&ViewDescriptor> {
        match self {
            Self::Loading(descriptor) | Self::Ready { descriptor, .. } => Some(descriptor),
            Self::Idle | Self::Fallback(_) => None,
        }
    }
}

impl<F: ViewFamily> fmt::Debug for MountState<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Loading(descriptor) => f.debug_tuple("Loading").field(&descriptor.id).finish(),
            Self::Ready { descriptor, .. } => f
                .debug_struct("Ready")
                .field("id", &descriptor.id)
                .finish_non_exhaustive(),
            Self::Fallback(stub) => f.debug_tuple("Fallback").field(stub).finish(),
        }
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub phase: Phase,
    pub body: String,
}

struct Resolution<F: ViewFamily> {
    generation: u64,
    outcome: Result<Arc<F::View>, LoadError>,
}

pub struct Dispatcher<F: ViewFamily> {
    registry: Arc<ViewRegistry>,
    source: Arc<dyn VariantSource<F>>,
    load_timeout: Option<Duration>,
    generation: u64,
    requested: Option<u32>,
    state: MountState<F>,
    in_flight: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Resolution<F>>,
    rx: mpsc::UnboundedReceiver<Resolution<F>>,
}

impl<F: ViewFamily> Dispatcher<F> {
    #[must_use]
    pub fn new(registry: Arc<ViewRegistry>, source: Arc<dyn VariantSource<F>>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            registry,
            source,
            load_timeout: None,
            generation: 0,
            requested: None,
            state: MountState::Idle,
            in_flight: None,
            tx,
            rx,
        }
    }

    /// Loads that take longer than `timeout` degrade to Fallback.
    #[must_use]
    pub const fn with_load_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.load_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn category(&self) -> ViewCategory {
        F::CATEGORY
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn requested_id(&self) -> Option<u32> {
        self.requested
    }

    #[must_use]
    pub const fn state(&self) -> &MountState<F> {
        &self.state
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Start resolving variant `id`, superseding any earlier request.
    /// Returns the generation assigned to this request.
    ///
    /// Unregistered ids, a missing runtime and loaders that panic before
    /// returning a future all settle to Fallback immediately.
    pub fn resolve(&mut self, id: u32) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        self.cancel_in_flight();
        self.requested = Some(id);

        let Some(descriptor) = self.registry.get(F::CATEGORY, id).cloned() else {
            self.fall_back(FallbackStub {
                category: F::CATEGORY,
                id,
                name: None,
                reason: FallbackReason::NotRegistered,
            });
            return generation;
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            self.fall_back(FallbackStub::for_descriptor(&descriptor, FallbackReason::NoRuntime));
            return generation;
        };

        let load = match catch_unwind(AssertUnwindSafe(|| self.source.load(id))) {
            Ok(load) => load,
            Err(payload) => {
                let error = LoadError::Panicked(panic_message(&*payload));
                self.fall_back(FallbackStub::for_descriptor(&descriptor, FallbackReason::Load(error)));
                return generation;
            }
        };

        tracing::debug!(category = %F::CATEGORY, id, generation, "resolving view");
        let timeout = self.load_timeout;
        let tx = self.tx.clone();
        self.state = MountState::Loading(descriptor);
        self.in_flight = Some(runtime.spawn(async move {
            let guarded = AssertUnwindSafe(load).catch_unwind().map(|caught| {
                caught.unwrap_or_else(|payload| Err(LoadError::Panicked(panic_message(&*payload))))
            });
            let outcome = match timeout {
                Some(limit) => tokio::time::timeout(limit, guarded)
                    .await
                    .unwrap_or(Err(LoadError::TimedOut(limit))),
                None => guarded.await,
            };
            if tx.send(Resolution { generation, outcome }).is_err() {
                tracing::debug!(generation, "dispatcher dropped before load finished");
            }
        }));
        generation
    }

    /// Apply every finished load without waiting. Returns whether the mount
    /// state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(resolution) = self.rx.try_recv() {
            changed |= self.apply(resolution);
        }
        changed
    }

    /// Wait until the current request leaves Loading. Without a load
    /// timeout this waits for as long as the loader does.
    pub async fn settle(&mut self) {
        while self.state.phase() == Phase::Loading {
            let Some(resolution) = self.rx.recv().await else {
                return;
            };
            self.apply(resolution);
        }
    }

    /// Render the current mount state. A variant that errors or panics is
    /// replaced by its fallback stub for this and every later pass until the
    /// next `resolve`.
    pub fn render(&mut self, props: &F::Props<'_>) -> Rendered {
        self.poll();
        let (descriptor, view) = match &self.state {
            MountState::Ready { descriptor, view } => (descriptor.clone(), Arc::clone(view)),
            MountState::Idle => return rendered(Phase::Idle, String::new()),
            MountState::Loading(descriptor) => {
                let body = format!(
                    "Loading {} view #{} ({})...",
                    F::CATEGORY,
                    descriptor.id,
                    descriptor.name
                );
                return rendered(Phase::Loading, body);
            }
            MountState::Fallback(stub) => return rendered(Phase::Fallback, stub.to_string()),
        };

        let error = match catch_unwind(AssertUnwindSafe(|| F::render(&view, props))) {
            Ok(Ok(body)) => {
                if body.trim().is_empty() && F::base(props).entries.is_empty() {
                    return rendered(Phase::Ready, EMPTY_STATE.to_owned());
                }
                return rendered(Phase::Ready, body);
            }
            Ok(Err(error)) => error,
            Err(payload) => RenderError::Panicked(panic_message(&*payload)),
        };

        let stub = FallbackStub::for_descriptor(&descriptor, FallbackReason::Render(error));
        let body = stub.to_string();
        self.fall_back(stub);
        rendered(Phase::Fallback, body)
    }

    fn apply(&mut self, resolution: Resolution<F>) -> bool {
        if resolution.generation != self.generation {
            tracing::debug!(
                stale = resolution.generation,
                current = self.generation,
                "ignoring superseded view resolution"
            );
            return false;
        }
        let MountState::Loading(descriptor) = &self.state else {
            return false;
        };
        let descriptor = descriptor.clone();
        self.in_flight = None;

        match resolution.outcome {
            Ok(view) => {
                tracing::debug!(category = %F::CATEGORY, id = descriptor.id, "view ready");
                self.state = MountState::Ready { descriptor, view };
            }
            Err(error) => {
                self.fall_back(FallbackStub::for_descriptor(&descriptor, FallbackReason::Load(error)));
            }
        }
        true
    }

    fn fall_back(&mut self, stub: FallbackStub) {
        tracing::warn!(
            category = %stub.category,
            id = stub.id,
            reason = %stub.reason,
            "view unavailable; showing fallback"
        );
        self.state = MountState::Fallback(stub);
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl<F: ViewFamily> Drop for Dispatcher<F> {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

const fn rendered(phase: Phase, body: String) -> Rendered {
    Rendered { phase, body }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_owned())
}
