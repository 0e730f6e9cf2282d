use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use pretty_assertions::assert_eq;
use prism_core::entities::PracticeEntry;
use prism_dispatch::{
    ActionSink, BaseProps, BuiltinVariants, Dispatcher, EntryFamily, EntryView, FallbackReason,
    LoadError, LoadFuture, Phase, RenderError, VariantSource,
};
use prism_registry::ViewRegistry;
use tokio::sync::oneshot;

struct Echo(&'static str);

impl EntryView for Echo {
    fn render(&self, props: &BaseProps<'_>) -> Result<String, RenderError> {
        Ok(format!("{} x{}", self.0, props.entries.len()))
    }
}

struct Broken;

impl EntryView for Broken {
    fn render(&self, _props: &BaseProps<'_>) -> Result<String, RenderError> {
        Err(RenderError::Failed("canvas unavailable".into()))
    }
}

struct Explodes;

impl EntryView for Explodes {
    fn render(&self, _props: &BaseProps<'_>) -> Result<String, RenderError> {
        panic!("variant bug")
    }
}

/// Loads block until the test opens the matching gate.
#[derive(Default)]
struct Gated {
    gates: Mutex<HashMap<u32, oneshot::Receiver<()>>>,
}

impl Gated {
    fn gate(&self, id: u32) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(id, rx);
        tx
    }
}

impl VariantSource<EntryFamily> for Gated {
    fn load(&self, id: u32) -> LoadFuture<dyn EntryView> {
        let gate = self.gates.lock().unwrap().remove(&id);
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            let view: Arc<dyn EntryView> = match id {
                3 => Arc::new(Broken),
                4 => Arc::new(Explodes),
                _ => Arc::new(Echo(if id == 1 { "one" } else { "two" })),
            };
            Ok(view)
        }
        .boxed()
    }
}

struct PanickingLoader;

impl VariantSource<EntryFamily> for PanickingLoader {
    fn load(&self, _id: u32) -> LoadFuture<dyn EntryView> {
        futures::future::lazy(|_| -> Result<Arc<dyn EntryView>, LoadError> {
            panic!("loader bug")
        })
        .boxed()
    }
}

fn registry() -> Arc<ViewRegistry> {
    Arc::new(ViewRegistry::bootstrap())
}

fn render(d: &mut Dispatcher<EntryFamily>, entries: &[PracticeEntry]) -> (Phase, String) {
    let (sink, _rx) = ActionSink::channel();
    let out = d.render(&BaseProps::new(entries, None, &sink));
    (out.phase, out.body)
}

#[tokio::test]
async fn unregistered_id_falls_back_and_shows_the_id() {
    let mut d: Dispatcher<EntryFamily> = Dispatcher::new(registry(), Arc::new(BuiltinVariants));
    d.resolve(9999);
    let (phase, body) = render(&mut d, &[]);
    assert_eq!(phase, Phase::Fallback);
    assert!(body.contains("9999"));
    assert_eq!(
        d.state().fallback().unwrap().reason,
        FallbackReason::NotRegistered
    );
}

#[tokio::test]
async fn registered_but_unimplemented_falls_back_with_name() {
    let mut d: Dispatcher<EntryFamily> = Dispatcher::new(registry(), Arc::new(BuiltinVariants));
    d.resolve(5);
    d.settle().await;
    let stub = d.state().fallback().unwrap();
    assert_eq!(stub.id, 5);
    assert_eq!(stub.name.as_deref(), Some("Celestial Map"));
    assert!(matches!(
        stub.reason,
        FallbackReason::Load(LoadError::Missing { id: 5, .. })
    ));
}

#[tokio::test]
async fn states_go_loading_then_ready() {
    let source = Arc::new(Gated::default());
    let open = source.gate(1);
    let mut d = Dispatcher::new(registry(), source.clone() as Arc<dyn VariantSource<EntryFamily>>);

    d.resolve(1);
    let (phase, body) = render(&mut d, &[]);
    assert_eq!(phase, Phase::Loading);
    assert!(body.contains("Card List"));

    open.send(()).unwrap();
    d.settle().await;
    assert_eq!(render(&mut d, &[]), (Phase::Ready, "one x0".to_owned()));
}

#[tokio::test]
async fn rapid_switch_applies_only_the_latest_pick() {
    let source = Arc::new(Gated::default());
    let first_gate = source.gate(1);
    let second_gate = source.gate(2);
    let mut d = Dispatcher::new(registry(), source.clone() as Arc<dyn VariantSource<EntryFamily>>);

    d.resolve(1);
    d.resolve(2);
    // The first load was aborted; opening its gate must not matter.
    let _ = first_gate.send(());
    second_gate.send(()).unwrap();
    d.settle().await;

    assert_eq!(d.requested_id(), Some(2));
    assert_eq!(render(&mut d, &[]), (Phase::Ready, "two x0".to_owned()));
}

#[tokio::test]
async fn switching_back_and_forth_settles_on_last() {
    let mut d: Dispatcher<EntryFamily> = Dispatcher::new(registry(), Arc::new(BuiltinVariants));
    for id in [1, 2, 3, 4, 2] {
        d.resolve(id);
    }
    d.settle().await;
    assert_eq!(d.phase(), Phase::Ready);
    assert_eq!(d.state().descriptor().unwrap().id, 2);
    assert_eq!(d.generation(), 5);
}

#[tokio::test]
async fn render_error_degrades_to_fallback() {
    let source = Arc::new(Gated::default());
    let mut d = Dispatcher::new(registry(), source as Arc<dyn VariantSource<EntryFamily>>);
    d.resolve(3);
    d.settle().await;
    let (phase, body) = render(&mut d, &[]);
    assert_eq!(phase, Phase::Fallback);
    assert!(body.contains("#3"));
    assert!(body.contains("canvas unavailable"));
    // Stays on the stub until the next resolve.
    assert_eq!(d.phase(), Phase::Fallback);
}

#[tokio::test]
async fn render_panic_degrades_to_fallback() {
    let source = Arc::new(Gated::default());
    let mut d = Dispatcher::new(registry(), source as Arc<dyn VariantSource<EntryFamily>>);
    d.resolve(4);
    d.settle().await;
    let (phase, body) = render(&mut d, &[]);
    assert_eq!(phase, Phase::Fallback);
    assert!(body.contains("variant bug"));

    d.resolve(1);
    d.settle().await;
    assert_eq!(d.phase(), Phase::Ready);
}

#[tokio::test]
async fn loader_panic_degrades_to_fallback() {
    let mut d = Dispatcher::new(
        registry(),
        Arc::new(PanickingLoader) as Arc<dyn VariantSource<EntryFamily>>,
    );
    d.resolve(1);
    d.settle().await;
    assert!(matches!(
        d.state().fallback().unwrap().reason,
        FallbackReason::Load(LoadError::Panicked(_))
    ));
}

#[tokio::test]
async fn slow_load_times_out() {
    let source = Arc::new(Gated::default());
    let _never = source.gate(1);
    let mut d = Dispatcher::new(registry(), source as Arc<dyn VariantSource<EntryFamily>>)
        .with_load_timeout(Some(Duration::from_millis(20)));
    d.resolve(1);
    d.settle().await;
    assert!(matches!(
        d.state().fallback().unwrap().reason,
        FallbackReason::Load(LoadError::TimedOut(_))
    ));
}
