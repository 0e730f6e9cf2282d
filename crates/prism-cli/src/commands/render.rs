use std::sync::Arc;

use anyhow::bail;
use prism_dispatch::Phase;
use prism_session::{Frame, JsonFileStore, SessionOptions, ViewSession};
use serde::Serialize;

use crate::cli::root_commands::RenderArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FrameOutput<'a> {
    header: &'a str,
    phase: &'static str,
    body: &'a str,
    detail: Option<&'a str>,
}

impl<'a> From<&'a Frame> for FrameOutput<'a> {
    fn from(frame: &'a Frame) -> Self {
        Self {
            header: &frame.header,
            phase: phase_label(frame.phase),
            body: &frame.body,
            detail: frame.detail.as_deref(),
        }
    }
}

const fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Loading => "loading",
        Phase::Ready => "ready",
        Phase::Fallback => "fallback",
    }
}

/// Handle `prism render`. Table format prints the frame as text; json and
/// raw wrap it in an object.
pub async fn handle(args: &RenderArgs, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let frame = render_frame(args, ctx).await?;
    match flags.format {
        OutputFormat::Table => {
            println!("{frame}");
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output(&FrameOutput::from(&frame), flags.format),
    }
}

async fn render_frame(args: &RenderArgs, ctx: AppContext) -> anyhow::Result<Frame> {
    let AppContext {
        config,
        entries,
        registry,
    } = ctx;

    let options = SessionOptions {
        sort: config.query.sort_config()?,
        load_timeout: config.dispatch.load_timeout(),
        ..SessionOptions::default()
    };
    let mut session = ViewSession::new(entries, Arc::clone(&registry), options);
    if let Some(path) = (!args.no_state).then(|| config.state.resolved_path()).flatten() {
        tracing::debug!(path = %path.display(), "using saved view state");
        session = session.with_store(Arc::new(JsonFileStore::new(path)));
    }
    let restored = session.restore();

    let patch = args.query.to_patch()?;
    if !patch.is_empty() {
        session.update_query(|query, clock| patch.apply(query, clock))?;
    }

    let category = match (args.category, restored) {
        (Some(category), _) => category,
        (None, true) => session.category(),
        (None, false) => config.view.category,
    };
    let variant = args
        .variant
        .or_else(|| (restored && category == session.category()).then(|| session.variant_id()).flatten())
        .or_else(|| (category == config.view.category).then_some(config.view.variant))
        .or_else(|| registry.first_id(category))
        .unwrap_or(1);
    session.switch_view(category, variant);

    if let Some(id) = &args.select {
        if !session.entries().contains(id) {
            bail!("unknown entry id '{id}'");
        }
        session.select(id.clone());
    }

    session.settle().await;
    Ok(session.render())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use prism_config::PrismConfig;
    use prism_core::enums::ViewCategory;

    use super::*;
    use crate::cli::QueryArgs;

    const ENTRIES: &str = r#"[
        {"id": "e1", "subject": "Math", "type": "Drill", "accuracy": 50, "timeUsed": 600,
         "pace": "Fast", "difficulty": "Easy", "dateCompleted": "2026-03-01T10:00:00Z",
         "questions": [{"id": "q1", "topic": "Algebra", "difficulty": "Easy",
                        "correct": true, "timeSpent": 40}]},
        {"id": "e2", "subject": "Reading", "type": "Full Test", "accuracy": 90, "timeUsed": 3600,
         "pace": "Slow", "difficulty": "Hard", "dateCompleted": "2026-03-02T10:00:00Z"}
    ]"#;

    fn context() -> (AppContext, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ENTRIES.as_bytes()).unwrap();
        let ctx = AppContext::init(PrismConfig::default(), Some(file.path())).unwrap();
        (ctx, file)
    }

    fn args(category: Option<ViewCategory>, variant: Option<u32>) -> RenderArgs {
        RenderArgs {
            category,
            variant,
            select: None,
            no_state: true,
            query: QueryArgs::default(),
        }
    }

    #[tokio::test]
    async fn defaults_to_the_configured_view() {
        let (ctx, _file) = context();
        let frame = render_frame(&args(None, None), ctx).await.unwrap();
        assert_eq!(frame.phase, Phase::Ready);
        assert!(frame.header.starts_with("entry view #1 Card List"));
        assert!(frame.header.contains("2 of 2 entries"));
    }

    #[tokio::test]
    async fn unregistered_variant_renders_the_stub() {
        let (ctx, _file) = context();
        let frame = render_frame(&args(Some(ViewCategory::Question), Some(9999)), ctx)
            .await
            .unwrap();
        assert_eq!(frame.phase, Phase::Fallback);
        assert!(frame.body.contains("9999"));
    }

    #[tokio::test]
    async fn filters_and_selection_reach_the_frame() {
        let (ctx, _file) = context();
        let mut render_args = args(Some(ViewCategory::Entry), Some(2));
        render_args.select = Some("e1".into());
        render_args.query.accuracy = Some("..60".into());
        let frame = render_frame(&render_args, ctx).await.unwrap();
        assert!(frame.header.contains("1 of 2 entries"));
        assert!(frame.header.ends_with("| filtered"));
        assert!(frame.detail.unwrap().starts_with("e1"));
    }

    #[tokio::test]
    async fn unknown_selection_is_an_error() {
        let (ctx, _file) = context();
        let mut render_args = args(None, None);
        render_args.select = Some("e9".into());
        assert!(render_frame(&render_args, ctx).await.is_err());
    }

    #[test]
    fn frame_output_labels_the_phase() {
        let frame = Frame {
            header: "h".into(),
            phase: Phase::Fallback,
            body: "b".into(),
            detail: None,
        };
        let value = serde_json::to_value(FrameOutput::from(&frame)).unwrap();
        assert_eq!(value["phase"], "fallback");
        assert!(value["detail"].is_null());
    }
}
