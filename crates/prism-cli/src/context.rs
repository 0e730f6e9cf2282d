use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use prism_config::{GeneralConfig, PrismConfig};
use prism_core::EntryCollection;
use prism_pipeline::{QueryState, SystemClock};
use prism_registry::ViewRegistry;

use crate::cli::QueryPatch;

/// Everything a command needs once the entry file is loaded.
pub struct AppContext {
    pub config: PrismConfig,
    pub entries: EntryCollection,
    pub registry: Arc<ViewRegistry>,
}

impl AppContext {
    /// Load the entry file and bootstrap the view registry.
    ///
    /// # Errors
    ///
    /// Fails when no entry file is configured or it cannot be parsed.
    pub fn init(config: PrismConfig, entries_override: Option<&Path>) -> anyhow::Result<Self> {
        let path = resolve_entries_path(entries_override, &config.general)?;
        let entries = EntryCollection::load(&path)
            .with_context(|| format!("failed to load entries from {}", path.display()))?;
        tracing::debug!(path = %path.display(), count = entries.len(), "entries loaded");

        Ok(Self {
            config,
            entries,
            registry: Arc::new(ViewRegistry::bootstrap()),
        })
    }

    /// A fresh query with the configured default sort, then `patch` on top.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configured sort or a rejected patch.
    pub fn query_state(&self, patch: &QueryPatch) -> anyhow::Result<QueryState> {
        let mut query = QueryState::new(self.config.query.sort_config()?);
        patch.apply(&mut query, &SystemClock)?;
        Ok(query)
    }

    /// Effective row limit: the `--limit` flag, else `general.default_limit`.
    ///
    /// # Errors
    ///
    /// Fails only if the limit does not fit in `usize`.
    pub fn limit(&self, flag: Option<u32>) -> anyhow::Result<usize> {
        let limit = flag.unwrap_or(self.config.general.default_limit);
        Ok(usize::try_from(limit)?)
    }
}

fn resolve_entries_path(
    entries_override: Option<&Path>,
    general: &GeneralConfig,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = entries_override {
        return Ok(path.to_path_buf());
    }
    if general.has_entries_path() {
        return Ok(PathBuf::from(general.entries_path.trim()));
    }
    bail!("no entry file: pass --entries <path> or set general.entries_path")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    const ENTRIES: &str = r#"[
        {"id": "e1", "subject": "Math", "type": "Drill", "accuracy": 50, "timeUsed": 600,
         "pace": "Fast", "difficulty": "Easy", "dateCompleted": "2026-03-01T10:00:00Z"},
        {"id": "e2", "subject": "Reading", "type": "Full Test", "accuracy": 90, "timeUsed": 3600,
         "pace": "Slow", "difficulty": "Hard", "dateCompleted": "2026-03-02T10:00:00Z"}
    ]"#;

    fn entry_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ENTRIES.as_bytes()).unwrap();
        file
    }

    #[test]
    fn flag_wins_over_config() {
        let general = GeneralConfig {
            entries_path: "/from/config.json".into(),
            ..GeneralConfig::default()
        };
        let path = resolve_entries_path(Some(Path::new("/from/flag.json")), &general).unwrap();
        assert_eq!(path, PathBuf::from("/from/flag.json"));

        let path = resolve_entries_path(None, &general).unwrap();
        assert_eq!(path, PathBuf::from("/from/config.json"));
    }

    #[test]
    fn missing_entry_path_is_an_error() {
        let err = resolve_entries_path(None, &GeneralConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--entries"));
    }

    #[test]
    fn init_loads_entries_and_registry() {
        let file = entry_file();
        let ctx = AppContext::init(PrismConfig::default(), Some(file.path())).unwrap();
        assert_eq!(ctx.entries.len(), 2);
        assert!(ctx.registry.first_id(prism_core::enums::ViewCategory::Entry).is_some());
    }

    #[test]
    fn unreadable_entry_file_mentions_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = AppContext::init(PrismConfig::default(), Some(&missing))
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("nope.json"));
    }

    #[test]
    fn limit_falls_back_to_config() {
        let file = entry_file();
        let ctx = AppContext::init(PrismConfig::default(), Some(file.path())).unwrap();
        assert_eq!(ctx.limit(None).unwrap(), 50);
        assert_eq!(ctx.limit(Some(3)).unwrap(), 3);
    }
}
