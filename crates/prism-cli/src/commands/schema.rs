use anyhow::bail;
use prism_core::entities::{PracticeEntry, QuestionEntry, SelectionState, ViewDescriptor};
use prism_core::query::{FilterCriteria, SortConfig};
use prism_session::PersistedState;
use schemars::schema_for;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Type names accepted by `prism schema`.
pub const SCHEMA_NAMES: [&str; 7] = [
    "practice_entry",
    "question_entry",
    "view_descriptor",
    "filter_criteria",
    "sort_config",
    "selection_state",
    "persisted_state",
];

/// Handle `prism schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(&args.type_name)?, flags.format)
}

fn schema(name: &str) -> anyhow::Result<Value> {
    let schema = match name.trim().replace('-', "_").as_str() {
        "practice_entry" => schema_for!(PracticeEntry),
        "question_entry" => schema_for!(QuestionEntry),
        "view_descriptor" => schema_for!(ViewDescriptor),
        "filter_criteria" => schema_for!(FilterCriteria),
        "sort_config" => schema_for!(SortConfig),
        "selection_state" => schema_for!(SelectionState),
        "persisted_state" => schema_for!(PersistedState),
        _ => bail!(
            "unknown schema type '{name}' (expected one of: {})",
            SCHEMA_NAMES.join(", ")
        ),
    };
    Ok(serde_json::to_value(schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_produces_an_object_schema() {
        for name in SCHEMA_NAMES {
            let value = schema(name).unwrap();
            assert!(value.get("properties").is_some(), "{name} has no properties");
        }
    }

    #[test]
    fn entry_schema_uses_wire_field_names() {
        let value = schema("practice-entry").unwrap();
        let properties = value["properties"].as_object().unwrap();
        assert!(properties.contains_key("type"));
        assert!(properties.contains_key("dateCompleted"));
        assert!(!properties.contains_key("entry_type"));
    }

    #[test]
    fn unknown_name_lists_the_choices() {
        let err = schema("entry").unwrap_err();
        assert!(err.to_string().contains("persisted_state"));
    }
}
