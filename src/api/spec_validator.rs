use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

use crate::core::SelectionDefinition;
use crate::error::{BridgeError, BridgeResult};

/// Checks the structural preconditions a chart spec must meet before dispatch.
///
/// Only the top-level `selection` mapping is inspected. Unknown keys, marks,
/// encodings, and selection kinds pass through untouched.
pub fn validate_spec(spec: &Value) -> BridgeResult<&Value> {
    let selections = selection_entries(spec)?;

    for (name, entry) in selections {
        let definition = SelectionDefinition::from_json(entry);
        trace!(selection = %name, kind = ?definition.kind, "validate selection");
        if !definition.is_adequately_projected() {
            return Err(BridgeError::UnprojectedSelection {
                name: name.clone(),
                kind: definition
                    .kind
                    .map_or_else(String::new, |kind| kind.to_string()),
            });
        }
    }

    Ok(spec)
}

/// Parses every selection entry of a spec into its typed view.
pub fn selection_definitions(spec: &Value) -> BridgeResult<IndexMap<String, SelectionDefinition>> {
    Ok(selection_entries(spec)?
        .iter()
        .map(|(name, entry)| (name.clone(), SelectionDefinition::from_json(entry)))
        .collect())
}

fn selection_entries(spec: &Value) -> BridgeResult<&serde_json::Map<String, Value>> {
    spec.get("selection")
        .and_then(Value::as_object)
        .filter(|selections| !selections.is_empty())
        .ok_or(BridgeError::MissingSelection)
}
