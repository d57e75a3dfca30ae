use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

/// Interaction style of a selection definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    /// One discrete value per projected dimension.
    Single,
    /// A set of discrete values per projected dimension.
    Multi,
    /// A continuous `[low, high]` range per projected dimension (brush).
    Interval,
}

impl SelectionKind {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "single" => Some(Self::Single),
            "multi" => Some(Self::Multi),
            "interval" => Some(Self::Interval),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
            Self::Interval => "interval",
        }
    }

    /// Discrete kinds report values instead of ranges and must be projected.
    #[must_use]
    pub fn is_discrete(self) -> bool {
        matches!(self, Self::Single | Self::Multi)
    }
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding channels and data fields a selection reports values for.
///
/// The typed lists only keep string entries. Whether the raw spec declared a
/// non-empty list is tracked separately, so entries of other shapes still
/// count as a projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encodings: Option<SmallVec<[String; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<SmallVec<[String; 2]>>,
    #[serde(skip)]
    declared: bool,
}

impl Projection {
    #[must_use]
    pub fn new(
        encodings: Option<SmallVec<[String; 2]>>,
        fields: Option<SmallVec<[String; 2]>>,
    ) -> Self {
        Self {
            encodings,
            fields,
            declared: false,
        }
    }

    /// Returns `true` when either list is non-empty, counting raw entries
    /// that are not strings.
    #[must_use]
    pub fn is_projected(&self) -> bool {
        let non_empty = |list: &Option<SmallVec<[String; 2]>>| {
            list.as_ref().is_some_and(|items| !items.is_empty())
        };
        self.declared || non_empty(&self.encodings) || non_empty(&self.fields)
    }

    /// Encodings followed by fields, in declaration order.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.encodings
            .iter()
            .chain(self.fields.iter())
            .flat_map(|list| list.iter().map(String::as_str))
    }
}

/// Typed view over one entry of a chart spec's `selection` mapping.
///
/// Parsing is lenient: the selection grammar is open-ended, so unknown keys
/// are ignored and an unknown `type` yields `kind == None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDefinition {
    pub kind: Option<SelectionKind>,
    pub projection: Projection,
    pub trigger_event: Option<String>,
    pub empty_policy: Option<String>,
}

impl SelectionDefinition {
    /// Reads a selection entry in either the nested `projection` form or the
    /// flat Vega-Lite form with `encodings`/`fields` on the entry itself.
    #[must_use]
    pub fn from_json(entry: &Value) -> Self {
        let Some(map) = entry.as_object() else {
            return Self::default();
        };

        let kind = map
            .get("type")
            .or_else(|| map.get("kind"))
            .and_then(Value::as_str)
            .and_then(SelectionKind::parse);

        let nested = map.get("projection").and_then(Value::as_object);
        let raw = |key: &str| {
            nested
                .and_then(|projection| projection.get(key))
                .or_else(|| map.get(key))
        };
        let declared = ["encodings", "fields"].into_iter().any(|key| {
            raw(key)
                .and_then(Value::as_array)
                .is_some_and(|items| !items.is_empty())
        });
        let projection = Projection {
            encodings: raw("encodings").and_then(string_list),
            fields: raw("fields").and_then(string_list),
            declared,
        };

        Self {
            kind,
            projection,
            trigger_event: map
                .get("on")
                .or_else(|| map.get("triggerEvent"))
                .and_then(Value::as_str)
                .map(str::to_owned),
            empty_policy: map
                .get("empty")
                .or_else(|| map.get("emptyPolicy"))
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }

    /// Returns `true` when this definition satisfies the projection rule:
    /// single and multi selections need at least one encoding or field.
    #[must_use]
    pub fn is_adequately_projected(&self) -> bool {
        match self.kind {
            Some(kind) if kind.is_discrete() => self.projection.is_projected(),
            _ => true,
        }
    }
}

fn string_list(value: &Value) -> Option<SmallVec<[String; 2]>> {
    value.as_array().map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flat_and_nested_projection_forms_are_equivalent() {
        let flat = SelectionDefinition::from_json(&json!({
            "type": "multi", "encodings": ["x"], "empty": "none"
        }));
        let nested = SelectionDefinition::from_json(&json!({
            "kind": "multi", "projection": {"encodings": ["x"]}, "emptyPolicy": "none"
        }));
        assert_eq!(flat, nested);
        assert_eq!(flat.projection.dimensions().collect::<Vec<_>>(), ["x"]);
    }

    #[test]
    fn non_string_projection_entries_still_count() {
        let definition = SelectionDefinition::from_json(&json!({
            "type": "multi", "fields": [0]
        }));
        assert!(definition.is_adequately_projected());
        assert_eq!(definition.projection.dimensions().count(), 0);

        let empty = SelectionDefinition::from_json(&json!({"type": "multi", "fields": []}));
        assert!(!empty.is_adequately_projected());
    }

    #[test]
    fn unknown_kind_is_not_rejected() {
        let definition = SelectionDefinition::from_json(&json!({"type": "lasso"}));
        assert_eq!(definition.kind, None);
        assert!(definition.is_adequately_projected());
    }
}
