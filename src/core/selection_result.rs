use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::selection::SelectionKind;

/// Reserved key the renderer sets to the name of the emitting selection.
pub const SELECTION_NAME_KEY: &str = "name";
/// Reserved key flagging an aggregate over several concurrent selections.
pub const MULTI_AGGREGATE_KEY: &str = "vlMulti";

/// Interpreted value of one selected dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionValue {
    Scalar(Value),
    Interval { low: f64, high: f64 },
    Values(Vec<Value>),
}

impl SelectionValue {
    /// Interprets a raw dimension value.
    ///
    /// With a kind hint the shape follows the selection kind. Without one, a
    /// two-element numeric array is read as an interval and any other array
    /// as discrete values.
    #[must_use]
    pub fn classify(value: &Value, kind: Option<SelectionKind>) -> Self {
        match (value, kind) {
            (Value::Array(items), Some(SelectionKind::Interval) | None) => {
                match numeric_pair(items) {
                    Some((low, high)) => Self::Interval { low, high },
                    None => Self::Values(items.clone()),
                }
            }
            (Value::Array(items), Some(_)) => Self::Values(items.clone()),
            (scalar, _) => Self::Scalar(scalar.clone()),
        }
    }
}

/// Selection state reported by the renderer for one chart instance.
///
/// The raw event is kept verbatim; accessors only interpret it on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionResult {
    raw: Value,
}

impl Default for SelectionResult {
    fn default() -> Self {
        Self {
            raw: Value::Object(Map::new()),
        }
    }
}

impl SelectionResult {
    #[must_use]
    pub fn from_raw(raw: Value) -> Self {
        Self { raw }
    }

    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    #[must_use]
    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// Returns `true` before any interaction (empty mapping or no value).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.raw {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    #[must_use]
    pub fn get(&self, dimension: &str) -> Option<&Value> {
        self.raw.as_object()?.get(dimension)
    }

    /// Selected dimension names, excluding reserved marker keys.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.raw
            .as_object()
            .into_iter()
            .flat_map(|map| map.keys())
            .map(String::as_str)
            .filter(|key| *key != SELECTION_NAME_KEY && *key != MULTI_AGGREGATE_KEY)
    }

    #[must_use]
    pub fn dimension(
        &self,
        dimension: &str,
        kind: Option<SelectionKind>,
    ) -> Option<SelectionValue> {
        self.get(dimension)
            .map(|value| SelectionValue::classify(value, kind))
    }

    /// Reads a brushed range, ordered so that `low <= high`.
    #[must_use]
    pub fn interval(&self, dimension: &str) -> Option<(f64, f64)> {
        let items = self.get(dimension)?.as_array()?;
        numeric_pair(items)
    }

    /// Reads a brushed range over a temporal field (epoch milliseconds).
    #[must_use]
    pub fn interval_datetime(&self, dimension: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let (low, high) = self.interval(dimension)?;
        let to_datetime = |millis: f64| {
            if !millis.is_finite() {
                return None;
            }
            DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
        };
        Some((to_datetime(low)?, to_datetime(high)?))
    }

    /// Reads discrete selected values; a bare scalar reads as one value.
    #[must_use]
    pub fn values(&self, dimension: &str) -> Option<Vec<&Value>> {
        match self.get(dimension)? {
            Value::Array(items) => Some(items.iter().collect()),
            Value::Null => None,
            scalar => Some(vec![scalar]),
        }
    }

    /// Name of the selection definition that produced this event, if tagged.
    #[must_use]
    pub fn selection_name(&self) -> Option<&str> {
        self.get(SELECTION_NAME_KEY)?.as_str()
    }

    #[must_use]
    pub fn is_multi_aggregate(&self) -> bool {
        self.get(MULTI_AGGREGATE_KEY).is_some()
    }
}

impl PartialEq<Value> for SelectionResult {
    fn eq(&self, other: &Value) -> bool {
        &self.raw == other
    }
}

fn numeric_pair(items: &[Value]) -> Option<(f64, f64)> {
    match items {
        [a, b] => {
            let (a, b) = (a.as_f64()?, b.as_f64()?);
            Some(if a <= b { (a, b) } else { (b, a) })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reversed_brush_is_reordered() {
        let result = SelectionResult::from_raw(json!({"x": [20.0, 10.0]}));
        assert_eq!(result.interval("x"), Some((10.0, 20.0)));
        assert_eq!(result.get("x"), Some(&json!([20.0, 10.0])));
    }

    #[test]
    fn kind_hint_keeps_numeric_pairs_discrete() {
        let value = json!([1, 2]);
        assert_eq!(
            SelectionValue::classify(&value, Some(SelectionKind::Multi)),
            SelectionValue::Values(vec![json!(1), json!(2)])
        );
        assert_eq!(
            SelectionValue::classify(&value, None),
            SelectionValue::Interval {
                low: 1.0,
                high: 2.0
            }
        );
    }
}
