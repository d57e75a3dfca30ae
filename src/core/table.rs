use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};

/// One row of a dataset payload: field name to JSON scalar.
pub type Record = IndexMap<String, Value>;

/// Row-oriented table handed to the renderer as a named dataset.
///
/// Row order is preserved exactly as supplied; field order inside a record is
/// kept for readability but carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Record>,
}

impl Table {
    /// Builds a table from records, rejecting non-scalar cells.
    pub fn from_rows(rows: Vec<Record>) -> BridgeResult<Self> {
        for (index, row) in rows.iter().enumerate() {
            for (field, value) in row {
                if !is_scalar(value) {
                    return Err(BridgeError::InvalidData(format!(
                        "row {index} field `{field}` must be a JSON scalar"
                    )));
                }
            }
        }
        Ok(Self { rows })
    }

    /// Builds a table from column-major data (dataframe layout).
    ///
    /// All columns must have the same length.
    pub fn from_columns(columns: IndexMap<String, Vec<Value>>) -> BridgeResult<Self> {
        let mut lengths = columns.values().map(Vec::len);
        let len = lengths.next().unwrap_or(0);
        if lengths.any(|other| other != len) {
            return Err(BridgeError::InvalidData(
                "table columns must all have the same length".to_owned(),
            ));
        }

        let mut rows: Vec<Record> = (0..len)
            .map(|_| Record::with_capacity(columns.len()))
            .collect();
        for (field, values) in columns {
            for (row, value) in rows.iter_mut().zip(values) {
                row.insert(field.clone(), value);
            }
        }
        Self::from_rows(rows)
    }

    /// Wraps the table for sharing between a caller and dataset payload maps.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializes rows as the JSON array the renderer consumes.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|row| {
                    Value::Object(
                        row.iter()
                            .map(|(field, value)| (field.clone(), value.clone()))
                            .collect(),
                    )
                })
                .collect(),
        )
    }
}

impl TryFrom<Value> for Table {
    type Error = BridgeError;

    fn try_from(value: Value) -> BridgeResult<Self> {
        let Value::Array(items) = value else {
            return Err(BridgeError::InvalidData(
                "table payload must be an array of records".to_owned(),
            ));
        };
        let rows = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(map.into_iter().collect::<Record>()),
                _ => Err(BridgeError::InvalidData(format!(
                    "table row {index} must be an object"
                ))),
            })
            .collect::<BridgeResult<Vec<_>>>()?;
        Self::from_rows(rows)
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}
