use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::core::Table;
use crate::error::{BridgeError, BridgeResult};

/// Reserved dataset name used by the single-table path.
pub const DATAFRAME_SENTINEL: &str = "DATAFRAME_DATA";

/// Named datasets sent alongside one chart spec.
///
/// Assembled fresh for each bridge call. Inserting an existing name replaces
/// the previous table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetPayloadMap {
    tables: IndexMap<String, Arc<Table>>,
}

impl DatasetPayloadMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `table` under `name`, returning the table it replaced.
    pub fn insert(&mut self, name: impl Into<String>, table: Arc<Table>) -> Option<Arc<Table>> {
        let name = name.into();
        if self.tables.contains_key(&name) {
            debug!(dataset = %name, "dataset rebound; last table wins");
        } else {
            trace!(dataset = %name, rows = table.len(), "register dataset");
        }
        self.tables.insert(name, table)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<Table>> {
        self.tables.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Table>)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    /// Datasets as a JSON object of name to rows.
    #[must_use]
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.tables
            .iter()
            .map(|(name, table)| (name.clone(), table.to_json_value()))
            .collect()
    }
}

impl Serialize for DatasetPayloadMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (name, table) in &self.tables {
            map.serialize_entry(name, table.as_ref())?;
        }
        map.end()
    }
}

impl FromIterator<(String, Arc<Table>)> for DatasetPayloadMap {
    fn from_iter<I: IntoIterator<Item = (String, Arc<Table>)>>(iter: I) -> Self {
        let mut datasets = Self::new();
        for (name, table) in iter {
            datasets.insert(name, table);
        }
        datasets
    }
}

/// Dataset arguments a caller hands to the bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum DataInput {
    /// One table bound to the spec's top-level data under the sentinel name.
    Single(Arc<Table>),
    /// Tables already referenced by name from inside the spec.
    Named(IndexMap<String, Arc<Table>>),
    /// Extra keyword-style tables next to a complete spec. May be empty.
    Auxiliary(Vec<(String, Arc<Table>)>),
}

impl DataInput {
    /// No datasets at all (spec carries inline or remote data).
    #[must_use]
    pub fn none() -> Self {
        Self::Auxiliary(Vec::new())
    }

    #[must_use]
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }
}

impl From<Arc<Table>> for DataInput {
    fn from(table: Arc<Table>) -> Self {
        Self::Single(table)
    }
}

impl From<Table> for DataInput {
    fn from(table: Table) -> Self {
        Self::Single(Arc::new(table))
    }
}

impl From<IndexMap<String, Arc<Table>>> for DataInput {
    fn from(tables: IndexMap<String, Arc<Table>>) -> Self {
        Self::Named(tables)
    }
}

/// Normalizes `input` into a fresh dataset map, patching `spec` when needed.
pub fn normalize(spec: Value, input: DataInput) -> BridgeResult<(Value, DatasetPayloadMap)> {
    let mut datasets = DatasetPayloadMap::new();
    let spec = normalize_into(spec, input, &mut datasets)?;
    Ok((spec, datasets))
}

/// Like [`normalize`], but merges into an existing map (last write wins).
///
/// Only the single-table path mutates `spec`: its `data` is replaced by a
/// reference to [`DATAFRAME_SENTINEL`], which makes repeated calls idempotent.
pub fn normalize_into(
    mut spec: Value,
    input: DataInput,
    datasets: &mut DatasetPayloadMap,
) -> BridgeResult<Value> {
    match input {
        DataInput::Single(table) => {
            let Value::Object(root) = &mut spec else {
                return Err(BridgeError::InvalidData(
                    "single-table data requires an object spec".to_owned(),
                ));
            };
            let mut data = Map::new();
            data.insert(
                "name".to_owned(),
                Value::String(DATAFRAME_SENTINEL.to_owned()),
            );
            root.insert("data".to_owned(), Value::Object(data));
            debug!(rows = table.len(), "bind single table");
            datasets.insert(DATAFRAME_SENTINEL, table);
        }
        DataInput::Named(tables) => {
            debug!(count = tables.len(), "bind named datasets");
            for (name, table) in tables {
                datasets.insert(name, table);
            }
        }
        DataInput::Auxiliary(tables) => {
            debug!(count = tables.len(), "bind auxiliary datasets");
            for (name, table) in tables {
                datasets.insert(name, table);
            }
        }
    }
    Ok(spec)
}
