use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::core::{DataVisitor, Table, ToChartSpec};
use crate::error::{BridgeError, BridgeResult};

use super::DatasetPayloadMap;

/// Spec and side datasets produced by [`extract`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedChart {
    pub spec: Value,
    pub datasets: DatasetPayloadMap,
}

impl ExtractedChart {
    /// Folds the side datasets back into the spec under the top-level
    /// `datasets` property, yielding a self-contained chart tree.
    ///
    /// An existing `datasets` property must be an object; its entries are
    /// kept unless an extracted dataset has the same name.
    pub fn into_spec_with_datasets(self) -> BridgeResult<Value> {
        let Value::Object(mut root) = self.spec else {
            return Err(BridgeError::InvalidData(
                "extracted chart spec must be an object".to_owned(),
            ));
        };
        let mut embedded = match root.remove("datasets") {
            Some(Value::Object(existing)) => existing,
            Some(_) => {
                return Err(BridgeError::InvalidData(
                    "chart spec `datasets` must be an object".to_owned(),
                ));
            }
            None => Map::new(),
        };
        embedded.extend(self.datasets.to_json_map());
        root.insert("datasets".to_owned(), Value::Object(embedded));
        Ok(Value::Object(root))
    }
}

/// Per-call arena that names each distinct embedded table by encounter order.
///
/// Tables are told apart by reference, not content: the same `Arc` seen twice
/// keeps its first name, while equal tables behind different `Arc`s get
/// separate entries. The arena holds every `Arc` it has seen, so no address
/// can be reused during the traversal.
#[derive(Debug, Default)]
pub struct IdentityArena {
    tables: Vec<Arc<Table>>,
}

impl IdentityArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn dataset_name(index: usize) -> String {
        format!("d{index}")
    }

    /// Index of `table` in the arena, registering it on first sight.
    pub fn intern(&mut self, table: &Arc<Table>) -> usize {
        if let Some(index) = self
            .tables
            .iter()
            .position(|known| Arc::ptr_eq(known, table))
        {
            return index;
        }
        self.tables.push(Arc::clone(table));
        self.tables.len() - 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    #[must_use]
    pub fn into_datasets(self) -> DatasetPayloadMap {
        self.tables
            .into_iter()
            .enumerate()
            .map(|(index, table)| (Self::dataset_name(index), table))
            .collect()
    }
}

impl DataVisitor for IdentityArena {
    fn visit_table(&mut self, table: &Arc<Table>) -> BridgeResult<Value> {
        let index = self.intern(table);
        let name = Self::dataset_name(index);
        trace!(dataset = %name, rows = table.len(), "substitute embedded table");
        let mut reference = Map::new();
        reference.insert("name".to_owned(), Value::String(name));
        Ok(Value::Object(reference))
    }
}

/// Default serialization: embeds rows as inline `{"values": [...]}` data.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineDataVisitor;

impl DataVisitor for InlineDataVisitor {
    fn visit_table(&mut self, table: &Arc<Table>) -> BridgeResult<Value> {
        let mut inline = Map::new();
        inline.insert("values".to_owned(), table.to_json_value());
        Ok(Value::Object(inline))
    }
}

/// Serializes `chart`, pulling every embedded table into a named dataset.
///
/// The arena lives only for this call; a failure mid-serialization drops it
/// together with whatever it collected.
pub fn extract<C: ToChartSpec + ?Sized>(chart: &C) -> BridgeResult<ExtractedChart> {
    let mut arena = IdentityArena::new();
    let spec = chart.to_chart_spec(&mut arena)?;
    debug!(datasets = arena.len(), "extracted chart datasets");
    Ok(ExtractedChart {
        spec,
        datasets: arena.into_datasets(),
    })
}

/// Serializes `chart` with all tables inlined into the spec.
pub fn to_inline_spec<C: ToChartSpec + ?Sized>(chart: &C) -> BridgeResult<Value> {
    chart.to_chart_spec(&mut InlineDataVisitor)
}
