use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::BridgeResult;

use super::table::Table;

/// Observer called for every embedded table during one serialization pass.
///
/// The returned value replaces the table in the serialized tree.
pub trait DataVisitor {
    fn visit_table(&mut self, table: &Arc<Table>) -> BridgeResult<Value>;
}

/// Chart objects that serialize to a declarative chart tree.
pub trait ToChartSpec {
    fn to_chart_spec(&self, visitor: &mut dyn DataVisitor) -> BridgeResult<Value>;
}

/// Chart-object tree that may embed tables directly instead of naming them.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartNode {
    Value(Value),
    Array(Vec<ChartNode>),
    Object(IndexMap<String, ChartNode>),
    Data(Arc<Table>),
}

impl ChartNode {
    /// Empty object node, the usual starting point for a chart or layer.
    #[must_use]
    pub fn object() -> Self {
        Self::Object(IndexMap::new())
    }

    /// Sets `key` on an object node; other node kinds are returned unchanged.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, node: impl Into<ChartNode>) -> Self {
        if let Self::Object(map) = &mut self {
            map.insert(key.into(), node.into());
        }
        self
    }

    /// Object node embedding `table` as its `data`.
    #[must_use]
    pub fn with_data(self, table: &Arc<Table>) -> Self {
        self.with("data", Self::Data(Arc::clone(table)))
    }

    #[must_use]
    pub fn layers(layers: Vec<ChartNode>) -> Self {
        Self::object().with("layer", Self::Array(layers))
    }
}

impl From<Value> for ChartNode {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for ChartNode {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_owned()))
    }
}

impl From<Arc<Table>> for ChartNode {
    fn from(table: Arc<Table>) -> Self {
        Self::Data(table)
    }
}

impl ToChartSpec for ChartNode {
    fn to_chart_spec(&self, visitor: &mut dyn DataVisitor) -> BridgeResult<Value> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Array(items) => items
                .iter()
                .map(|item| item.to_chart_spec(visitor))
                .collect::<BridgeResult<Vec<_>>>()
                .map(Value::Array),
            Self::Object(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, node) in entries {
                    map.insert(key.clone(), node.to_chart_spec(visitor)?);
                }
                Ok(Value::Object(map))
            }
            Self::Data(table) => visitor.visit_table(table),
        }
    }
}
