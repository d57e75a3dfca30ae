use std::fmt;

use serde_json::{Map, Value};

use crate::api::DatasetPayloadMap;
use crate::error::{BridgeError, BridgeResult};

/// Component argument names that dataset names must not shadow.
pub const RESERVED_ARG_NAMES: [&str; 4] = ["spec", "key", "default", "dataframe_key"];

/// Identity under which the host tracks one mounted chart instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InstanceId {
    /// Caller-supplied key; survives spec and data changes.
    Keyed(String),
    /// Serialized arguments without the key; any change means a new instance.
    Content(String),
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyed(key) => write!(f, "key:{key}"),
            Self::Content(content) => write!(f, "content:{} bytes", content.len()),
        }
    }
}

/// Everything handed to the rendering collaborator for one bridge call.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentArgs {
    pub spec: Value,
    pub datasets: DatasetPayloadMap,
    pub key: Option<String>,
    pub default: Value,
    /// Legacy marker naming the sentinel dataset on the single-table path.
    pub dataframe_key: Option<String>,
}

impl ComponentArgs {
    pub fn new(
        spec: Value,
        datasets: DatasetPayloadMap,
        key: Option<String>,
        default: Value,
    ) -> BridgeResult<Self> {
        if let Some(name) = datasets
            .names()
            .find(|name| RESERVED_ARG_NAMES.contains(name))
        {
            return Err(BridgeError::ReservedDatasetName(name.to_owned()));
        }
        Ok(Self {
            spec,
            datasets,
            key,
            default,
            dataframe_key: None,
        })
    }

    #[must_use]
    pub fn with_dataframe_key(mut self, name: impl Into<String>) -> Self {
        self.dataframe_key = Some(name.into());
        self
    }

    /// Instance identity: the key when present, otherwise every other
    /// argument (`spec`, `datasets`, `default`, `dataframe_key`).
    #[must_use]
    pub fn instance_id(&self) -> InstanceId {
        if let Some(key) = &self.key {
            return InstanceId::Keyed(key.clone());
        }
        let mut content = Map::new();
        content.insert("spec".to_owned(), self.spec.clone());
        content.insert(
            "datasets".to_owned(),
            Value::Object(self.datasets.to_json_map()),
        );
        content.insert("default".to_owned(), self.default.clone());
        if let Some(name) = &self.dataframe_key {
            content.insert("dataframe_key".to_owned(), Value::String(name.clone()));
        }
        InstanceId::Content(Value::Object(content).to_string())
    }
}
