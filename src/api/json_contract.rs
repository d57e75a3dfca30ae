use serde_json::{Map, Value};

use crate::core::Table;
use crate::error::{BridgeError, BridgeResult};
use crate::host::ComponentArgs;

use super::DatasetPayloadMap;

impl ComponentArgs {
    /// Flat wire payload: reserved arguments plus one entry per dataset.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("spec".to_owned(), self.spec.clone());
        payload.insert(
            "key".to_owned(),
            self.key.clone().map_or(Value::Null, Value::String),
        );
        payload.insert("default".to_owned(), self.default.clone());
        payload.extend(self.datasets.to_json_map());
        if let Some(name) = &self.dataframe_key {
            payload.insert("dataframe_key".to_owned(), Value::String(name.clone()));
        }
        Value::Object(payload)
    }

    pub fn to_json_pretty(&self) -> BridgeResult<String> {
        serde_json::to_string_pretty(&self.to_json_value()).map_err(|e| {
            BridgeError::InvalidData(format!("failed to serialize component args: {e}"))
        })
    }

    /// Parses a wire payload; every non-reserved key is read as a dataset.
    pub fn from_json_str(input: &str) -> BridgeResult<Self> {
        let payload: Value = serde_json::from_str(input).map_err(|e| {
            BridgeError::InvalidData(format!("failed to parse component args json: {e}"))
        })?;
        let Value::Object(mut payload) = payload else {
            return Err(BridgeError::InvalidData(
                "component args payload must be an object".to_owned(),
            ));
        };

        let spec = payload.remove("spec").ok_or_else(|| {
            BridgeError::InvalidData("component args payload is missing `spec`".to_owned())
        })?;
        let key = match payload.remove("key") {
            None | Some(Value::Null) => None,
            Some(Value::String(key)) => Some(key),
            Some(other) => {
                return Err(BridgeError::InvalidData(format!(
                    "component key must be a string or null, got {other}"
                )));
            }
        };
        let default = payload
            .remove("default")
            .unwrap_or_else(|| Value::Object(Map::new()));
        let dataframe_key = match payload.remove("dataframe_key") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(other) => {
                return Err(BridgeError::InvalidData(format!(
                    "dataframe_key must be a string, got {other}"
                )));
            }
        };

        let datasets = payload
            .into_iter()
            .map(|(name, rows)| {
                let table = Table::try_from(rows).map_err(|e| match e {
                    BridgeError::InvalidData(reason) => {
                        BridgeError::InvalidData(format!("dataset `{name}`: {reason}"))
                    }
                    other => other,
                })?;
                Ok((name, table.shared()))
            })
            .collect::<BridgeResult<DatasetPayloadMap>>()?;

        let args = Self::new(spec, datasets, key, default)?;
        Ok(match dataframe_key {
            Some(name) => args.with_dataframe_key(name),
            None => args,
        })
    }
}
