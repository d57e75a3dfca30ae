use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BridgeError, BridgeResult};
use crate::host::{ComponentDeclaration, ComponentSource};

pub const DEFAULT_COMPONENT_NAME: &str = "vega_lite_component";
pub const DEFAULT_DEV_SERVER_URL: &str = "http://localhost:3001";
pub const DEFAULT_BUILD_DIR: &str = "frontend/build";

/// Bridge bootstrap configuration.
///
/// Serializable so hosts can keep the component setup next to their own
/// settings. The frontend source is chosen here at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_component_name")]
    pub component_name: String,
    #[serde(default = "default_source")]
    pub source: ComponentSource,
    #[serde(default = "default_result")]
    pub default_result: Value,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            component_name: default_component_name(),
            source: default_source(),
            default_result: default_result(),
        }
    }
}

impl BridgeConfig {
    /// Packaged frontend loaded from `build_dir`.
    #[must_use]
    pub fn packaged(build_dir: impl Into<PathBuf>) -> Self {
        Self::default().with_source(ComponentSource::Packaged {
            build_dir: build_dir.into(),
        })
    }

    /// Frontend served by a development server at `url`.
    #[must_use]
    pub fn dev_server(url: impl Into<String>) -> Self {
        Self::default().with_source(ComponentSource::DevServer { url: url.into() })
    }

    #[must_use]
    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: ComponentSource) -> Self {
        self.source = source;
        self
    }

    /// Sets the result delivered before the first user interaction.
    #[must_use]
    pub fn with_default_result(mut self, default_result: Value) -> Self {
        self.default_result = default_result;
        self
    }

    pub fn validate(&self) -> BridgeResult<()> {
        if self.component_name.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "component name must not be empty".to_owned(),
            ));
        }
        match &self.source {
            ComponentSource::DevServer { url } => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(BridgeError::InvalidConfig(format!(
                        "dev server url `{url}` must start with http:// or https://"
                    )));
                }
            }
            ComponentSource::Packaged { build_dir } => {
                if build_dir.as_os_str().is_empty() {
                    return Err(BridgeError::InvalidConfig(
                        "packaged build dir must not be empty".to_owned(),
                    ));
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn declaration(&self) -> ComponentDeclaration {
        ComponentDeclaration {
            name: self.component_name.clone(),
            source: self.source.clone(),
        }
    }

    pub fn from_json_str(input: &str) -> BridgeResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            BridgeError::InvalidConfig(format!("failed to parse bridge config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> BridgeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            BridgeError::InvalidConfig(format!("failed to serialize bridge config: {e}"))
        })
    }
}

fn default_component_name() -> String {
    DEFAULT_COMPONENT_NAME.to_owned()
}

fn default_source() -> ComponentSource {
    ComponentSource::Packaged {
        build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
    }
}

fn default_result() -> Value {
    Value::Object(Map::new())
}
