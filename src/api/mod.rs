mod bridge_config;
mod chart_extractor;
mod component_bridge;
mod dataset_resolver;
mod json_contract;
mod spec_validator;

pub use bridge_config::{
    BridgeConfig, DEFAULT_BUILD_DIR, DEFAULT_COMPONENT_NAME, DEFAULT_DEV_SERVER_URL,
};
pub use chart_extractor::{
    ExtractedChart, IdentityArena, InlineDataVisitor, extract, to_inline_spec,
};
pub use component_bridge::{ComponentBridge, PendingSelection, decode};
pub use dataset_resolver::{
    DATAFRAME_SENTINEL, DataInput, DatasetPayloadMap, normalize, normalize_into,
};
pub use spec_validator::{selection_definitions, validate_spec};
