//! vegalite-bridge: declarative chart specs in, selection events out.
//!
//! The crate validates a chart's selection grammar, normalizes dataset
//! arguments into named payloads, extracts tables embedded in chart objects,
//! and decodes the selection events a rendering host reports back.

pub mod api;
pub mod core;
pub mod error;
pub mod host;
pub mod telemetry;

pub use api::{BridgeConfig, ComponentBridge};
pub use error::{BridgeError, BridgeResult};
