mod args;
mod memory_host;
mod mount_state;

pub use args::{ComponentArgs, InstanceId, RESERVED_ARG_NAMES};
pub use memory_host::InMemoryHost;
pub use mount_state::MountState;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BridgeResult;

/// Where the host loads the chart frontend from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ComponentSource {
    /// Live development server.
    DevServer { url: String },
    /// Prebuilt frontend bundle on disk.
    Packaged { build_dir: PathBuf },
}

/// Component registration sent to the host once per bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDeclaration {
    pub name: String,
    pub source: ComponentSource,
}

/// Contract implemented by the external rendering collaborator.
///
/// Delivery is a blocking round trip: the host mounts or updates the chart
/// instance identified by the arguments and returns its current selection
/// event, which is the declared default until the user interacts.
pub trait ComponentHost {
    fn declare(&mut self, declaration: &ComponentDeclaration) -> BridgeResult<()>;
    fn deliver(&mut self, args: &ComponentArgs) -> BridgeResult<Value>;
}
