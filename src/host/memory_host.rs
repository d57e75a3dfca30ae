use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{BridgeError, BridgeResult};

use super::{ComponentArgs, ComponentDeclaration, ComponentHost, InstanceId, MountState};

/// Headless host used by tests and embedding without a browser frontend.
///
/// Keyed instances keep one [`MountState`] each. Unkeyed instances share a
/// single slot: a delivery with different content unmounts and evicts the
/// previous one, so the new content mounts at the default result.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    declaration: Option<ComponentDeclaration>,
    instances: HashMap<InstanceId, MountState>,
    unkeyed: Option<InstanceId>,
    last_args: Option<ComponentArgs>,
    deliveries: usize,
}

impl InMemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn declaration(&self) -> Option<&ComponentDeclaration> {
        self.declaration.as_ref()
    }

    #[must_use]
    pub fn last_args(&self) -> Option<&ComponentArgs> {
        self.last_args.as_ref()
    }

    #[must_use]
    pub fn deliveries(&self) -> usize {
        self.deliveries
    }

    #[must_use]
    pub fn state(&self, instance: &InstanceId) -> MountState {
        self.instances.get(instance).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn mounted_count(&self) -> usize {
        self.instances
            .values()
            .filter(|state| state.is_mounted())
            .count()
    }

    /// Content identity of the unkeyed instance currently in the slot.
    #[must_use]
    pub fn unkeyed_instance(&self) -> Option<&InstanceId> {
        self.unkeyed.as_ref()
    }

    /// Simulates a user interaction on a mounted instance.
    pub fn interact(&mut self, instance: &InstanceId, event: Value) -> BridgeResult<()> {
        let mounted = self
            .instances
            .get_mut(instance)
            .is_some_and(|state| state.interact(event));
        if !mounted {
            return Err(BridgeError::Host(format!(
                "instance {instance} is not mounted"
            )));
        }
        trace!(%instance, "selection event");
        Ok(())
    }

    /// Tears an instance down; the next delivery mounts it afresh.
    pub fn unmount(&mut self, instance: &InstanceId) {
        if let Some(state) = self.instances.get_mut(instance) {
            state.unmount();
        }
    }

    fn replace_unkeyed(&mut self, instance: &InstanceId) {
        let Some(previous) = self.unkeyed.replace(instance.clone()) else {
            return;
        };
        if &previous != instance {
            debug!(%previous, "content changed; unmount previous instance");
            self.instances.remove(&previous);
        }
    }
}

impl ComponentHost for InMemoryHost {
    fn declare(&mut self, declaration: &ComponentDeclaration) -> BridgeResult<()> {
        debug!(component = %declaration.name, "declare component");
        self.declaration = Some(declaration.clone());
        Ok(())
    }

    fn deliver(&mut self, args: &ComponentArgs) -> BridgeResult<Value> {
        if self.declaration.is_none() {
            return Err(BridgeError::Host(
                "component delivered before declaration".to_owned(),
            ));
        }
        let instance = args.instance_id();
        if matches!(instance, InstanceId::Content(_)) {
            self.replace_unkeyed(&instance);
        }
        let result = self
            .instances
            .entry(instance)
            .or_default()
            .mount(&args.default);
        self.deliveries += 1;
        self.last_args = Some(args.clone());
        Ok(result)
    }
}
