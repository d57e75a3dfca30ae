use serde_json::Value;
use tracing::debug;

use crate::core::{SelectionResult, ToChartSpec};
use crate::error::BridgeResult;
use crate::host::{ComponentArgs, ComponentHost, InstanceId};

use super::{
    BridgeConfig, DATAFRAME_SENTINEL, DataInput, DatasetPayloadMap, extract, normalize,
    validate_spec,
};

/// Raw selection event returned by one delivery, not yet decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSelection {
    instance: InstanceId,
    raw: Value,
}

impl PendingSelection {
    #[must_use]
    pub fn instance(&self) -> &InstanceId {
        &self.instance
    }

    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    #[must_use]
    pub fn decode(self) -> SelectionResult {
        decode(self.raw)
    }
}

/// Outward-facing bridge between chart specs and the rendering host.
#[derive(Debug)]
pub struct ComponentBridge<H: ComponentHost> {
    host: H,
    config: BridgeConfig,
}

impl<H: ComponentHost> ComponentBridge<H> {
    /// Validates `config` and declares the component with `host`.
    pub fn new(mut host: H, config: BridgeConfig) -> BridgeResult<Self> {
        config.validate()?;
        host.declare(&config.declaration())?;
        Ok(Self { host, config })
    }

    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    /// Packages `{spec, datasets, key, default}` and hands it to the host.
    ///
    /// Without a `key` the instance is identified by its content, so any
    /// spec or dataset change remounts it at `default`.
    pub fn send(
        &mut self,
        spec: Value,
        datasets: DatasetPayloadMap,
        key: Option<&str>,
        default: Value,
    ) -> BridgeResult<PendingSelection> {
        let args = ComponentArgs::new(spec, datasets, key.map(str::to_owned), default)?;
        self.dispatch(&args)
    }

    /// Validates, normalizes, and sends a declarative spec, then decodes the
    /// returned selection.
    pub fn vega_lite(
        &mut self,
        spec: Value,
        data: DataInput,
        key: Option<&str>,
    ) -> BridgeResult<SelectionResult> {
        validate_spec(&spec)?;
        let single_table = data.is_single();
        let (spec, datasets) = normalize(spec, data)?;

        let mut args = ComponentArgs::new(
            spec,
            datasets,
            key.map(str::to_owned),
            self.config.default_result.clone(),
        )?;
        if single_table {
            args = args.with_dataframe_key(DATAFRAME_SENTINEL);
        }
        Ok(self.dispatch(&args)?.decode())
    }

    /// Extracts embedded tables from a chart object, sends the resulting spec,
    /// and decodes the returned selection.
    ///
    /// Selections of chart objects may live on nested views, so the top-level
    /// selection check of [`vega_lite`](Self::vega_lite) is not applied.
    pub fn chart<C: ToChartSpec + ?Sized>(
        &mut self,
        chart: &C,
        key: Option<&str>,
    ) -> BridgeResult<SelectionResult> {
        let extracted = extract(chart)?;
        let default = self.config.default_result.clone();
        Ok(self
            .send(extracted.spec, extracted.datasets, key, default)?
            .decode())
    }

    fn dispatch(&mut self, args: &ComponentArgs) -> BridgeResult<PendingSelection> {
        let instance = args.instance_id();
        debug!(
            component = %self.config.component_name,
            %instance,
            datasets = args.datasets.len(),
            "deliver component args"
        );
        let raw = self.host.deliver(args)?;
        Ok(PendingSelection { instance, raw })
    }
}

/// Turns a raw renderer event into a selection result.
///
/// The event is trusted as-is: its shape is not checked against the spec's
/// selection definitions.
#[must_use]
pub fn decode(raw: Value) -> SelectionResult {
    SelectionResult::from_raw(raw)
}
