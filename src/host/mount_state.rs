use serde_json::Value;

/// Lifecycle of one chart instance as seen by the host.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MountState {
    #[default]
    Unmounted,
    Mounted {
        result: Value,
    },
}

impl MountState {
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        matches!(self, Self::Mounted { .. })
    }

    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::Mounted { result } => Some(result),
            Self::Unmounted => None,
        }
    }

    /// `Unmounted -> Mounted(default)`; an already mounted instance keeps its result.
    pub fn mount(&mut self, default: &Value) -> Value {
        if let Self::Mounted { result } = self {
            return result.clone();
        }
        *self = Self::Mounted {
            result: default.clone(),
        };
        default.clone()
    }

    /// `Mounted(Rn) -> Mounted(Rn+1)`. Returns `false` when not mounted.
    pub fn interact(&mut self, event: Value) -> bool {
        match self {
            Self::Mounted { result } => {
                *result = event;
                true
            }
            Self::Unmounted => false,
        }
    }

    pub fn unmount(&mut self) {
        *self = Self::Unmounted;
    }
}
