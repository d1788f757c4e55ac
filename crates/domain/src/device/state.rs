//! Operational state of a device.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Operational state of a device.
///
/// There is no ordering between states: any state may be set directly,
/// unless the device is currently [`InUse`](Self::InUse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceState {
    #[default]
    Active,
    InUse,
    Inactive,
}

impl DeviceState {
    /// Every permitted state, in declaration order.
    pub const ALL: [Self; 3] = [Self::Active, Self::InUse, Self::Inactive];

    /// Wire representation (`active`, `in-use`, `inactive`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InUse => "in-use",
            Self::Inactive => "inactive",
        }
    }

    /// Whether the device is locked by the in-use guard.
    #[must_use]
    pub fn is_in_use(self) -> bool {
        matches!(self, Self::InUse)
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new(
                    "state",
                    format!("invalid state: {s} (must be: active, in-use, or inactive)"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_active() {
        assert_eq!(DeviceState::default(), DeviceState::Active);
    }

    #[test]
    fn should_parse_every_declared_state() {
        for state in DeviceState::ALL {
            assert_eq!(state.as_str().parse::<DeviceState>().unwrap(), state);
        }
    }

    #[test]
    fn should_reject_unknown_state_on_state_field() {
        let err = "bogus".parse::<DeviceState>().unwrap_err();
        assert_eq!(err.field, "state");
        assert!(err.reason.contains("bogus"));
    }

    #[test]
    fn should_be_case_sensitive() {
        assert!("Active".parse::<DeviceState>().is_err());
        assert!("in_use".parse::<DeviceState>().is_err());
    }

    #[test]
    fn should_serialize_in_use_with_hyphen() {
        let json = serde_json::to_string(&DeviceState::InUse).unwrap();
        assert_eq!(json, "\"in-use\"");
        let parsed: DeviceState = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(parsed, DeviceState::Inactive);
    }

    #[test]
    fn should_report_in_use_only_for_in_use() {
        assert!(DeviceState::InUse.is_in_use());
        assert!(!DeviceState::Active.is_in_use());
        assert!(!DeviceState::Inactive.is_in_use());
    }
}
