//! The device entity, the single aggregate root of the registry.
//!
//! A [`Device`] is always well-formed: the only ways to obtain one are
//! [`Device::new`], the [`DeviceBuilder`], or [`DeviceDraft::validate`], all of
//! which run the whole-entity validator. Mutation paths build a new draft from
//! an existing device and validate it again instead of patching fields in place.

mod rules;
mod state;

use serde::{Deserialize, Serialize};

use crate::error::{BusinessRuleError, ValidationError};
use crate::id::DeviceId;
use crate::time::{self, Timestamp};

pub use rules::{
    BRAND_MAX_LEN, BRAND_MIN_LEN, NAME_MAX_LEN, NAME_MIN_LEN, validate_brand, validate_name,
    validate_state,
};
pub use state::DeviceState;

/// A physical device tracked by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub brand: String,
    pub state: DeviceState,
    pub created_at: Timestamp,
}

impl Device {
    /// Create a fresh device: new id, current UTC time, state `active`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] raised by `name` or `brand`.
    pub fn new(name: impl Into<String>, brand: impl Into<String>) -> Result<Self, ValidationError> {
        DeviceDraft {
            id: DeviceId::new(),
            name: name.into(),
            brand: brand.into(),
            created_at: time::now(),
            state: DeviceState::Active.as_str().to_string(),
        }
        .validate()
    }

    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Re-check every invariant and report the first violation, in the order
    /// `id`, `name`, `brand`, `created_at`, `state`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_all(
            self.id,
            &self.name,
            &self.brand,
            &self.created_at,
            self.state.as_str(),
        )
        .map(|_| ())
    }

    /// Guard for update paths, evaluated against the current state.
    ///
    /// # Errors
    ///
    /// Returns a [`BusinessRuleError`] when the device is `in-use`.
    pub fn can_update(&self) -> Result<(), BusinessRuleError> {
        if self.state.is_in_use() {
            return Err(BusinessRuleError::new(
                "cannot update device in 'in-use' state",
            ));
        }
        Ok(())
    }

    /// Guard for deletion, evaluated against the current state.
    ///
    /// # Errors
    ///
    /// Returns a [`BusinessRuleError`] when the device is `in-use`.
    pub fn can_delete(&self) -> Result<(), BusinessRuleError> {
        if self.state.is_in_use() {
            return Err(BusinessRuleError::new(
                "cannot delete device in 'in-use' state",
            ));
        }
        Ok(())
    }
}

/// Unvalidated snapshot of a device, as received from a caller.
///
/// `state` is kept as raw text so that an unknown value is reported through
/// validation, in field order, like any other bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDraft {
    pub id: DeviceId,
    pub name: String,
    pub brand: String,
    pub created_at: Timestamp,
    pub state: String,
}

impl DeviceDraft {
    /// Run the whole-entity validator and produce a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] in the order `id`, `name`,
    /// `brand`, `created_at`, `state`.
    pub fn validate(self) -> Result<Device, ValidationError> {
        let state = check_all(
            self.id,
            &self.name,
            &self.brand,
            &self.created_at,
            &self.state,
        )?;
        Ok(Device {
            id: self.id,
            name: self.name,
            brand: self.brand,
            state,
            created_at: self.created_at,
        })
    }
}

impl From<Device> for DeviceDraft {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            name: device.name,
            brand: device.brand,
            created_at: device.created_at,
            state: device.state.as_str().to_string(),
        }
    }
}

fn check_all(
    id: DeviceId,
    name: &str,
    brand: &str,
    created_at: &Timestamp,
    state: &str,
) -> Result<DeviceState, ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("id", "cannot be empty"));
    }
    validate_name(name)?;
    validate_brand(brand)?;
    if time::is_zero(created_at) {
        return Err(ValidationError::new("created_at", "cannot be empty"));
    }
    validate_state(state)
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    brand: Option<String>,
    state: Option<DeviceState>,
    created_at: Option<Timestamp>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: DeviceState) -> Self {
        self.state = Some(state);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// Missing `id` and `created_at` default to a fresh id and the current
    /// time; a missing `state` defaults to `active`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` or `brand` is missing or invalid.
    pub fn build(self) -> Result<Device, ValidationError> {
        DeviceDraft {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(time::now),
            state: self.state.unwrap_or_default().as_str().to_string(),
        }
        .validate()
    }
}
