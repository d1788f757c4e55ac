//! Field-level validation rules.
//!
//! Values are trimmed only to decide emptiness and length; the stored value is
//! never normalized. Lengths count Unicode scalar values and bounds are inclusive.

use crate::error::ValidationError;

use super::DeviceState;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const BRAND_MIN_LEN: usize = 2;
pub const BRAND_MAX_LEN: usize = 50;

/// Check a device name.
///
/// # Errors
///
/// Returns a [`ValidationError`] on field `name` when the trimmed value is
/// empty or outside `[3, 100]` characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    check_length("name", name, NAME_MIN_LEN, NAME_MAX_LEN)
}

/// Check a device brand.
///
/// # Errors
///
/// Returns a [`ValidationError`] on field `brand` when the trimmed value is
/// empty or outside `[2, 50]` characters.
pub fn validate_brand(brand: &str) -> Result<(), ValidationError> {
    check_length("brand", brand, BRAND_MIN_LEN, BRAND_MAX_LEN)
}

/// Check that `state` names one of the permitted states and return it.
///
/// # Errors
///
/// Returns a [`ValidationError`] on field `state` for anything other than
/// `active`, `in-use` or `inactive`.
pub fn validate_state(state: &str) -> Result<DeviceState, ValidationError> {
    state.parse()
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "cannot be empty"));
    }
    let len = trimmed.chars().count();
    if len < min {
        return Err(ValidationError::new(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("must not exceed {max} characters"),
        ));
    }
    Ok(())
}
