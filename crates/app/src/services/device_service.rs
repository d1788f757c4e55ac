//! Device service — use-cases for managing devices.
//!
//! Every operation runs its steps in order (load, guard, validate, persist) and
//! stops at the first failure, so a refused guard or a failed validation never
//! reaches a write on the repository. Operations are not wrapped in a store
//! transaction: two concurrent updates of the same device both read their own
//! snapshot and the last write wins.

use devices_domain::device::{Device, DeviceDraft, validate_state};
use devices_domain::error::{BusinessRuleError, DevicesError, ValidationError};
use devices_domain::id::DeviceId;

use crate::pagination::Pagination;
use crate::ports::DeviceRepository;

/// Full replacement of the writable fields of a device.
#[derive(Debug, Clone)]
pub struct DeviceUpdate {
    pub name: String,
    pub brand: String,
    /// Raw state text, validated with the rest of the candidate.
    pub state: String,
}

/// Partial change of the writable fields of a device; `None` keeps the
/// current value.
#[derive(Debug, Clone, Default)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<String>,
}

/// Application service for device operations.
///
/// Holds nothing but the repository, so a single instance can serve
/// concurrent callers.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new `active` device with a fresh id and the current time.
    ///
    /// # Errors
    ///
    /// Returns [`DevicesError::Validation`] if `name` or `brand` is invalid,
    /// or the error from the repository (e.g. [`DevicesError::AlreadyExists`]).
    #[tracing::instrument(skip(self, name, brand), fields(device_name = %name))]
    pub async fn create_device(&self, name: String, brand: String) -> Result<Device, DevicesError> {
        let device = Device::new(name, brand)?;
        let created = self.repo.create(device).await?;
        tracing::info!(device_id = %created.id, "device created");
        Ok(created)
    }

    /// Look up a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`DevicesError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, DevicesError> {
        self.repo.get_by_id(id).await
    }

    /// List devices, most recent first.
    ///
    /// `limit <= 0` becomes the default page size and `offset < 0` becomes 0.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_devices(&self, limit: i64, offset: i64) -> Result<Vec<Device>, DevicesError> {
        let page = normalize(limit, offset);
        self.repo.list(page).await
    }

    /// List devices with exactly this brand, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DevicesError::Validation`] on field `brand` when `brand` is
    /// empty, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_devices_by_brand(
        &self,
        brand: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Device>, DevicesError> {
        if brand.is_empty() {
            return Err(ValidationError::new("brand", "cannot be empty").into());
        }
        let page = normalize(limit, offset);
        self.repo.list_by_brand(brand, page).await
    }

    /// List devices in the given state, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DevicesError::Validation`] on field `state` when `state` is
    /// not one of `active`, `in-use`, `inactive`, or a storage error from the
    /// repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_devices_by_state(
        &self,
        state: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Device>, DevicesError> {
        let state = validate_state(state)?;
        let page = normalize(limit, offset);
        self.repo.list_by_state(state, page).await
    }

    /// Replace name, brand and state of an existing device.
    ///
    /// The in-use guard is evaluated against the stored device, whatever the
    /// requested new state is.
    ///
    /// # Errors
    ///
    /// Returns [`DevicesError::NotFound`] if the device does not exist,
    /// [`DevicesError::BusinessRule`] if it is currently `in-use`,
    /// [`DevicesError::Validation`] if the candidate is invalid, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, update))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        update: DeviceUpdate,
    ) -> Result<Device, DevicesError> {
        let current = self.repo.get_by_id(id).await?;
        guard(current.can_update())?;

        let candidate = DeviceDraft {
            id: current.id,
            name: update.name,
            brand: update.brand,
            created_at: current.created_at,
            state: update.state,
        }
        .validate()?;

        self.repo.update(candidate).await
    }

    /// Overwrite only the provided fields of an existing device.
    ///
    /// An empty patch still persists the unchanged device.
    ///
    /// # Errors
    ///
    /// Same as [`update_device`](Self::update_device).
    #[tracing::instrument(skip(self, patch))]
    pub async fn partial_update_device(
        &self,
        id: DeviceId,
        patch: DevicePatch,
    ) -> Result<Device, DevicesError> {
        let current = self.repo.get_by_id(id).await?;
        guard(current.can_update())?;

        let mut draft = DeviceDraft::from(current);
        if let Some(name) = patch.name {
            draft.name = name;
        }
        if let Some(brand) = patch.brand {
            draft.brand = brand;
        }
        if let Some(state) = patch.state {
            draft.state = state;
        }
        let merged = draft.validate()?;

        self.repo.update(merged).await
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`DevicesError::NotFound`] if the device does not exist,
    /// [`DevicesError::BusinessRule`] if it is currently `in-use`, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), DevicesError> {
        let current = self.repo.get_by_id(id).await?;
        guard(current.can_delete())?;
        self.repo.delete(id).await?;
        tracing::info!(device_id = %id, "device deleted");
        Ok(())
    }
}

fn normalize(limit: i64, offset: i64) -> Pagination {
    let page = Pagination::new(limit, offset);
    if page.limit() != limit || page.offset() != offset {
        tracing::debug!(
            limit,
            offset,
            normalized_limit = page.limit(),
            normalized_offset = page.offset(),
            "pagination normalized"
        );
    }
    page
}

fn guard(check: Result<(), BusinessRuleError>) -> Result<(), DevicesError> {
    check.map_err(|err| {
        tracing::warn!(reason = %err.message, "operation refused by state guard");
        err.into()
    })
}
