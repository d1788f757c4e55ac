//! Storage port: the persistence contract for devices.

use std::future::Future;

use devices_domain::device::{Device, DeviceState};
use devices_domain::error::DevicesError;
use devices_domain::id::DeviceId;

use crate::pagination::Pagination;

/// Repository for persisting and querying [`Device`]s.
///
/// Every write is atomic from the caller's point of view. Listing methods
/// return devices ordered by `created_at`, most recent first, and an empty
/// vector (not an error) when nothing matches. Failures other than the
/// documented [`DevicesError::NotFound`] / [`DevicesError::AlreadyExists`]
/// are reported as [`DevicesError::Storage`].
pub trait DeviceRepository {
    /// Persist a new device.
    ///
    /// Fails with [`DevicesError::AlreadyExists`] on an id collision.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevicesError>> + Send;

    /// Get a device by its unique identifier.
    ///
    /// Fails with [`DevicesError::NotFound`] when absent.
    fn get_by_id(&self, id: DeviceId) -> impl Future<Output = Result<Device, DevicesError>> + Send;

    /// List a page of all devices.
    fn list(
        &self,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<Device>, DevicesError>> + Send;

    /// List a page of devices whose brand matches `brand` exactly.
    fn list_by_brand(
        &self,
        brand: &str,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<Device>, DevicesError>> + Send;

    /// List a page of devices in the given state.
    fn list_by_state(
        &self,
        state: DeviceState,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<Device>, DevicesError>> + Send;

    /// Replace `name`, `brand` and `state` of the device with the same id.
    ///
    /// Never changes `id` or `created_at`. Fails with
    /// [`DevicesError::NotFound`] when the id does not exist.
    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DevicesError>> + Send;

    /// Delete a device by its unique identifier.
    ///
    /// Fails with [`DevicesError::NotFound`] when the id does not exist.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DevicesError>> + Send;

    /// Whether a device with this id exists.
    fn exists_by_id(&self, id: DeviceId) -> impl Future<Output = Result<bool, DevicesError>> + Send;
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for std::sync::Arc<T> {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevicesError>> + Send {
        (**self).create(device)
    }

    fn get_by_id(&self, id: DeviceId) -> impl Future<Output = Result<Device, DevicesError>> + Send {
        (**self).get_by_id(id)
    }

    fn list(
        &self,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<Device>, DevicesError>> + Send {
        (**self).list(page)
    }

    fn list_by_brand(
        &self,
        brand: &str,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<Device>, DevicesError>> + Send {
        (**self).list_by_brand(brand, page)
    }

    fn list_by_state(
        &self,
        state: DeviceState,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<Device>, DevicesError>> + Send {
        (**self).list_by_state(state, page)
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DevicesError>> + Send {
        (**self).update(device)
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DevicesError>> + Send {
        (**self).delete(id)
    }

    fn exists_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<bool, DevicesError>> + Send {
        (**self).exists_by_id(id)
    }
}
