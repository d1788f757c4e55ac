//! In-memory repository and request helpers shared by handler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;

use devices_app::pagination::Pagination;
use devices_app::ports::DeviceRepository;
use devices_app::services::device_service::DeviceService;
use devices_domain::device::{Device, DeviceState};
use devices_domain::error::{DevicesError, NotFoundError};
use devices_domain::id::DeviceId;

use crate::state::AppState;

#[derive(Default)]
pub(crate) struct InMemoryRepo {
    store: Mutex<HashMap<DeviceId, Device>>,
}

impl InMemoryRepo {
    pub(crate) fn seed(&self, device: Device) {
        self.store.lock().unwrap().insert(device.id, device);
    }

    fn page_of(&self, page: Pagination, keep: impl Fn(&Device) -> bool) -> Vec<Device> {
        let store = self.store.lock().unwrap();
        let mut devices: Vec<Device> = store.values().filter(|d| keep(d)).cloned().collect();
        devices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        devices
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap())
            .take(usize::try_from(page.limit()).unwrap())
            .collect()
    }
}

fn not_found(id: DeviceId) -> DevicesError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}

impl DeviceRepository for InMemoryRepo {
    async fn create(&self, device: Device) -> Result<Device, DevicesError> {
        self.seed(device.clone());
        Ok(device)
    }

    async fn get_by_id(&self, id: DeviceId) -> Result<Device, DevicesError> {
        let store = self.store.lock().unwrap();
        store.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Device>, DevicesError> {
        Ok(self.page_of(page, |_| true))
    }

    async fn list_by_brand(
        &self,
        brand: &str,
        page: Pagination,
    ) -> Result<Vec<Device>, DevicesError> {
        Ok(self.page_of(page, |d| d.brand == brand))
    }

    async fn list_by_state(
        &self,
        state: DeviceState,
        page: Pagination,
    ) -> Result<Vec<Device>, DevicesError> {
        Ok(self.page_of(page, |d| d.state == state))
    }

    async fn update(&self, device: Device) -> Result<Device, DevicesError> {
        let mut store = self.store.lock().unwrap();
        if !store.contains_key(&device.id) {
            return Err(not_found(device.id));
        }
        store.insert(device.id, device.clone());
        Ok(device)
    }

    async fn delete(&self, id: DeviceId) -> Result<(), DevicesError> {
        let mut store = self.store.lock().unwrap();
        store.remove(&id).map(|_| ()).ok_or_else(|| not_found(id))
    }

    async fn exists_by_id(&self, id: DeviceId) -> Result<bool, DevicesError> {
        Ok(self.store.lock().unwrap().contains_key(&id))
    }
}

/// Router over an empty in-memory repository.
pub(crate) fn app() -> Router {
    app_with(Arc::new(InMemoryRepo::default()))
}

/// Router over a caller-owned repository, so tests can seed and inspect it.
pub(crate) fn app_with(repo: Arc<InMemoryRepo>) -> Router {
    crate::router::build(AppState::new(DeviceService::new(repo)))
}

pub(crate) fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub(crate) fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub(crate) async fn read_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
