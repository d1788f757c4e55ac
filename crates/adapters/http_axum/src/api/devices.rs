//! JSON REST handlers for devices.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use devices_app::pagination::{DEFAULT_LIMIT, Pagination};
use devices_app::ports::DeviceRepository;
use devices_app::services::device_service::{DevicePatch, DeviceUpdate};
use devices_domain::device::Device;
use devices_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a device.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    pub name: String,
    pub brand: String,
}

/// Request body for replacing a device; every field is required.
#[derive(Deserialize)]
pub struct UpdateDeviceRequest {
    pub name: String,
    pub brand: String,
    pub state: String,
}

/// Request body for a partial update; absent fields are left unchanged.
#[derive(Deserialize)]
pub struct PartialUpdateDeviceRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<String>,
}

/// Query string of the list endpoint.
///
/// `limit` and `offset` are kept as text: anything unparsable or negative
/// falls back to the default instead of rejecting the request.
#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub brand: Option<String>,
    pub state: Option<String>,
}

/// Body of the list endpoint.
#[derive(Serialize)]
pub struct ListDevicesResponse {
    pub devices: Vec<Device>,
    pub total: usize,
    pub limit: i64,
    pub offset: i64,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<ListDevicesResponse>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, update and partial update endpoints.
pub enum DeviceResponse {
    Ok(Json<Device>),
}

impl IntoResponse for DeviceResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_id(id: &str) -> Result<DeviceId, ApiError> {
    DeviceId::from_str(id).map_err(|_| ApiError::InvalidId)
}

fn parse_non_negative(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 0)
        .unwrap_or(default)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// `GET /api/v1/devices`
///
/// Filters by `brand` when given, else by `state` when given.
pub async fn list<DR>(
    State(state): State<AppState<DR>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let limit = parse_non_negative(query.limit.as_deref(), DEFAULT_LIMIT);
    let offset = parse_non_negative(query.offset.as_deref(), 0);
    let service = &state.device_service;

    let devices = if let Some(brand) = non_empty(query.brand.as_deref()) {
        service.list_devices_by_brand(brand, limit, offset).await?
    } else if let Some(device_state) = non_empty(query.state.as_deref()) {
        service
            .list_devices_by_state(device_state, limit, offset)
            .await?
    } else {
        service.list_devices(limit, offset).await?
    };

    let page = Pagination::new(limit, offset);
    Ok(ListResponse::Ok(Json(ListDevicesResponse {
        total: devices.len(),
        devices,
        limit: page.limit(),
        offset: page.offset(),
    })))
}

/// `GET /api/v1/devices/{id}`
pub async fn get<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    let device = state.device_service.get_device(device_id).await?;
    Ok(DeviceResponse::Ok(Json(device)))
}

/// `POST /api/v1/devices`
pub async fn create<DR>(
    State(state): State<AppState<DR>>,
    body: Result<Json<CreateDeviceRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let created = state
        .device_service
        .create_device(req.name, req.brand)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/v1/devices/{id}`
pub async fn update<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateDeviceRequest>, JsonRejection>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    let Json(req) = body?;
    let updated = state
        .device_service
        .update_device(
            device_id,
            DeviceUpdate {
                name: req.name,
                brand: req.brand,
                state: req.state,
            },
        )
        .await?;
    Ok(DeviceResponse::Ok(Json(updated)))
}

/// `PATCH /api/v1/devices/{id}`
pub async fn partial_update<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
    body: Result<Json<PartialUpdateDeviceRequest>, JsonRejection>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    let Json(req) = body?;
    let updated = state
        .device_service
        .partial_update_device(
            device_id,
            DevicePatch {
                name: req.name,
                brand: req.brand,
                state: req.state,
            },
        )
        .await?;
    Ok(DeviceResponse::Ok(Json(updated)))
}

/// `DELETE /api/v1/devices/{id}`
pub async fn delete<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    state.device_service.delete_device(device_id).await?;
    Ok(DeleteResponse::NoContent)
}
