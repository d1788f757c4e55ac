//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use devices_app::pagination::Pagination;
use devices_app::ports::DeviceRepository;
use devices_domain::device::{Device, DeviceState};
use devices_domain::error::{AlreadyExistsError, DevicesError, NotFoundError};
use devices_domain::id::DeviceId;
use devices_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let brand: String = row.try_get("brand")?;
        let state: String = row.try_get("state")?;
        let created_at: String = row.try_get("created_at")?;

        let id = DeviceId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let state =
            DeviceState::from_str(&state).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Device {
            id,
            name,
            brand,
            state,
            created_at,
        }))
    }
}

/// Fixed-width RFC 3339 so that text ordering matches chronological ordering.
fn encode_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn not_found(id: DeviceId) -> DevicesError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}

const INSERT: &str =
    "INSERT INTO devices (id, name, brand, state, created_at) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_PAGE: &str =
    "SELECT * FROM devices ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?";
const SELECT_PAGE_BY_BRAND: &str =
    "SELECT * FROM devices WHERE brand = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?";
const SELECT_PAGE_BY_STATE: &str =
    "SELECT * FROM devices WHERE state = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?";
const UPDATE: &str = "UPDATE devices SET name = ?, brand = ?, state = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";
const EXISTS_BY_ID: &str = "SELECT EXISTS(SELECT 1 FROM devices WHERE id = ?)";

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevicesError>> + Send {
        let pool = self.pool.clone();
        async move {
            // stored precision is microseconds; return what a later read sees
            let device = Device {
                created_at: device.created_at.trunc_subsecs(6),
                ..device
            };
            let result = sqlx::query(INSERT)
                .bind(device.id.to_string())
                .bind(&device.name)
                .bind(&device.brand)
                .bind(device.state.as_str())
                .bind(encode_timestamp(&device.created_at))
                .execute(&pool)
                .await;

            match result {
                Ok(_) => Ok(device),
                Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                    Err(AlreadyExistsError {
                        entity: "Device",
                        id: device.id.to_string(),
                    }
                    .into())
                }
                Err(err) => Err(StorageError::from(err).into()),
            }
        }
    }

    fn get_by_id(&self, id: DeviceId) -> impl Future<Output = Result<Device, DevicesError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            row.map(|w| w.0).ok_or_else(|| not_found(id))
        }
    }

    fn list(
        &self,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<Device>, DevicesError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn list_by_brand(
        &self,
        brand: &str,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<Device>, DevicesError>> + Send {
        let pool = self.pool.clone();
        let brand = brand.to_string();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE_BY_BRAND)
                .bind(brand)
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn list_by_state(
        &self,
        state: DeviceState,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<Device>, DevicesError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE_BY_STATE)
                .bind(state.as_str())
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DevicesError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&device.name)
                .bind(&device.brand)
                .bind(device.state.as_str())
                .bind(device.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(not_found(device.id));
            }
            Ok(device)
        }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DevicesError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(not_found(id));
            }
            Ok(())
        }
    }

    fn exists_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<bool, DevicesError>> + Send {
        let pool = self.pool.clone();
        async move {
            let found: i64 = sqlx::query_scalar(EXISTS_BY_ID)
                .bind(id.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(found != 0)
        }
    }
}
