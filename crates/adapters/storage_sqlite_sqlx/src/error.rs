//! Storage-specific error type wrapping sqlx errors.

use devices_domain::error::DevicesError;

/// Errors originating from the `SQLite` storage layer.
///
/// These are never classified: a missing row or a duplicate id is detected
/// by the repository itself and reported with the matching [`DevicesError`]
/// variant before reaching this type.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for DevicesError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
