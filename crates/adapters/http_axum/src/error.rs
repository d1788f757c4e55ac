//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use devices_domain::error::DevicesError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

/// Everything an API handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    /// A classified or unclassified failure from the service layer.
    Domain(DevicesError),
    /// The path segment is not a valid device id.
    InvalidId,
    /// The request body could not be decoded.
    InvalidBody(String),
}

impl From<DevicesError> for ApiError {
    fn from(err: DevicesError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Domain(DevicesError::NotFound(err)) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: "not_found",
                    message: err.to_string(),
                    field: None,
                },
            ),
            Self::Domain(DevicesError::Validation(err)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "validation_error",
                    message: err.reason,
                    field: Some(err.field),
                },
            ),
            Self::Domain(DevicesError::BusinessRule(err)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: "business_rule_violation",
                    message: err.to_string(),
                    field: None,
                },
            ),
            Self::Domain(DevicesError::AlreadyExists(err)) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    error: "already_exists",
                    message: err.to_string(),
                    field: None,
                },
            ),
            Self::Domain(DevicesError::Storage(err)) => {
                tracing::error!(error = %err, source = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "internal_error",
                        message: "An unexpected error occurred".to_string(),
                        field: None,
                    },
                )
            }
            Self::InvalidId => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "invalid_id",
                    message: "Invalid UUID format".to_string(),
                    field: None,
                },
            ),
            Self::InvalidBody(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "validation_error",
                    message,
                    field: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devices_domain::error::{
        AlreadyExistsError, BusinessRuleError, NotFoundError, ValidationError,
    };
    use http_body_util::BodyExt;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn should_map_not_found_to_404() {
        let (status, body) = render(
            DevicesError::from(NotFoundError {
                entity: "Device",
                id: "42".to_string(),
            })
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn should_map_validation_to_400_with_field() {
        let (status, body) = render(
            DevicesError::from(ValidationError::new("name", "must be at least 3 characters"))
                .into(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["field"], "name");
        assert_eq!(body["message"], "must be at least 3 characters");
    }

    #[tokio::test]
    async fn should_map_business_rule_to_422() {
        let (status, body) = render(
            DevicesError::from(BusinessRuleError::new("cannot delete device in 'in-use' state"))
                .into(),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "business_rule_violation");
        assert!(body.get("field").is_none());
    }

    #[tokio::test]
    async fn should_map_already_exists_to_409() {
        let (status, body) = render(
            DevicesError::from(AlreadyExistsError {
                entity: "Device",
                id: "42".to_string(),
            })
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "already_exists");
    }

    #[tokio::test]
    async fn should_hide_storage_details_behind_500() {
        let err = DevicesError::Storage(Box::new(std::io::Error::other("secret path /var/db")));
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "An unexpected error occurred");
    }

    #[tokio::test]
    async fn should_map_invalid_id_to_400() {
        let (status, body) = render(ApiError::InvalidId).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_id");
    }
}
