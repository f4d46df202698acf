//! HTTP-facing errors.
//!
//! The `Display` text of each variant is exactly what clients receive in the
//! `{"error": ...}` body. Underlying causes are logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schoolmap::StoreError;
use thiserror::Error;

use crate::handlers::ErrorResponse;

/// Errors returned by the school endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    /// `addSchool` body missing a field or carrying an invalid one.
    #[error("All fields are required")]
    MissingFields,

    /// `listSchools` query without usable coordinates.
    #[error("Latitude and Longitude are required")]
    MissingCoordinates,

    /// The store holds no schools.
    #[error("No schools found")]
    NoSchools,

    /// The store rejected or failed an insert.
    #[error("Database insertion failed")]
    InsertFailed(#[source] StoreError),

    /// The store failed to list schools.
    #[error("Database query failed")]
    QueryFailed(#[source] StoreError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields | ApiError::MissingCoordinates => StatusCode::BAD_REQUEST,
            ApiError::NoSchools => StatusCode::NOT_FOUND,
            ApiError::InsertFailed(_) | ApiError::QueryFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_fixed() {
        assert_eq!(ApiError::MissingFields.to_string(), "All fields are required");
        assert_eq!(
            ApiError::MissingCoordinates.to_string(),
            "Latitude and Longitude are required"
        );
        assert_eq!(ApiError::NoSchools.to_string(), "No schools found");
    }

    #[test]
    fn test_storage_detail_not_in_message() {
        let err = ApiError::QueryFailed(StoreError::Timeout { millis: 10 });
        assert_eq!(err.to_string(), "Database query failed");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::InsertFailed(StoreError::Poisoned);
        assert_eq!(err.to_string(), "Database insertion failed");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingCoordinates.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NoSchools.status(), StatusCode::NOT_FOUND);
    }
}
