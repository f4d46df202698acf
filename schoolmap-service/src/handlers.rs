//! HTTP request handlers for the school service.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use geojson::FeatureCollection;
use schoolmap::{
    geojson::ranked_to_feature_collection, rank_from, Coordinate, NewSchool, RankedSchool,
    StoreError, StoreResult, ValidationError,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::AppState;

/// A coordinate as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Request body for `POST /addSchool`. Every field is required.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddSchoolRequest {
    /// School name (non-empty).
    #[schema(example = "Greenwood High")]
    pub name: Option<String>,
    /// Street address (non-empty).
    #[schema(example = "12 Park Lane")]
    pub address: Option<String>,
    /// Latitude in decimal degrees (-90 to 90).
    #[schema(value_type = Option<f64>, example = 12.9716)]
    pub latitude: Option<NumberOrText>,
    /// Longitude in decimal degrees (-180 to 180).
    #[schema(value_type = Option<f64>, example = 77.5946)]
    pub longitude: Option<NumberOrText>,
}

/// Successful `addSchool` response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddSchoolResponse {
    pub message: String,
    /// Id assigned by the store.
    pub school_id: u64,
}

/// Query parameters for the listing endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSchoolsQuery {
    /// Latitude in decimal degrees (-90 to 90).
    #[param(value_type = f64)]
    pub latitude: Option<String>,
    /// Longitude in decimal degrees (-180 to 180).
    #[param(value_type = f64)]
    pub longitude: Option<String>,
}

/// A school with its distance from the query point.
#[derive(Debug, Serialize, ToSchema)]
pub struct SchoolResponse {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Great-circle distance from the query point in kilometers.
    pub distance: f64,
}

impl From<RankedSchool> for SchoolResponse {
    fn from(ranked: RankedSchool) -> Self {
        Self {
            id: ranked.school.id,
            name: ranked.school.name,
            address: ranked.school.address,
            latitude: ranked.school.latitude,
            longitude: ranked.school.longitude,
            distance: ranked.distance_km,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Add a school.
///
/// # Returns
///
/// - `201 Created` with the new school id
/// - `400 Bad Request` if any field is missing or invalid
/// - `500 Internal Server Error` if the store fails
#[utoipa::path(
    post,
    path = "/addSchool",
    tag = "schools",
    request_body = AddSchoolRequest,
    responses(
        (status = 201, description = "School added", body = AddSchoolResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn add_school(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddSchoolRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddSchoolResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable addSchool body");
        ApiError::MissingFields
    })?;

    let school = validate_new_school(request).map_err(|e| {
        tracing::debug!(error = %e, "Rejected addSchool request");
        ApiError::MissingFields
    })?;

    let school_id = bounded(state.store_timeout, state.store.insert(&school))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Database insertion failed");
            ApiError::InsertFailed(e)
        })?;

    tracing::info!(school_id = school_id, name = school.name(), "School added");

    Ok((
        StatusCode::CREATED,
        Json(AddSchoolResponse {
            message: "School added successfully".to_string(),
            school_id,
        }),
    ))
}

/// List all schools sorted by distance from the given coordinates.
///
/// # Returns
///
/// - `200 OK` with schools in ascending distance order
/// - `400 Bad Request` if coordinates are missing or invalid
/// - `404 Not Found` if the store holds no schools
/// - `500 Internal Server Error` if the store fails
#[utoipa::path(
    get,
    path = "/listSchools",
    tag = "schools",
    params(ListSchoolsQuery),
    responses(
        (status = 200, description = "Schools sorted by distance", body = [SchoolResponse]),
        (status = 400, description = "Missing or invalid coordinates", body = ErrorResponse),
        (status = 404, description = "No schools stored", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_schools(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListSchoolsQuery>, QueryRejection>,
) -> Result<Json<Vec<SchoolResponse>>, ApiError> {
    let ranked = ranked_schools(&state, query).await?;
    Ok(Json(ranked.into_iter().map(SchoolResponse::from).collect()))
}

/// List all schools sorted by distance, as a GeoJSON FeatureCollection.
///
/// Same validation and errors as `GET /listSchools`.
#[utoipa::path(
    get,
    path = "/listSchools/geojson",
    tag = "schools",
    params(ListSchoolsQuery),
    responses(
        (status = 200, description = "FeatureCollection of schools sorted by distance"),
        (status = 400, description = "Missing or invalid coordinates", body = ErrorResponse),
        (status = 404, description = "No schools stored", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_schools_geojson(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListSchoolsQuery>, QueryRejection>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let ranked = ranked_schools(&state, query).await?;
    Ok(Json(ranked_to_feature_collection(&ranked)))
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Validate coordinates, fetch every school and rank them.
async fn ranked_schools(
    state: &AppState,
    query: Result<Query<ListSchoolsQuery>, QueryRejection>,
) -> Result<Vec<RankedSchool>, ApiError> {
    let origin = query
        .map_err(|e| e.to_string())
        .and_then(|Query(q)| parse_query_coordinate(&q).map_err(|e| e.to_string()))
        .map_err(|reason| {
            tracing::warn!(reason = %reason, "Invalid coordinates");
            ApiError::MissingCoordinates
        })?;

    let schools = bounded(state.store_timeout, state.store.list_all())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Database query failed");
            ApiError::QueryFailed(e)
        })?;

    if schools.is_empty() {
        tracing::warn!("No schools found in the store");
        return Err(ApiError::NoSchools);
    }

    let ranked = rank_from(origin, schools);
    tracing::info!(
        lat = origin.latitude,
        lon = origin.longitude,
        count = ranked.len(),
        "Schools ranked"
    );
    Ok(ranked)
}

/// Validate an `addSchool` body. A field is present when its key exists and
/// is not `null`; `0` is a valid coordinate.
pub fn validate_new_school(request: AddSchoolRequest) -> Result<NewSchool, ValidationError> {
    let name = request
        .name
        .ok_or(ValidationError::MissingField { field: "name" })?;
    let address = request
        .address
        .ok_or(ValidationError::MissingField { field: "address" })?;
    let latitude = number_field(request.latitude, "latitude")?;
    let longitude = number_field(request.longitude, "longitude")?;

    NewSchool::new(name, address, latitude, longitude)
}

fn number_field(
    value: Option<NumberOrText>,
    field: &'static str,
) -> Result<f64, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField { field }),
        Some(NumberOrText::Number(n)) => Ok(n),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::NotANumber { field }),
    }
}

/// Parse and validate the `latitude`/`longitude` query parameters.
pub fn parse_query_coordinate(query: &ListSchoolsQuery) -> Result<Coordinate, ValidationError> {
    let latitude = query_number(query.latitude.as_deref(), "latitude")?;
    let longitude = query_number(query.longitude.as_deref(), "longitude")?;
    Coordinate::new(latitude, longitude)
}

fn query_number(value: Option<&str>, field: &'static str) -> Result<f64, ValidationError> {
    let raw = value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingField { field })?;
    raw.parse::<f64>()
        .map_err(|_| ValidationError::NotANumber { field })
}

/// Run a store call, failing with [`StoreError::Timeout`] if it takes longer
/// than `timeout`.
async fn bounded<T, F>(timeout: Duration, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout {
            millis: timeout.as_millis() as u64,
        }),
    }
}
