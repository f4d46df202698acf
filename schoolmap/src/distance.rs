//! Great-circle distance on a spherical Earth.
//!
//! Distances use the haversine formula with a mean Earth radius of
//! [`EARTH_RADIUS_KM`]. All arithmetic is `f64`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two points given in decimal degrees.
///
/// Defined for any real input: out-of-range coordinates still produce a
/// number. Non-finite input yields a non-finite result and must be rejected
/// by the caller (see [`Coordinate::new`]).
///
/// # Example
///
/// ```
/// use schoolmap::distance::haversine_km;
///
/// // London to Paris
/// let d = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
/// assert!((343.0..345.0).contains(&d));
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1].
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// A validated geographic coordinate in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude, -90 to 90.
    pub latitude: f64,
    /// Longitude, -180 to 180.
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// `0.0` is a valid latitude and longitude.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self {
            latitude: validate_latitude(latitude)?,
            longitude: validate_longitude(longitude)?,
        })
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Check that a latitude is finite and within [-90, 90].
pub fn validate_latitude(lat: f64) -> Result<f64> {
    if !lat.is_finite() {
        return Err(ValidationError::NonFinite { field: "latitude" });
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::LatitudeOutOfRange { lat });
    }
    Ok(lat)
}

/// Check that a longitude is finite and within [-180, 180].
pub fn validate_longitude(lon: f64) -> Result<f64> {
    if !lon.is_finite() {
        return Err(ValidationError::NonFinite { field: "longitude" });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ValidationError::LongitudeOutOfRange { lon });
    }
    Ok(lon)
}
