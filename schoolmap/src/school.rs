//! School records and their distance-annotated form.

use serde::{Deserialize, Serialize};

use crate::distance::{validate_latitude, validate_longitude};
use crate::error::{Result, ValidationError};

/// A stored school. Immutable once created; `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A validated school waiting to be inserted.
///
/// Only constructible through [`NewSchool::new`], so every instance has
/// non-empty text fields and in-range coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchool {
    name: String,
    address: String,
    latitude: f64,
    longitude: f64,
}

impl NewSchool {
    /// Validate and build an insert payload.
    ///
    /// Whitespace-only text counts as empty; accepted text is stored as
    /// given. `0.0` is a valid coordinate.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self> {
        let name = non_empty(name.into(), "name")?;
        let address = non_empty(address.into(), "address")?;
        Ok(Self {
            name,
            address,
            latitude: validate_latitude(latitude)?,
            longitude: validate_longitude(longitude)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Attach a store-assigned id.
    pub fn into_school(self, id: u64) -> School {
        School {
            id,
            name: self.name,
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(value)
}

/// A school annotated with its distance from a query point.
///
/// Lives for a single response and is never persisted. Serializes flat, with
/// the distance under the `distance` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSchool {
    #[serde(flatten)]
    pub school: School,
    /// Great-circle distance from the query point, in kilometers.
    #[serde(rename = "distance")]
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_school_valid() {
        let school = NewSchool::new("Greenwood High", "12 Park Lane", 12.97, 77.59).unwrap();
        assert_eq!(school.name(), "Greenwood High");
        assert_eq!(school.address(), "12 Park Lane");
        assert_eq!(school.latitude(), 12.97);
        assert_eq!(school.longitude(), 77.59);
    }

    #[test]
    fn test_new_school_accepts_zero_coordinates() {
        assert!(NewSchool::new("Equator School", "Null Island", 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_new_school_keeps_text_as_given() {
        let school = NewSchool::new("  Oak School ", "\tMain St\n", 1.0, 2.0).unwrap();
        assert_eq!(school.name(), "  Oak School ");
        assert_eq!(school.address(), "\tMain St\n");
    }

    #[test]
    fn test_new_school_rejects_empty_text() {
        assert_eq!(
            NewSchool::new("", "Main St", 1.0, 2.0),
            Err(ValidationError::EmptyField { field: "name" })
        );
        assert_eq!(
            NewSchool::new("Oak", "   ", 1.0, 2.0),
            Err(ValidationError::EmptyField { field: "address" })
        );
    }

    #[test]
    fn test_new_school_rejects_bad_coordinates() {
        assert!(NewSchool::new("Oak", "Main St", 95.0, 2.0).is_err());
        assert!(NewSchool::new("Oak", "Main St", 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_ranked_school_serializes_flat() {
        let ranked = RankedSchool {
            school: NewSchool::new("Oak", "Main St", 1.5, 2.5)
                .unwrap()
                .into_school(7),
            distance_km: 12.5,
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Oak");
        assert_eq!(json["address"], "Main St");
        assert_eq!(json["latitude"], 1.5);
        assert_eq!(json["longitude"], 2.5);
        assert_eq!(json["distance"], 12.5);
        assert!(json.get("school").is_none());
        assert!(json.get("distance_km").is_none());
    }
}
