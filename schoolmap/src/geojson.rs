//! GeoJSON export of ranked schools.
//!
//! Enable the `geojson` feature to use this module.
//!
//! # Example
//!
//! ```ignore
//! use schoolmap::{rank, geojson::ranked_to_feature_collection};
//!
//! let ranked = rank(51.5, -0.12, schools);
//! let collection = ranked_to_feature_collection(&ranked);
//! println!("{}", collection);
//! ```

use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::school::{RankedSchool, School};

/// Convert a school into a Point feature.
///
/// The geometry uses GeoJSON order `[longitude, latitude]`. The feature id
/// is the school id, and `name` and `address` are carried as properties.
pub fn school_to_feature(school: &School) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), JsonValue::from(school.id));
    properties.insert("name".to_string(), JsonValue::from(school.name.clone()));
    properties.insert(
        "address".to_string(),
        JsonValue::from(school.address.clone()),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            school.longitude,
            school.latitude,
        ]))),
        id: Some(Id::Number(school.id.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Convert ranked schools into a FeatureCollection, preserving order.
///
/// Each feature additionally carries a `distance` property in kilometers.
pub fn ranked_to_feature_collection(ranked: &[RankedSchool]) -> FeatureCollection {
    let features = ranked
        .iter()
        .map(|r| {
            let mut feature = school_to_feature(&r.school);
            feature.set_property("distance", r.distance_km);
            feature
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
