//! # schoolmap - School Proximity Library
//!
//! Stores school locations and ranks them by great-circle distance from a
//! caller-supplied coordinate.
//!
//! ## Features
//!
//! - **Haversine distance**: double-precision great-circle distance on a
//!   6371 km sphere
//! - **Deterministic ranking**: stable ascending sort, ties keep store order
//! - **Pluggable storage**: the [`SchoolStore`] trait, with an in-memory
//!   implementation for tests and offline use
//! - **GeoJSON export** (feature `geojson`)
//!
//! ## Quick Start
//!
//! ```
//! use schoolmap::{rank, Coordinate, School};
//!
//! let origin = Coordinate::new(51.5074, -0.1278).unwrap(); // London
//! let schools = vec![School {
//!     id: 1,
//!     name: "Lycée".into(),
//!     address: "Paris".into(),
//!     latitude: 48.8566,
//!     longitude: 2.3522,
//! }];
//!
//! let ranked = rank(origin.latitude, origin.longitude, schools);
//! assert!((343.0..345.0).contains(&ranked[0].distance_km));
//! ```
//!
//! Ranking performs a full scan of the supplied records; there is no spatial
//! index.

pub mod distance;
pub mod error;
pub mod rank;
pub mod school;
pub mod store;

#[cfg(feature = "geojson")]
pub mod geojson;

// Re-export main types at crate root for convenience
pub use distance::{haversine_km, Coordinate, EARTH_RADIUS_KM};
pub use error::{Result, StoreError, StoreResult, ValidationError};
pub use rank::{rank, rank_from};
pub use school::{NewSchool, RankedSchool, School};
pub use store::{MemoryStore, SchoolStore};
