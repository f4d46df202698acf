//! Proximity ranking: order schools by distance from a query point.

use crate::distance::{haversine_km, Coordinate};
use crate::school::{RankedSchool, School};

/// Annotate every record with its distance from the query point and sort
/// ascending by that distance.
///
/// The output is a permutation of the input: nothing is filtered out, and
/// records with out-of-range coordinates still receive a (degenerate)
/// distance. The sort is stable, so records at equal distance keep their
/// input order.
///
/// The query coordinates are expected to be validated by the caller; see
/// [`rank_from`] for the validated entry point.
///
/// # Example
///
/// ```
/// use schoolmap::{rank, School};
///
/// let schools = vec![
///     School { id: 1, name: "B".into(), address: "b".into(), latitude: 0.0, longitude: 1.0 },
///     School { id: 2, name: "A".into(), address: "a".into(), latitude: 0.0, longitude: 0.0 },
/// ];
/// let ranked = rank(0.0, 0.0, schools);
/// assert_eq!(ranked[0].school.id, 2);
/// assert_eq!(ranked[0].distance_km, 0.0);
/// ```
pub fn rank<I>(query_lat: f64, query_lon: f64, records: I) -> Vec<RankedSchool>
where
    I: IntoIterator<Item = School>,
{
    let mut ranked: Vec<RankedSchool> = records
        .into_iter()
        .map(|school| {
            let distance_km =
                haversine_km(query_lat, query_lon, school.latitude, school.longitude);
            RankedSchool {
                school,
                distance_km,
            }
        })
        .collect();

    // total_cmp keeps the order total even if a NaN slips through.
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}

/// [`rank`] from an already validated [`Coordinate`].
pub fn rank_from<I>(origin: Coordinate, records: I) -> Vec<RankedSchool>
where
    I: IntoIterator<Item = School>,
{
    rank(origin.latitude, origin.longitude, records)
}
