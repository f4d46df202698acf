use anyhow::{Context, Result};
use schoolmap::Coordinate;
use serde::Serialize;

#[derive(Serialize)]
struct DistanceResponse {
    from: Coordinate,
    to: Coordinate,
    distance_km: f64,
}

pub fn run(from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64, json: bool) -> Result<()> {
    let from = Coordinate::new(from_lat, from_lon).context("Invalid starting coordinate")?;
    let to = Coordinate::new(to_lat, to_lon).context("Invalid destination coordinate")?;
    let distance_km = from.distance_to(&to);

    if json {
        let response = DistanceResponse {
            from,
            to,
            distance_km,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("{:.3} km", distance_km);
    }

    Ok(())
}
