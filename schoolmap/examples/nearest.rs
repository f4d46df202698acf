//! Rank a handful of schools by distance from a coordinate.
//!
//! Run with: cargo run --example nearest -- 51.5074 -0.1278

use schoolmap::{rank_from, Coordinate, MemoryStore, NewSchool, SchoolStore};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let (lat, lon) = match (args.next(), args.next()) {
        (Some(lat), Some(lon)) => (lat.parse::<f64>()?, lon.parse::<f64>()?),
        _ => {
            eprintln!("Usage: cargo run --example nearest -- <latitude> <longitude>");
            std::process::exit(1);
        }
    };
    let origin = Coordinate::new(lat, lon)?;

    let store = MemoryStore::new();
    let schools = [
        ("Lycée Henri-IV", "23 Rue Clovis, Paris", 48.8462, 2.3464),
        ("Eton College", "Windsor, Berkshire", 51.4925, -0.6089),
        ("Phillips Academy", "180 Main St, Andover", 42.6473, -71.1323),
        ("Gymnasium Steglitz", "Heesestraße 15, Berlin", 52.4597, 13.3264),
        ("Kaisei Academy", "Nishinippori, Tokyo", 35.7323, 139.7660),
    ];
    for (name, address, lat, lon) in schools {
        store.insert(&NewSchool::new(name, address, lat, lon)?).await?;
    }

    println!("Schools nearest to ({}, {}):", origin.latitude, origin.longitude);
    println!("{:-<60}", "");

    for ranked in rank_from(origin, store.list_all().await?) {
        println!(
            "{:>10.1} km  {} ({})",
            ranked.distance_km, ranked.school.name, ranked.school.address
        );
    }

    Ok(())
}
