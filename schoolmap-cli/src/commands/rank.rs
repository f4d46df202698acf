use anyhow::{Context, Result};
use clap::ValueEnum;
use schoolmap::{geojson::ranked_to_feature_collection, rank_from, Coordinate, NewSchool, School};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON array, same shape as the HTTP listing
    Json,
    /// GeoJSON FeatureCollection
    Geojson,
}

#[derive(Debug, Deserialize)]
struct CsvSchool {
    id: Option<u64>,
    name: String,
    address: String,
    latitude: f64,
    longitude: f64,
}

pub fn run(
    input: PathBuf,
    lat: f64,
    lon: f64,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let origin = Coordinate::new(lat, lon).context("Invalid query coordinate")?;
    let schools = load_schools(&input)?;

    let mut ranked = rank_from(origin, schools);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ranked)?),
        OutputFormat::Geojson => println!("{}", ranked_to_feature_collection(&ranked)),
        OutputFormat::Table => {
            if ranked.is_empty() {
                println!("No schools found in: {}", input.display());
                return Ok(());
            }
            println!(
                "{:>6} {:>12}  {:<30} {}",
                "ID", "DISTANCE_KM", "NAME", "ADDRESS"
            );
            println!("{}", "-".repeat(72));
            for r in &ranked {
                println!(
                    "{:>6} {:>12.3}  {:<30} {}",
                    r.school.id, r.distance_km, r.school.name, r.school.address
                );
            }
        }
    }

    Ok(())
}

/// Load and validate schools from a CSV file.
///
/// Rows without an `id` value are numbered in file order, starting above the
/// highest explicit id so the two never collide.
pub fn load_schools(path: &Path) -> Result<Vec<School>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (index, row) in reader.deserialize::<CsvSchool>().enumerate() {
        let line = index + 2; // header is line 1
        let row = row.with_context(|| format!("Invalid CSV row at line {}", line))?;
        let school = NewSchool::new(row.name, row.address, row.latitude, row.longitude)
            .with_context(|| format!("Invalid school at line {}", line))?;
        rows.push((row.id, school));
    }

    let mut next_id = rows.iter().filter_map(|(id, _)| *id).max().unwrap_or(0);
    let schools = rows
        .into_iter()
        .map(|(id, school)| {
            let id = id.unwrap_or_else(|| {
                next_id += 1;
                next_id
            });
            school.into_school(id)
        })
        .collect();

    Ok(schools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("schools.csv");
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_schools_without_ids() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "name,address,latitude,longitude\n\
             Oak,Main St,0,1\n\
             Pine,\"2 High St, Leeds\",0,0\n",
        );

        let schools = load_schools(&path).unwrap();
        assert_eq!(schools.len(), 2);
        assert_eq!(schools[0].id, 1);
        assert_eq!(schools[1].id, 2);
        assert_eq!(schools[1].address, "2 High St, Leeds");
    }

    #[test]
    fn test_load_schools_with_ids() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "id,name,address,latitude,longitude\n\
             10,Oak,Main St,51.5,-0.12\n\
             20,Pine,High St,48.85,2.35\n",
        );

        let schools = load_schools(&path).unwrap();
        assert_eq!(schools[0].id, 10);
        assert_eq!(schools[1].id, 20);
        assert_eq!(schools[1].longitude, 2.35);
    }

    #[test]
    fn test_load_schools_mixed_ids_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "id,name,address,latitude,longitude\n\
             ,Oak,Main St,0,1\n\
             2,Pine,High St,0,2\n\
             ,Elm,Low St,0,3\n",
        );

        let schools = load_schools(&path).unwrap();
        let ids: Vec<u64> = schools.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 4]);
    }

    #[test]
    fn test_load_schools_rejects_invalid_row() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "name,address,latitude,longitude\n\
             Oak,Main St,0,1\n\
             Pine,High St,123,0\n",
        );

        let err = load_schools(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("line 3"));
    }

    #[test]
    fn test_load_schools_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(load_schools(&dir.path().join("missing.csv")).is_err());
    }

    #[test]
    fn test_loaded_schools_rank() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "name,address,latitude,longitude\n\
             Far,A,0,2\n\
             Near,B,0,1\n",
        );

        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let ranked = rank_from(origin, load_schools(&path).unwrap());
        assert_eq!(ranked[0].school.name, "Near");
        assert_eq!(ranked[1].school.name, "Far");
    }
}
