//! MySQL-backed school store.

use std::time::Duration;

use async_trait::async_trait;
use schoolmap::{NewSchool, School, SchoolStore, StoreError, StoreResult};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::config::DatabaseConfig;

const SQL_CREATE_SCHOOLS: &str = r#"
CREATE TABLE IF NOT EXISTS schools (
  id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
  name VARCHAR(255) NOT NULL,
  address VARCHAR(255) NOT NULL,
  latitude DOUBLE NOT NULL,
  longitude DOUBLE NOT NULL
)
"#;

const SQL_INSERT_SCHOOL: &str = r#"
INSERT INTO schools (name, address, latitude, longitude)
VALUES (?, ?, ?, ?)
"#;

// Casts normalize hand-made tables (signed INT ids, DECIMAL coordinates).
// CAST(... AS DOUBLE) requires MySQL 8.0.17+.
const SQL_LIST_SCHOOLS: &str = r#"
SELECT
  CAST(id AS UNSIGNED) AS id,
  name,
  address,
  CAST(latitude AS DOUBLE) AS latitude,
  CAST(longitude AS DOUBLE) AS longitude
FROM schools
ORDER BY id ASC
"#;

#[derive(Debug, sqlx::FromRow)]
struct SchoolRow {
    id: u64,
    name: String,
    address: String,
    latitude: f64,
    longitude: f64,
}

impl From<SchoolRow> for School {
    fn from(row: SchoolRow) -> Self {
        School {
            id: row.id,
            name: row.name,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

/// School store over a MySQL connection pool.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Create a store with a lazily connecting pool.
    ///
    /// No connection is attempted until the first query, so a database that
    /// is down at start-up surfaces as storage errors on requests rather than
    /// a failed boot. `acquire_timeout` bounds how long a query waits for a
    /// connection.
    pub fn connect_lazy(config: &DatabaseConfig, acquire_timeout: Duration) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(options);

        Self { pool }
    }

    /// Create the `schools` table if it does not exist.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(SQL_CREATE_SCHOOLS)
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;
        Ok(())
    }
}

#[async_trait]
impl SchoolStore for MySqlStore {
    async fn insert(&self, school: &NewSchool) -> StoreResult<u64> {
        let result = sqlx::query(SQL_INSERT_SCHOOL)
            .bind(school.name())
            .bind(school.address())
            .bind(school.latitude())
            .bind(school.longitude())
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        Ok(result.last_insert_id())
    }

    async fn list_all(&self) -> StoreResult<Vec<School>> {
        let rows = sqlx::query_as::<_, SchoolRow>(SQL_LIST_SCHOOLS)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        Ok(rows.into_iter().map(School::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_into_school() {
        let row = SchoolRow {
            id: 9,
            name: "Oak".to_string(),
            address: "Main St".to_string(),
            latitude: 1.25,
            longitude: -2.5,
        };
        let school = School::from(row);
        assert_eq!(school.id, 9);
        assert_eq!(school.name, "Oak");
        assert_eq!(school.latitude, 1.25);
        assert_eq!(school.longitude, -2.5);
    }

    #[test]
    fn test_insert_binds_every_column() {
        let placeholders = SQL_INSERT_SCHOOL.matches('?').count();
        assert_eq!(placeholders, 4);
    }

    #[test]
    fn test_list_normalizes_column_types() {
        assert!(SQL_LIST_SCHOOLS.contains("CAST(id AS UNSIGNED) AS id"));
        assert!(SQL_LIST_SCHOOLS.contains("CAST(latitude AS DOUBLE) AS latitude"));
        assert!(SQL_LIST_SCHOOLS.contains("CAST(longitude AS DOUBLE) AS longitude"));
        assert!(SQL_LIST_SCHOOLS.contains("ORDER BY id ASC"));
    }

    #[tokio::test]
    async fn test_unreachable_database_is_storage_error() {
        let config = DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            user: "nobody".to_string(),
            password: String::new(),
            name: "schools".to_string(),
            pool_size: 1,
        };
        let store = MySqlStore::connect_lazy(&config, Duration::from_millis(500));

        let err = store.list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
