//! MySQL implementation of [`StagingStore`].
//!
//! The staging table is dropped and recreated on every write; the
//! pipeline has full-replace semantics and never upserts.

use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::interfaces::{StagingStats, StagingStore};
use permits_etl_shared::StagingRow;

/// Name of the relational staging table.
pub const STAGING_TABLE: &str = "permits_staging";

/// Rows per multi-row INSERT statement.
const INSERT_CHUNK_SIZE: usize = 500;

/// MySQL connection configuration.
#[derive(Debug, Clone)]
pub struct MySqlConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl MySqlConfig {
    fn connection_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// MySQL-backed staging store.
pub struct MySqlStagingStore {
    pool: MySqlPool,
}

impl MySqlStagingStore {
    /// Connect to MySQL with a small connection pool.
    pub async fn connect(config: &MySqlConfig) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(5)
            .connect(&config.connection_url())
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connected to MySQL"
        );

        Ok(Self { pool })
    }

    async fn recreate_table(&self) -> Result<(), StoreError> {
        sqlx::query(&format!("DROP TABLE IF EXISTS `{}`", STAGING_TABLE))
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::write(e.to_string()))?;

        let create = format!(
            "CREATE TABLE `{}` (
                `PERMIT` VARCHAR(64) NOT NULL,
                `APPL_TYPE` VARCHAR(255) NULL,
                `BLG_TYPE` VARCHAR(255) NULL,
                `VALUE` DOUBLE NOT NULL,
                `WARD` VARCHAR(255) NULL,
                `DESCRIPTION` TEXT NULL,
                `ISSUED_DATE` DATETIME NULL,
                `LOCATION` VARCHAR(512) NULL,
                `CONTRACTOR` VARCHAR(255) NULL,
                `GEOMETRY_TYPE` VARCHAR(64) NULL,
                `COORDINATES` TEXT NULL
            )",
            STAGING_TABLE
        );

        sqlx::query(&create)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::write(e.to_string()))?;

        debug!(table = %STAGING_TABLE, "Staging table recreated");
        Ok(())
    }
}

#[async_trait]
impl StagingStore for MySqlStagingStore {
    async fn replace_all(&self, rows: &[StagingRow]) -> Result<u64, StoreError> {
        self.recreate_table().await?;

        for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<MySql> = QueryBuilder::new(format!(
                "INSERT INTO `{}` (`PERMIT`, `APPL_TYPE`, `BLG_TYPE`, `VALUE`, `WARD`, \
                 `DESCRIPTION`, `ISSUED_DATE`, `LOCATION`, `CONTRACTOR`, `GEOMETRY_TYPE`, \
                 `COORDINATES`) ",
                STAGING_TABLE
            ));

            builder.push_values(chunk, |mut b, row| {
                b.push_bind(&row.permit_id)
                    .push_bind(&row.application_type)
                    .push_bind(&row.building_type)
                    .push_bind(row.value)
                    .push_bind(&row.ward)
                    .push_bind(&row.description)
                    .push_bind(row.issued_date)
                    .push_bind(&row.location)
                    .push_bind(&row.contractor)
                    .push_bind(&row.geometry_type)
                    .push_bind(&row.coordinates);
            });

            builder
                .build()
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::write(e.to_string()))?;
        }

        info!(
            table = %STAGING_TABLE,
            count = rows.len(),
            "Replaced staging table contents"
        );
        Ok(rows.len() as u64)
    }

    async fn fetch_all(&self) -> Result<Vec<StagingRow>, StoreError> {
        let query = format!(
            "SELECT `PERMIT`, `APPL_TYPE`, `BLG_TYPE`, `VALUE`, `WARD`, `DESCRIPTION`, \
             `ISSUED_DATE`, `LOCATION`, `CONTRACTOR`, `GEOMETRY_TYPE`, `COORDINATES` \
             FROM `{}`",
            STAGING_TABLE
        );

        let records = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::read(e.to_string()))?;

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            rows.push(StagingRow {
                permit_id: record
                    .try_get("PERMIT")
                    .map_err(|e| StoreError::read(e.to_string()))?,
                application_type: record
                    .try_get("APPL_TYPE")
                    .map_err(|e| StoreError::read(e.to_string()))?,
                building_type: record
                    .try_get("BLG_TYPE")
                    .map_err(|e| StoreError::read(e.to_string()))?,
                value: record
                    .try_get("VALUE")
                    .map_err(|e| StoreError::read(e.to_string()))?,
                ward: record
                    .try_get("WARD")
                    .map_err(|e| StoreError::read(e.to_string()))?,
                description: record
                    .try_get("DESCRIPTION")
                    .map_err(|e| StoreError::read(e.to_string()))?,
                issued_date: record
                    .try_get("ISSUED_DATE")
                    .map_err(|e| StoreError::read(e.to_string()))?,
                location: record
                    .try_get("LOCATION")
                    .map_err(|e| StoreError::read(e.to_string()))?,
                contractor: record
                    .try_get("CONTRACTOR")
                    .map_err(|e| StoreError::read(e.to_string()))?,
                geometry_type: record
                    .try_get("GEOMETRY_TYPE")
                    .map_err(|e| StoreError::read(e.to_string()))?,
                coordinates: record
                    .try_get("COORDINATES")
                    .map_err(|e| StoreError::read(e.to_string()))?,
            });
        }

        info!(table = %STAGING_TABLE, count = rows.len(), "Fetched staging rows");
        Ok(rows)
    }

    async fn stats(&self) -> Result<StagingStats, StoreError> {
        let query = format!(
            "SELECT COUNT(*) AS row_count, AVG(`VALUE`) AS avg_value FROM `{}`",
            STAGING_TABLE
        );

        let record = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::read(e.to_string()))?;

        let row_count: i64 = record
            .try_get("row_count")
            .map_err(|e| StoreError::read(e.to_string()))?;
        let avg_value: Option<f64> = record
            .try_get("avg_value")
            .map_err(|e| StoreError::read(e.to_string()))?;

        Ok(StagingStats {
            row_count: row_count as u64,
            avg_value: avg_value.unwrap_or(0.0),
        })
    }
}
