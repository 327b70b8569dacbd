//! Environment-driven pipeline settings.

use std::env;
use std::path::PathBuf;

use crate::EtlError;
use permits_etl_repository::{MongoConfig, MySqlConfig, S3Config};

/// Default LocalStack (S3-compatible) endpoint.
const DEFAULT_LOCALSTACK_URL: &str = "http://localstack:4566";

/// Default bucket for the raw zone.
const DEFAULT_S3_BUCKET: &str = "ottawa-raw";

/// Default object key of the raw dataset.
const DEFAULT_S3_OBJECT_NAME: &str = "permits_ottawa.json";

/// Default path of the local raw dataset.
const DEFAULT_RAW_FILE_PATH: &str = "data/raw/sample_permits_ottawa.json";

/// Default path of the summary report.
const DEFAULT_REPORT_PATH: &str = "data/analysis_report.json";

/// Default search engine host.
const DEFAULT_SEARCH_HOST: &str = "elasticsearch";

/// All settings for one pipeline run, resolved from the environment.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub localstack_url: String,
    pub s3_bucket: String,
    pub s3_object_name: String,
    pub raw_file_path: PathBuf,
    pub aws_access_key: String,
    pub aws_secret_key: String,
    pub aws_region: String,

    pub mysql_host: String,
    pub mysql_port: u16,
    pub mysql_user: String,
    pub mysql_password: String,
    pub mysql_database: String,

    pub mongo_host: String,
    pub mongo_port: u16,
    pub mongo_user: String,
    pub mongo_password: String,
    pub mongo_database: String,

    pub search_url: String,
    pub report_path: PathBuf,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_port(key: &str, default: u16) -> Result<u16, EtlError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| EtlError::config(format!("{} is not a valid port: {}", key, raw))),
        Err(_) => Ok(default),
    }
}

impl PipelineSettings {
    /// Resolve all settings from environment variables, falling back
    /// to the docker-compose defaults.
    pub fn from_env() -> Result<Self, EtlError> {
        Ok(Self {
            localstack_url: env_or("LOCALSTACK_URL", DEFAULT_LOCALSTACK_URL),
            s3_bucket: env_or("S3_BUCKET_RAW", DEFAULT_S3_BUCKET),
            s3_object_name: env_or("S3_OBJECT_NAME", DEFAULT_S3_OBJECT_NAME),
            raw_file_path: PathBuf::from(env_or("RAW_FILE_PATH", DEFAULT_RAW_FILE_PATH)),
            aws_access_key: env_or("AWS_ACCESS_KEY_ID", "test"),
            aws_secret_key: env_or("AWS_SECRET_ACCESS_KEY", "test"),
            aws_region: env_or("AWS_DEFAULT_REGION", "us-east-1"),

            mysql_host: env_or("MYSQL_HOST", "mysql"),
            mysql_port: env_port("MYSQL_PORT", 3306)?,
            mysql_user: env_or("MYSQL_USER", "airflow"),
            mysql_password: env_or("MYSQL_PASSWORD", "airflow"),
            mysql_database: env_or("MYSQL_DATABASE", "airflow"),

            mongo_host: env_or("MONGO_HOST", "mongo"),
            mongo_port: env_port("MONGO_PORT", 27017)?,
            mongo_user: env_or("MONGO_INITDB_ROOT_USERNAME", "root"),
            mongo_password: env_or("MONGO_INITDB_ROOT_PASSWORD", "example"),
            mongo_database: env_or("MONGO_INITDB_DATABASE", "ottawa"),

            search_url: format!(
                "http://{}:{}",
                env_or("ES_HOST", DEFAULT_SEARCH_HOST),
                env_port("ES_HTTP_PORT", 9200)?
            ),
            report_path: PathBuf::from(env_or("REPORT_PATH", DEFAULT_REPORT_PATH)),
        })
    }

    pub fn s3_config(&self) -> S3Config {
        S3Config {
            endpoint: self.localstack_url.clone(),
            bucket: self.s3_bucket.clone(),
            object_key: self.s3_object_name.clone(),
            access_key: self.aws_access_key.clone(),
            secret_key: self.aws_secret_key.clone(),
            region: self.aws_region.clone(),
        }
    }

    pub fn mysql_config(&self) -> MySqlConfig {
        MySqlConfig {
            host: self.mysql_host.clone(),
            port: self.mysql_port,
            user: self.mysql_user.clone(),
            password: self.mysql_password.clone(),
            database: self.mysql_database.clone(),
        }
    }

    pub fn mongo_config(&self) -> MongoConfig {
        MongoConfig {
            host: self.mongo_host.clone(),
            port: self.mongo_port,
            user: self.mongo_user.clone(),
            password: self.mongo_password.clone(),
            database: self.mongo_database.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_port_defaults_when_unset() {
        assert_eq!(env_port("PERMITS_ETL_TEST_PORT_UNSET", 3306).unwrap(), 3306);
    }

    #[test]
    fn test_env_port_rejects_garbage() {
        env::set_var("PERMITS_ETL_TEST_PORT_BAD", "not-a-port");
        let result = env_port("PERMITS_ETL_TEST_PORT_BAD", 3306);
        env::remove_var("PERMITS_ETL_TEST_PORT_BAD");
        assert!(result.is_err());
    }
}
