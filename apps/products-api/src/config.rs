//! Configuration for Products API

use axum_helpers::ApiKeyConfig;
use core_config::{app_info, env_or_default, env_parse, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;
use domain_products::mongodb::DEFAULT_COLLECTION;
use std::fmt;
use std::str::FromStr;

pub use core_config::Environment;

/// Where products are kept
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDb,
    /// Process-local store, lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StorageBackend::MongoDb),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::MongoDb => write!(f, "mongodb"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    /// `MONGODB_COLLECTION`
    pub collection: String,
    pub api_key: ApiKeyConfig,
    /// `STORAGE_BACKEND`
    pub storage: StorageBackend,
    /// `SEED_SAMPLE_DATA`: insert the sample catalog into an empty store
    pub seed_sample_data: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            mongodb: MongoConfig::from_env()?,
            collection: env_or_default("MONGODB_COLLECTION", DEFAULT_COLLECTION),
            api_key: ApiKeyConfig::from_env()?,
            storage: env_parse("STORAGE_BACKEND", StorageBackend::MongoDb)?,
            seed_sample_data: env_parse("SEED_SAMPLE_DATA", true)?,
        })
    }
}
