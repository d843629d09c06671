use config::{Config, ConfigError};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    pub dir: String,
    pub workbook: String,
    pub remote_base_url: Option<String>,
}

impl DataSettings {
    pub fn workbook_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.workbook)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSettings {
    pub customers: usize,
    pub vendors: usize,
    pub inventory: usize,
    pub transactions: usize,
    pub shipments: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub data: DataSettings,
    pub generator: GeneratorSettings,
}

impl Settings {
    /// Defaults, then an optional `config.toml`, then `APP_`-prefixed
    /// environment variables (`APP_GENERATOR__SEED=7`).
    pub fn new() -> Result<Self, ConfigError> {
        let mut s = Config::default();
        set_defaults(&mut s)?;
        s.merge(config::File::with_name("config").required(false))?;
        s.merge(config::Environment::with_prefix("APP").separator("__"))?;
        s.try_into()
    }
}

fn set_defaults(s: &mut Config) -> Result<(), ConfigError> {
    s.set_default("application.host", "127.0.0.1")?;
    s.set_default("application.port", 8080_i64)?;
    s.set_default("data.dir", "dummy_data")?;
    s.set_default("data.workbook", "ecommerce_data.json")?;
    s.set_default("generator.customers", 100_i64)?;
    s.set_default("generator.vendors", 20_i64)?;
    s.set_default("generator.inventory", 200_i64)?;
    s.set_default("generator.transactions", 500_i64)?;
    s.set_default("generator.shipments", 500_i64)?;
    Ok(())
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            customers: 100,
            vendors: 20,
            inventory: 200,
            transactions: 500,
            shipments: 500,
            seed: None,
        }
    }
}
