use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use crate::convert::{Converter, DEFAULT_RATE};

const DATA_DIR_VAR: &str = "UNIBUDGET_DATA_DIR";
const RATE_VAR: &str = "UNIBUDGET_RATE";
const DB_FILE: &str = "unibudget.db";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) rate: Decimal,
}

impl Config {
    /// Resolve settings from the environment, falling back to the platform
    /// data directory and the default exchange rate.
    pub(crate) fn load() -> Result<Self> {
        let config = Self::from_vars(
            std::env::var(DATA_DIR_VAR).ok(),
            std::env::var(RATE_VAR).ok(),
        )?;
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                config.data_dir.display()
            )
        })?;
        Ok(config)
    }

    pub(crate) fn from_vars(data_dir: Option<String>, rate: Option<String>) -> Result<Self> {
        let data_dir = match data_dir.filter(|d| !d.trim().is_empty()) {
            Some(dir) => PathBuf::from(crate::run::shellexpand(dir.trim())),
            None => default_data_dir()?,
        };

        let rate = match rate.filter(|r| !r.trim().is_empty()) {
            Some(raw) => {
                let rate = Decimal::from_str(raw.trim())
                    .with_context(|| format!("{RATE_VAR} is not a number: {raw}"))?;
                Converter::new(rate).with_context(|| format!("Invalid {RATE_VAR}"))?;
                rate
            }
            None => DEFAULT_RATE,
        };

        Ok(Self { data_dir, rate })
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub(crate) fn converter(&self) -> Converter {
        Converter::new(self.rate).unwrap_or_default()
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "unibudget", "UniBudget")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}
