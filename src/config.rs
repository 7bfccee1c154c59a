//! Run configuration.
//!
//! Each setting comes from its command-line flag, then its environment
//! variable (a `.env` file is loaded into the environment first), then the
//! built-in default.

use crate::dataset::Dataset;
use crate::layout;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

pub const OUTPUT_ENV: &str = "ABC_MODEL_OUTPUT";
pub const DATE_ENV: &str = "ABC_MODEL_DATE";
pub const DATA_ENV: &str = "ABC_MODEL_DATA";

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub output: Option<String>,
    pub date: Option<String>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub output: PathBuf,
    pub created: NaiveDate,
    /// Alternative case data; the embedded case is used when absent.
    pub data: Option<PathBuf>,
}

impl Config {
    /// Resolves against the process environment and the local clock.
    pub fn from_env(cli: CliOverrides) -> Result<Self> {
        Self::resolve(
            cli,
            |key| std::env::var(key).ok(),
            chrono::Local::now().date_naive(),
        )
    }

    pub fn resolve(
        cli: CliOverrides,
        env: impl Fn(&str) -> Option<String>,
        today: NaiveDate,
    ) -> Result<Self> {
        let home = env("HOME");
        let pick = |flag: Option<String>, key: &str| {
            flag.or_else(|| env(key)).filter(|v| !v.trim().is_empty())
        };

        let output = match pick(cli.output, OUTPUT_ENV) {
            Some(path) => expand_home(&path, home.as_deref())?,
            None => PathBuf::from(layout::OUTPUT_FILE_NAME),
        };

        let created = match pick(cli.date, DATE_ENV) {
            Some(date) => parse_date(&date)?,
            None => today,
        };

        let data = pick(cli.data, DATA_ENV)
            .map(|path| expand_home(&path, home.as_deref()))
            .transpose()?;

        Ok(Config {
            output,
            created,
            data,
        })
    }

    pub fn load_dataset(&self) -> Result<Dataset> {
        match &self.data {
            Some(path) => {
                log::info!("loading case data from {}", path.display());
                Dataset::load(path)
            }
            None => Dataset::embedded(),
        }
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

/// Expands a leading `~/` against the home directory.
pub fn expand_home(path: &str, home: Option<&str>) -> Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(stripped) => {
            let home = home.ok_or_else(|| {
                anyhow!("Cannot expand ~ - HOME environment variable not set")
            })?;
            Ok(PathBuf::from(home).join(stripped))
        }
        None => Ok(PathBuf::from(path)),
    }
}
