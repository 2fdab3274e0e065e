//! TOML configuration deserialisation for report jobs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use glasscat_optics::air::STANDARD_PRESSURE;
use glasscat_optics::Environment;
use serde::Deserialize;

/// Top-level report configuration.
#[derive(Debug, Deserialize)]
pub struct ReportJob {
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub catalog: Vec<CatalogConfig>,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Ambient conditions glasses are evaluated under.
#[derive(Debug, Deserialize)]
pub struct EnvironmentConfig {
    /// Temperature in °C (default: 25).
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Pressure in Pa (default: 101325).
    #[serde(default = "default_pressure")]
    pub pressure: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            pressure: default_pressure(),
        }
    }
}

impl EnvironmentConfig {
    pub fn to_environment(&self) -> Environment {
        Environment {
            temperature: self.temperature,
            pressure: self.pressure,
        }
    }
}

fn default_temperature() -> f64 {
    25.0
}
fn default_pressure() -> f64 {
    STANDARD_PRESSURE
}

/// One catalog file to load.
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// `.agf` or `.xml` file; relative paths resolve against the config file.
    pub path: PathBuf,
}

/// What to print.
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Property keys, as accepted by `GlassAt::get_value` (default: nd, vd).
    #[serde(default = "default_properties")]
    pub properties: Vec<String>,
    /// Restrict the report to these glass names (default: all glasses).
    #[serde(default)]
    pub glasses: Vec<String>,
    /// Print load diagnostics after the table (default: false).
    #[serde(default)]
    pub show_diagnostics: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            properties: default_properties(),
            glasses: Vec::new(),
            show_diagnostics: false,
        }
    }
}

fn default_properties() -> Vec<String> {
    vec!["nd".into(), "vd".into()]
}

/// Load and parse a TOML report configuration file.
///
/// Relative catalog paths are rewritten against the directory holding the
/// configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<ReportJob> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let mut job = parse_config(&content)?;
    if let Some(base) = path.parent() {
        for catalog in &mut job.catalog {
            if catalog.path.is_relative() {
                catalog.path = base.join(&catalog.path);
            }
        }
    }
    Ok(job)
}

pub fn parse_config(content: &str) -> anyhow::Result<ReportJob> {
    let job: ReportJob = toml::from_str(content)?;
    if job.catalog.is_empty() {
        anyhow::bail!("Configuration names no [[catalog]] entries");
    }
    Ok(job)
}
