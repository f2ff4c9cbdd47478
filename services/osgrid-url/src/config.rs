//! Configuration loading for the osgrid-url tool.
//!
//! A tile source is described by a YAML file deserialized into
//! [`TileSourceConfig`], with command line flags layered on top.
//!
//! Supports environment variable substitution using ${VAR} syntax, so keys
//! can stay out of checked-in files (`api_key: ${OS_API_KEY}`).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use osgrid_tiles::{Protocol, TileSourceConfig};

/// Load and parse a tile source configuration YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TileSourceConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read tile source config from {:?}", path.as_ref()))?;

    let expanded = expand_env_vars(&content)
        .with_context(|| format!("Failed to expand variables in {:?}", path.as_ref()))?;

    TileSourceConfig::from_yaml_str(&expanded)
        .with_context(|| format!("Failed to parse tile source config from {:?}", path.as_ref()))
}

/// Values given on the command line; each one present wins over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub protocol: Option<Protocol>,
    pub format: Option<String>,
    pub layer: Option<String>,
    pub base_url: Option<String>,
}

impl Overrides {
    pub fn apply(&self, mut config: TileSourceConfig) -> TileSourceConfig {
        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(protocol) = self.protocol {
            config.protocol = protocol;
        }
        if let Some(format) = &self.format {
            config.format = Some(format.clone());
        }
        if let Some(layer) = &self.layer {
            config.layer = Some(layer.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(base_url.clone());
        }
        config
    }
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand `${VAR}` and `${VAR:-default}` references in YAML content.
pub fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .with_context(|| format!("Unclosed variable substitution: ${{{}", after))?;

        result.push_str(&resolve_var_expr(&after[..end])?);
        rest = &after[end + 1..];
    }
    result.push_str(rest);

    Ok(result)
}

fn resolve_var_expr(expr: &str) -> Result<String> {
    match expr.split_once(":-") {
        Some((name, default)) => match std::env::var(name.trim()) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ => Ok(default.to_string()),
        },
        None => std::env::var(expr.trim())
            .with_context(|| format!("Environment variable {} not set", expr.trim())),
    }
}
