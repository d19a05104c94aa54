//! CLI configuration: environment defaults, request assembly.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use weaver_lacing::PatternRequest;

use crate::error::{CliError, Result};

/// How a computed pattern is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table for the bench.
    #[default]
    Table,
    /// `{ params, derived, rows }` as JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(CliError::Config(format!("unknown WEAVER_FORMAT {:?}", other))),
        }
    }
}

/// Settings that hold across invocations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeaverConfig {
    /// Output format when `--format` is not given
    pub format: OutputFormat,

    /// Parameter file used when `--params` is not given
    pub params_file: Option<PathBuf>,
}

impl WeaverConfig {
    /// Read `WEAVER_FORMAT` and `WEAVER_PARAMS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let format = match lookup("WEAVER_FORMAT") {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => OutputFormat::default(),
        };

        let params_file = lookup("WEAVER_PARAMS")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            format,
            params_file,
        })
    }
}

/// Load a JSON `PatternRequest`. Missing fields take the default build.
pub fn load_request(path: &Path) -> Result<PatternRequest> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut value: serde_json::Value = serde_json::from_str(&text)?;
    let mut merged = serde_json::to_value(PatternRequest::default())?;
    if let (Some(base), Some(overrides)) = (merged.as_object_mut(), value.as_object_mut()) {
        base.append(overrides);
    } else {
        return Err(CliError::Config(format!(
            "{} must contain a JSON object",
            path.display()
        )));
    }
    Ok(serde_json::from_value(merged)?)
}
