use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use estate_finance_core::loan::property_emi::{
    DEFAULT_DOWN_PAYMENT_PERCENT, DEFAULT_RATE_PERCENT, DEFAULT_TENURE_YEARS,
};

/// Defaults applied when a loan flag is omitted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoanDefaults {
    pub annual_rate_percent: Decimal,
    pub tenure_years: u32,
    pub down_payment_percent: Decimal,
}

impl Default for LoanDefaults {
    fn default() -> Self {
        LoanDefaults {
            annual_rate_percent: DEFAULT_RATE_PERCENT,
            tenure_years: DEFAULT_TENURE_YEARS,
            down_payment_percent: DEFAULT_DOWN_PAYMENT_PERCENT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    pub loan: LoanDefaults,
}

impl CliConfig {
    /// Load from `path`, else the platform config file if present, else defaults.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(p) = path {
            return Self::load_from_path(p);
        }
        match Self::default_config_path() {
            Some(p) if p.is_file() => Self::load_from_path(&p),
            _ => {
                debug!("No config file found; using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("in", "estate", "estate").map(|d| d.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", path.display(), e))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "loan:\n  annual_rate_percent: \"9.1\"\n").unwrap();
        let config = CliConfig::load(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(config.loan.annual_rate_percent, dec!(9.1));
        assert_eq!(config.loan.tenure_years, 20);
        assert_eq!(config.loan.down_payment_percent, dec!(20));
    }

    #[test]
    fn test_empty_mapping_is_default() {
        let config: CliConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_missing_explicit_path_errors() {
        assert!(CliConfig::load(Some("/nonexistent/estate.yaml")).is_err());
    }
}
