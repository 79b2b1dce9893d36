//! Enrichment configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "hmdb": { "cooldown_ms": 5000 }, "pubmed": { "progress_path": "progress.csv" } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EnrichError, Result};
use crate::lookup::DEFAULT_USER_AGENT;

/// Settings for the HMDB id and status lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HmdbConfig {
    /// Site root; search and metabolite pages hang off it.
    pub base_url: String,
    /// Column holding CAS numbers.
    pub id_column: String,
    /// Column written by the id lookup.
    pub id_output_column: String,
    /// Column written by the status lookup.
    pub status_output_column: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Pause after every request, in milliseconds.
    pub cooldown_ms: u64,
}

impl Default for HmdbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hmdb.ca".to_string(),
            id_column: "casId_final".to_string(),
            id_output_column: "HMDB_id".to_string(),
            status_output_column: "HMDB_status".to_string(),
            timeout_secs: 20,
            cooldown_ms: 2000,
        }
    }
}

impl HmdbConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// Settings for the PubMed hit counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PubMedConfig {
    /// Search URL the quoted term is appended to.
    pub search_url: String,
    /// Column written when results are attached to a table.
    pub output_column: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Pause after every request, in milliseconds (none by default).
    pub cooldown_ms: u64,
    /// CSV snapshot rewritten after every processed row.
    pub progress_path: Option<PathBuf>,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            search_url: "https://pubmed.ncbi.nlm.nih.gov/?term=".to_string(),
            output_column: "pubmed_hits".to_string(),
            timeout_secs: 20,
            cooldown_ms: 0,
            progress_path: None,
        }
    }
}

impl PubMedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    pub hmdb: HmdbConfig,
    pub pubmed: PubMedConfig,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            hmdb: HmdbConfig::default(),
            pubmed: PubMedConfig::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl EnrichConfig {
    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| EnrichError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EnrichConfig = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Reject values that would make every lookup fail.
    pub fn check(&self) -> Result<()> {
        url::Url::parse(&self.hmdb.base_url).map_err(|e| {
            EnrichError::Config(format!("hmdb.base_url '{}': {}", self.hmdb.base_url, e))
        })?;
        url::Url::parse(&self.pubmed.search_url).map_err(|e| {
            EnrichError::Config(format!(
                "pubmed.search_url '{}': {}",
                self.pubmed.search_url, e
            ))
        })?;
        if self.hmdb.timeout_secs == 0 || self.pubmed.timeout_secs == 0 {
            return Err(EnrichError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = EnrichConfig::default();
        assert_eq!(config.hmdb.cooldown(), Duration::from_secs(2));
        assert_eq!(config.hmdb.timeout(), Duration::from_secs(20));
        assert_eq!(config.pubmed.timeout(), Duration::from_secs(20));
        assert!(config.pubmed.cooldown().is_zero());
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"hmdb": {{"cooldown_ms": 5000}}, "pubmed": {{"progress_path": "progress.csv"}}}}"#
        )
        .unwrap();

        let config = EnrichConfig::load(file.path()).unwrap();
        assert_eq!(config.hmdb.cooldown_ms, 5000);
        assert_eq!(config.hmdb.id_column, "casId_final");
        assert_eq!(
            config.pubmed.progress_path,
            Some(PathBuf::from("progress.csv"))
        );
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut config = EnrichConfig::default();
        config.hmdb.base_url = "not a url".to_string();
        assert!(matches!(config.check(), Err(EnrichError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = EnrichConfig::load("/nonexistent/chemenrich.json").unwrap_err();
        assert!(matches!(err, EnrichError::Io { .. }));
    }
}
