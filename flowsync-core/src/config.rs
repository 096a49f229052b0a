//! Configuration for a sync run.
//!
//! Every field has a default, so a run without `flowsync.yaml` talks to the
//! production flow API with the stock layout (`scripts/*.py`,
//! `script_log.txt`). The API key itself never lives in the file; only the
//! name of the environment variable holding it does.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "flowsync.yaml";

pub const DEFAULT_BASE_URL: &str =
    "https://eu-central-1.taktile-org.decide.taktile.com/run/api/v1/flows";

/// Settings shared by every remote call and by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the flow API; endpoints are appended to it.
    pub base_url: String,
    /// Deployment environment path segment (e.g. `sandbox`).
    pub environment: String,
    /// Organization whose flows are listed.
    pub organization_name: String,
    /// Environment variable carrying the API key.
    pub api_key_env: String,
    /// Directory holding the local scripts, relative to the working directory.
    pub scripts_dir: PathBuf,
    /// Script extension without the leading dot.
    pub script_extension: String,
    /// Append-only run log, relative to the working directory.
    pub log_file: PathBuf,
    /// Placeholder entity id sent in the patch metadata block.
    pub entity_id: String,
    pub api_version: String,
    pub execution_mode: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            environment: "sandbox".to_owned(),
            organization_name: "NB36".to_owned(),
            api_key_env: "TAKTILE_API_KEY".to_owned(),
            scripts_dir: PathBuf::from("scripts"),
            script_extension: "py".to_owned(),
            log_file: PathBuf::from("script_log.txt"),
            entity_id: "string".to_owned(),
            api_version: "v1.0".to_owned(),
            execution_mode: "sync".to_owned(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// - `Some(path)`: the file must exist.
    /// - `None`: [`DEFAULT_CONFIG_FILE`] in the working directory if present,
    ///   otherwise [`Config::default`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::load_from(path)
            }
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load_from(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a YAML config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Full URL for one endpoint, e.g. `<base>/list-decision-graphs/sandbox/decide`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}/decide",
            self.base_url.trim_end_matches('/'),
            endpoint,
            self.environment
        )
    }

    /// Local path of the script backing node `name`.
    pub fn script_path(&self, name: &str) -> PathBuf {
        if self.script_extension.is_empty() {
            self.scripts_dir.join(name)
        } else {
            self.scripts_dir
                .join(format!("{name}.{}", self.script_extension))
        }
    }

    /// Read the API key from [`Config::api_key_env`].
    ///
    /// A missing or non-unicode variable yields an empty credential; the remote
    /// side rejects it and that surfaces as an ordinary failed call.
    pub fn credential(&self) -> Credential {
        Credential(std::env::var(&self.api_key_env).unwrap_or_default())
    }
}

/// API key sent verbatim as the `X-Api-Key` header.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(<redacted>)")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
