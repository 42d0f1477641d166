/// Server configuration.
///
/// The effective [`Config`] is layered, later sources overriding earlier
/// ones field by field:
///
/// 1. built-in defaults
/// 2. the user file `<config dir>/xmldoc-lsp/config.toml`
/// 3. the workspace file `<root>/.xmldoc-lsp.toml`
/// 4. the client's `initializationOptions`
///
/// Files are optional.  A file that cannot be read or parsed is logged and
/// skipped.
use std::path::{Path, PathBuf};

use etcetera::BaseStrategy;
use serde::Deserialize;

/// Name of the per-workspace configuration file.
pub const WORKSPACE_CONFIG_FILE: &str = ".xmldoc-lsp.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// The effective configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Open completion when the first letter of a word is typed inside a
    /// documentation comment.
    pub trigger_on_typing_letters: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trigger_on_typing_letters: true,
        }
    }
}

/// One configuration layer.  Unset fields leave the value below untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    #[serde(alias = "trigger_on_typing_letters")]
    pub trigger_on_typing_letters: Option<bool>,
}

impl Config {
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(enabled) = overrides.trigger_on_typing_letters {
            self.trigger_on_typing_letters = enabled;
        }
    }

    /// Apply the user and workspace files on top of `self`.
    pub fn load_files(&mut self, workspace_root: Option<&Path>) {
        let user_file = user_config_path();
        let workspace_file = workspace_root.map(|root| root.join(WORKSPACE_CONFIG_FILE));

        for path in [user_file, workspace_file].into_iter().flatten() {
            match read_overrides(&path) {
                Ok(Some(overrides)) => {
                    tracing::debug!("loaded configuration from {}", path.display());
                    self.apply(overrides);
                }
                Ok(None) => {}
                Err(err) => tracing::warn!("XmlDocLSP: ignoring configuration: {err}"),
            }
        }
    }
}

/// `<config dir>/xmldoc-lsp/config.toml`, when a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("xmldoc-lsp").join("config.toml"))
}

/// Read one configuration file.  A missing file is `Ok(None)`.
pub fn read_overrides(path: &Path) -> Result<Option<ConfigOverrides>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Overrides carried in the client's `initializationOptions`.
///
/// Anything that is not an object of known keys is ignored.
pub fn overrides_from_json(options: &serde_json::Value) -> ConfigOverrides {
    serde_json::from_value(options.clone()).unwrap_or_else(|err| {
        tracing::warn!("XmlDocLSP: ignoring initializationOptions: {err}");
        ConfigOverrides::default()
    })
}
