use anyhow::{Context, anyhow};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::models::PlayerConfig;

pub const CONFIG_PATH_VAR: &str = "VCP_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "VCP_CONFIG_JSON";

const DEFAULT_CANDIDATES: &[&str] = &[
    "vcp.toml",
    "vcp.json",
    "config/vcp.toml",
    "config/vcp.json",
];

/// Source that produced the player configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl PlayerConfig {
    /// Load configuration using environment variables.
    /// Evaluation order:
    /// 1) `$VCP_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$VCP_CONFIG_JSON` (inline JSON),
    /// 3) the first default file found in the working directory,
    /// 4) defaults.
    ///
    /// The result is validated before it is returned.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        let cwd = env::current_dir()
            .context("failed to resolve working directory")?;
        Self::load_with(|key| env::var(key).ok(), &cwd)
    }

    /// Same as [`PlayerConfig::load_from_env`] with an explicit variable
    /// lookup and search root.
    pub fn load_with(
        lookup: impl Fn(&str) -> Option<String>,
        search_root: &Path,
    ) -> anyhow::Result<(Self, ConfigSource)> {
        let (config, source) = Self::resolve(lookup, search_root)?;
        config
            .validate()
            .with_context(|| format!("invalid configuration from {source:?}"))?;
        log::debug!("[Config] loaded player configuration from {source:?}");
        Ok((config, source))
    }

    fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        search_root: &Path,
    ) -> anyhow::Result<(Self, ConfigSource)> {
        let set = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = set(CONFIG_PATH_VAR).map(PathBuf::from) {
            let config = Self::load_from_file(&path)?;
            Ok((config, ConfigSource::EnvPath(path)))
        } else if let Some(raw) = set(CONFIG_JSON_VAR) {
            let config = Format::Json
                .decode(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            Ok((config, ConfigSource::EnvInline))
        } else if let Some(path) = DEFAULT_CANDIDATES
            .iter()
            .map(|candidate| search_root.join(candidate))
            .find(|path| path.is_file())
        {
            let config = Self::load_from_file(&path)?;
            Ok((config, ConfigSource::File(path)))
        } else {
            Ok((Self::default(), ConfigSource::Default))
        }
    }

    /// Read one config file. The format follows the extension; anything
    /// else is tried as TOML, then JSON.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Format::of(path).decode(&contents).with_context(|| {
            format!("invalid player config {}", path.display())
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Toml,
    Json,
    Sniff,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml" | "tml") => Self::Toml,
            Some("json") => Self::Json,
            _ => Self::Sniff,
        }
    }

    fn decode(self, contents: &str) -> anyhow::Result<PlayerConfig> {
        match self {
            Self::Toml => Ok(toml::from_str(contents)?),
            Self::Json => Ok(serde_json::from_str(contents)?),
            Self::Sniff => toml::from_str(contents).or_else(|toml_err| {
                serde_json::from_str(contents).map_err(|json_err| {
                    anyhow!("neither TOML ({toml_err}) nor JSON ({json_err})")
                })
            }),
        }
    }
}
