use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vcs: VcsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VcsSettings {
    /// Remote holding the reference branch
    #[serde(default = "default_remote")]
    pub remote: String,
    /// Branch compared against HEAD
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Fetch each file's content at `remote/branch`
    #[serde(default)]
    pub reference_content: bool,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for VcsSettings {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            branch: default_branch(),
            reference_content: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_ref_name("remote", &self.vcs.remote)?;
        validate_ref_name("branch", &self.vcs.branch)?;
        Ok(())
    }
}

fn validate_ref_name(key: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        anyhow::bail!("vcs.{} must not be empty", key);
    }
    if value.contains(char::is_whitespace) || value.contains("..") {
        anyhow::bail!("vcs.{} '{}' is not a valid git reference name", key, value);
    }
    Ok(())
}
