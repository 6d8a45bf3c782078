//! Configuration file support.
//!
//! Two configuration file locations are supported:
//! - Global: `~/.nwdi-checkstyle/config.toml` - User-wide defaults
//! - Project: `<workspace>/.nwdi-checkstyle/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use miette::Diagnostic as MietteDiagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builder::RenderMode;

/// Name of the per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".nwdi-checkstyle";

/// Errors in the user-supplied configuration. Never retried.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigurationError {
    #[error("no checkstyle configuration given")]
    #[diagnostic(
        code(nwdi_checkstyle::config::missing),
        help("Set `checkstyle.config` in .nwdi-checkstyle/config.toml")
    )]
    MissingConfiguration,

    #[error("checkstyle configuration `{}` is empty", path.display())]
    #[diagnostic(code(nwdi_checkstyle::config::empty))]
    EmptyConfiguration { path: PathBuf },

    #[error("invalid exclude pattern `{pattern}`")]
    #[diagnostic(
        code(nwdi_checkstyle::config::exclude),
        help("Exclude patterns use Ant syntax, e.g. `**/generated/**`")
    )]
    InvalidExclude {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("invalid content exclude expression `{expression}`")]
    #[diagnostic(code(nwdi_checkstyle::config::regexp))]
    InvalidRegexp {
        expression: String,
        #[source]
        source: regex::Error,
    },
}

/// Tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Checkstyle settings
    pub checkstyle: CheckstyleConfig,

    /// Ant settings
    pub ant: AntConfig,

    /// Direct analysis settings
    pub analysis: AnalysisConfig,
}

/// Checkstyle-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CheckstyleConfig {
    /// Path to the global checkstyle configuration file
    pub config: Option<PathBuf>,

    /// Ant-style filename exclude patterns
    pub excludes: Vec<String>,

    /// Regular expressions; sources whose content matches one are excluded
    pub exclude_contains_regexps: Vec<String>,

    /// Build script layout
    pub mode: Option<RenderMode>,
}

/// Ant-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AntConfig {
    /// Ant executable (defaults to `ant` in PATH)
    pub program: Option<PathBuf>,

    /// Directory holding the checkstyle jars, passed as `checkstyle.dir`
    pub checkstyle_dir: Option<PathBuf>,

    /// Additional properties passed with `-D`
    pub properties: BTreeMap<String, String>,
}

/// Direct (in-process) analysis configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Java executable (defaults to `java` in PATH)
    pub java: Option<PathBuf>,

    /// Path to the checkstyle "all" jar
    pub jar: Option<PathBuf>,
}

/// Inputs of one generation pass, resolved from [`Config`].
#[derive(Debug, Clone, Default)]
pub struct GenerateConfig {
    /// Checkstyle configuration content, written verbatim into the workspace
    pub checkstyle_config: String,

    /// Ant-style filename exclude patterns
    pub excludes: Vec<String>,

    /// Content-match exclude expressions
    pub exclude_contains_regexps: Vec<String>,

    /// Build script layout
    pub mode: RenderMode,
}

impl GenerateConfig {
    /// Fail with [`ConfigurationError::MissingConfiguration`] if there is no
    /// checkstyle configuration to write.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.checkstyle_config.trim().is_empty() {
            return Err(ConfigurationError::MissingConfiguration);
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.checkstyle.config.is_some() {
            self.checkstyle.config = other.checkstyle.config;
        }
        if !other.checkstyle.excludes.is_empty() {
            self.checkstyle.excludes = other.checkstyle.excludes;
        }
        if !other.checkstyle.exclude_contains_regexps.is_empty() {
            self.checkstyle.exclude_contains_regexps = other.checkstyle.exclude_contains_regexps;
        }
        if other.checkstyle.mode.is_some() {
            self.checkstyle.mode = other.checkstyle.mode;
        }

        if other.ant.program.is_some() {
            self.ant.program = other.ant.program;
        }
        if other.ant.checkstyle_dir.is_some() {
            self.ant.checkstyle_dir = other.ant.checkstyle_dir;
        }
        self.ant.properties.extend(other.ant.properties);

        if other.analysis.java.is_some() {
            self.analysis.java = other.analysis.java;
        }
        if other.analysis.jar.is_some() {
            self.analysis.jar = other.analysis.jar;
        }
    }

    /// Resolve the inputs of a generation pass.
    ///
    /// A relative checkstyle config path is taken relative to `base`.
    /// Empty exclude entries are dropped.
    pub fn generate_config(&self, base: &Path) -> Result<GenerateConfig> {
        let path = self
            .checkstyle
            .config
            .as_ref()
            .ok_or(ConfigurationError::MissingConfiguration)?;
        let path = if path.is_absolute() {
            path.clone()
        } else {
            base.join(path)
        };

        let checkstyle_config = std::fs::read_to_string(&path).with_context(|| {
            format!("failed to read checkstyle configuration: {}", path.display())
        })?;
        if checkstyle_config.trim().is_empty() {
            return Err(ConfigurationError::EmptyConfiguration { path }.into());
        }

        Ok(GenerateConfig {
            checkstyle_config,
            excludes: non_empty(&self.checkstyle.excludes),
            exclude_contains_regexps: non_empty(&self.checkstyle.exclude_contains_regexps),
            mode: self.checkstyle.mode.unwrap_or_default(),
        })
    }
}

fn non_empty(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.nwdi-checkstyle/config.toml)
/// 2. Global config (~/.nwdi-checkstyle/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global config directory (~/.nwdi-checkstyle).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the project config path (.nwdi-checkstyle/config.toml).
pub fn project_config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(CONFIG_DIR_NAME).join("config.toml")
}
