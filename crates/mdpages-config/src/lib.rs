//! Configuration management for mdpages.
//!
//! Parses `mdpages.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Path Expansion
//!
//! Path values in the `[paths]` section support `~` and environment
//! variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Relative paths are resolved against the directory holding the config
//! file, or against the current directory when no config file exists.

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Markdown source directory.
    pub source_dir: Option<PathBuf>,
    /// Override page template file.
    pub template: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdpages.toml";

const DEFAULT_SOURCE_DIR: &str = "src";
const DEFAULT_TEMPLATE: &str = "templates/.page.html";
const DEFAULT_TEMPLATE_DIR: &str = "templates";
const DEFAULT_OUTPUT_DIR: &str = "pages";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path configuration (relative strings from TOML).
    paths: PathsConfigRaw,
    /// Watch mode configuration.
    pub watch: WatchConfig,

    /// Resolved path configuration (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw path configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsConfigRaw {
    source_dir: Option<String>,
    template: Option<String>,
    template_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved path configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Root of the Markdown source tree.
    pub source_dir: PathBuf,
    /// Page template applied to every rendered page.
    pub template: PathBuf,
    /// Directory watched for template changes.
    pub template_dir: PathBuf,
    /// Root of the generated HTML tree.
    pub output_dir: PathBuf,
}

impl PathsConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            source_dir: base.join(DEFAULT_SOURCE_DIR),
            template: base.join(DEFAULT_TEMPLATE),
            template_dir: base.join(DEFAULT_TEMPLATE_DIR),
            output_dir: base.join(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Watch mode configuration.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WatchConfig {
    /// Glob matched against paths relative to the source directory.
    pub source_pattern: String,
    /// Glob matched against paths relative to the template directory.
    pub template_pattern: String,
    /// Quiet period before a batch of changes triggers a rebuild.
    pub debounce_ms: u64,
}

impl WatchConfig {
    /// Debounce window as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            source_pattern: "**/*.md".to_owned(),
            template_pattern: "*.html".to_owned(),
            debounce_ms: 100,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`paths.source_dir`").
        field: String,
        /// Error message (e.g., "${`SITE_ROOT`} not set").
        message: String,
    },
}

/// Whether two paths name the same location, following symlinks and `..`
/// when both exist.
fn same_location(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Require a glob pattern to be non-empty and well-formed.
fn require_glob(pattern: &str, field: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    glob::Pattern::new(pattern)
        .map_err(|e| ConfigError::Validation(format!("{field} is not a valid glob: {e}")))?;
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdpages.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings)?;
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Relative CLI paths are resolved against the current directory. An
    /// overridden template also moves the template directory to the one
    /// holding it.
    fn apply_cli_settings(&mut self, settings: &CliSettings) -> Result<(), ConfigError> {
        if let Some(source_dir) = &settings.source_dir {
            self.paths_resolved.source_dir = std::path::absolute(source_dir)?;
        }
        if let Some(template) = &settings.template {
            let template = std::path::absolute(template)?;
            if let Some(parent) = template.parent() {
                self.paths_resolved.template_dir = parent.to_path_buf();
            }
            self.paths_resolved.template = template;
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths_resolved.output_dir = std::path::absolute(output_dir)?;
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            paths: PathsConfigRaw::default(),
            watch: WatchConfig::default(),
            paths_resolved: PathsConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically at the end of [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_paths()?;
        self.validate_watch()?;
        Ok(())
    }

    /// Validate resolved paths.
    fn validate_paths(&self) -> Result<(), ConfigError> {
        let paths = &self.paths_resolved;
        if same_location(&paths.output_dir, &paths.source_dir) {
            return Err(ConfigError::Validation(
                "paths.output_dir must differ from paths.source_dir".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate watch patterns.
    fn validate_watch(&self) -> Result<(), ConfigError> {
        require_glob(&self.watch.source_pattern, "watch.source_pattern")?;
        require_glob(&self.watch.template_pattern, "watch.template_pattern")?;
        Ok(())
    }

    /// Expand environment variable references in path strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let paths = &mut self.paths;
        for (value, field) in [
            (&mut paths.source_dir, "paths.source_dir"),
            (&mut paths.template, "paths.template"),
            (&mut paths.template_dir, "paths.template_dir"),
            (&mut paths.output_dir, "paths.output_dir"),
        ] {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.paths_resolved = PathsConfig {
            source_dir: resolve(self.paths.source_dir.as_deref(), DEFAULT_SOURCE_DIR),
            template: resolve(self.paths.template.as_deref(), DEFAULT_TEMPLATE),
            template_dir: resolve(self.paths.template_dir.as_deref(), DEFAULT_TEMPLATE_DIR),
            output_dir: resolve(self.paths.output_dir.as_deref(), DEFAULT_OUTPUT_DIR),
        };
    }
}
