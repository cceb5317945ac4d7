//! Configuration management for rfcdoc.
//!
//! Parses `rfcdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docx.template_dir`
//! - `references.sources.*`

mod expand;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override DOCX template directory.
    pub template_dir: Option<PathBuf>,
    /// Override external reference fetching.
    pub fetch: Option<bool>,
    /// Override Markdown wrap width.
    pub wrap_width: Option<usize>,
    /// Override heading numbering.
    pub numbered_headings: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rfcdoc.toml";

const DEFAULT_TEMPLATE_DIR: &str = "template";
const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_WRAP_WIDTH: usize = 80;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// DOCX configuration (template path is a relative string from TOML).
    docx: DocxConfigRaw,
    /// Markdown output configuration.
    pub markdown: MarkdownConfig,
    /// External reference configuration.
    pub references: ReferencesConfig,
    /// Heading configuration.
    pub headings: HeadingsConfig,

    /// Resolved DOCX configuration (set after loading).
    #[serde(skip)]
    pub docx_resolved: DocxConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw DOCX configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocxConfigRaw {
    template_dir: Option<String>,
    language: Option<String>,
}

/// Resolved DOCX configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocxConfig {
    /// Directory holding the fixed package parts.
    pub template_dir: PathBuf,
    /// `w:lang` for non-verbatim runs.
    pub language: String,
}

/// Markdown output configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Column at which body paragraphs wrap.
    pub wrap_width: usize,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

/// External reference configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReferencesConfig {
    /// Whether `xi:include` references are fetched.
    pub fetch: bool,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Namespace to base location overrides (e.g. `RFC = "https://mirror/"`).
    pub sources: BTreeMap<String, String>,
}

impl Default for ReferencesConfig {
    fn default() -> Self {
        Self {
            fetch: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            sources: BTreeMap::new(),
        }
    }
}

/// Heading configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct HeadingsConfig {
    /// Prefix middle-section headings with their number.
    pub numbered: bool,
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
        /// Config field path (e.g., "`docx.template_dir`").
        field: String,
        /// Error message (e.g., "${`TEMPLATE_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rfcdoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(template_dir) = &settings.template_dir {
            self.docx_resolved.template_dir.clone_from(template_dir);
        }
        if let Some(fetch) = settings.fetch {
            self.references.fetch = fetch;
        }
        if let Some(wrap_width) = settings.wrap_width {
            self.markdown.wrap_width = wrap_width;
        }
        if let Some(numbered) = settings.numbered_headings {
            self.headings.numbered = numbered;
        }
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
            docx: DocxConfigRaw::default(),
            markdown: MarkdownConfig::default(),
            references: ReferencesConfig::default(),
            headings: HeadingsConfig::default(),
            docx_resolved: DocxConfig {
                template_dir: base.join(DEFAULT_TEMPLATE_DIR),
                language: DEFAULT_LANGUAGE.to_owned(),
            },
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

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docx()?;
        self.validate_markdown()?;
        self.validate_references()?;
        Ok(())
    }

    fn validate_docx(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.docx_resolved.language, "docx.language")
    }

    fn validate_markdown(&self) -> Result<(), ConfigError> {
        const WRAP_RANGE: std::ops::RangeInclusive<usize> = 20..=400;

        if !WRAP_RANGE.contains(&self.markdown.wrap_width) {
            return Err(ConfigError::Validation(format!(
                "markdown.wrap_width must be between {} and {}",
                WRAP_RANGE.start(),
                WRAP_RANGE.end()
            )));
        }
        Ok(())
    }

    fn validate_references(&self) -> Result<(), ConfigError> {
        const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=300;

        if !TIMEOUT_RANGE.contains(&self.references.timeout_secs) {
            return Err(ConfigError::Validation(format!(
                "references.timeout_secs must be between {} and {}",
                TIMEOUT_RANGE.start(),
                TIMEOUT_RANGE.end()
            )));
        }
        for (namespace, base) in &self.references.sources {
            let field = format!("references.sources.{namespace}");
            require_non_empty(namespace, "references.sources key")?;
            require_http_url(base, &field)?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docx.template_dir {
            self.docx.template_dir = Some(expand::expand_env(dir, "docx.template_dir")?);
        }

        for (namespace, base) in &mut self.references.sources {
            *base = expand::expand_env(base, &format!("references.sources.{namespace}"))?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let template_dir = self
            .docx
            .template_dir
            .as_deref()
            .unwrap_or(DEFAULT_TEMPLATE_DIR);
        self.docx_resolved = DocxConfig {
            template_dir: config_dir.join(template_dir),
            language: self
                .docx
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned()),
        };
    }
}
