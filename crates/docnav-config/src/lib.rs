//! Configuration management for docnav.
//!
//! Parses `docnav.toml` with serde and provides auto-discovery of the
//! config file in parent directories. Every section is optional; a missing
//! file yields the defaults rooted at the current directory.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `site.description`
//! - `sitemap.hostname`
//! - `analytics.loader_src`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown source directory.
    pub source_dir: Option<PathBuf>,
    /// Override document manifest path.
    pub manifest: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// Documentation paths (relative strings from TOML).
    docs: DocsConfigRaw,
    /// Sitemap generation settings.
    pub sitemap: SitemapConfig,
    /// Analytics loader injected into the page head.
    pub analytics: Option<AnalyticsConfig>,
    /// Extra head tags, appended after analytics.
    pub head: Vec<HeadEntry>,
    /// Top navigation links.
    pub nav: Vec<NavLink>,
    /// Page footer.
    pub footer: FooterConfig,
    /// Search provider selection.
    pub search: SearchConfig,
    /// Prev/next pagination labels.
    pub doc_footer: DocFooterConfig,
    /// Markdown transform hook settings.
    pub markdown: MarkdownConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Site description used for the meta description tag.
    pub description: String,
    /// Content language.
    pub lang: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            description: String::new(),
            lang: "en-US".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    manifest: Option<String>,
}

/// Resolved documentation paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Markdown source directory.
    pub source_dir: PathBuf,
    /// JSON document manifest.
    pub manifest: PathBuf,
    /// Project directory for docnav output (.docnav/).
    pub project_dir: PathBuf,
}

impl DocsConfig {
    /// Default location of the emitted site definition (.docnav/site.json).
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.project_dir.join("site.json")
    }

    /// Default destination for transformed markdown (.docnav/content/).
    #[must_use]
    pub fn content_dir(&self) -> PathBuf {
        self.project_dir.join("content")
    }
}

/// Sitemap settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Public hostname; no sitemap is configured when unset.
    pub hostname: Option<String>,
}

/// External analytics loader plus its inline init call.
#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    /// Loader script URL.
    pub loader_src: String,
    /// Function invoked by the inline script, e.g. `LA.init`.
    pub init: String,
    /// Arguments passed to `init` as a single JSON object.
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
    /// `charset` attribute of the loader tag.
    pub charset: Option<String>,
    /// `id` attribute of the loader tag.
    pub id: Option<String>,
}

/// Raw head tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeadEntry {
    /// Tag name (`script`, `meta`, `link`, ...).
    pub tag: String,
    /// Tag attributes.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inner content.
    pub content: Option<String>,
}

/// Navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavLink {
    /// Display text.
    pub text: String,
    /// Target URL or site path.
    pub link: String,
}

/// Footer HTML snippets.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Message line (HTML).
    pub message: Option<String>,
    /// Copyright line (HTML).
    pub copyright: Option<String>,
}

/// Search provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// Offline index built by the site generator.
    #[default]
    Local,
    /// Search disabled.
    None,
}

/// Search settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Selected provider.
    pub provider: SearchProvider,
}

/// Pagination labels shown under each document.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocFooterConfig {
    /// Label of the previous-page link.
    pub prev: String,
    /// Label of the next-page link.
    pub next: String,
}

impl Default for DocFooterConfig {
    fn default() -> Self {
        Self {
            prev: "Previous page".to_owned(),
            next: "Next page".to_owned(),
        }
    }
}

/// Markdown transform hook settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Whether the transform hook is registered.
    pub enabled: bool,
    /// Glob selecting the files the hook runs on.
    pub include: String,
    /// Image URLs containing this marker are replaced.
    pub placeholder_marker: String,
    /// Replacement URL template; `{seed}` receives a random number.
    pub placeholder_url: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include: "**/*.md".to_owned(),
            placeholder_marker: "placeholder".to_owned(),
            placeholder_url: "https://picsum.photos/800/450?random={seed}".to_owned(),
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
        /// Config field path (e.g., "`sitemap.hostname`").
        field: String,
        /// Error message (e.g., "${`DOCS_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

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
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the loaded values are invalid.
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
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(manifest) = &settings.manifest {
            self.docs_resolved.manifest.clone_from(manifest);
        }
    }

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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            sitemap: SitemapConfig::default(),
            analytics: None,
            head: Vec::new(),
            nav: Vec::new(),
            footer: FooterConfig::default(),
            search: SearchConfig::default(),
            doc_footer: DocFooterConfig::default(),
            markdown: MarkdownConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                manifest: base.join("docs.json"),
                project_dir: base.join(".docnav"),
            },
            config_path: None,
        }
    }

    /// Parse configuration from a TOML string, resolving paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        if let Some(hostname) = &self.sitemap.hostname {
            require_http_url(hostname, "sitemap.hostname")?;
        }
        self.validate_analytics()?;
        self.validate_head()?;
        self.validate_nav()?;
        self.validate_markdown()?;
        Ok(())
    }

    fn validate_analytics(&self) -> Result<(), ConfigError> {
        let Some(analytics) = &self.analytics else {
            return Ok(());
        };
        require_non_empty(&analytics.loader_src, "analytics.loader_src")?;
        require_http_url(&analytics.loader_src, "analytics.loader_src")?;
        require_non_empty(&analytics.init, "analytics.init")?;
        Ok(())
    }

    fn validate_head(&self) -> Result<(), ConfigError> {
        for (i, entry) in self.head.iter().enumerate() {
            require_non_empty(&entry.tag, &format!("head[{i}].tag"))?;
        }
        Ok(())
    }

    fn validate_nav(&self) -> Result<(), ConfigError> {
        for (i, link) in self.nav.iter().enumerate() {
            require_non_empty(&link.text, &format!("nav[{i}].text"))?;
            require_non_empty(&link.link, &format!("nav[{i}].link"))?;
        }
        Ok(())
    }

    fn validate_markdown(&self) -> Result<(), ConfigError> {
        if !self.markdown.enabled {
            return Ok(());
        }
        require_non_empty(&self.markdown.include, "markdown.include")?;
        require_non_empty(
            &self.markdown.placeholder_marker,
            "markdown.placeholder_marker",
        )?;
        require_http_url(&self.markdown.placeholder_url, "markdown.placeholder_url")?;
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        self.site.description = expand::expand_env(&self.site.description, "site.description")?;
        expand::expand_opt(&mut self.sitemap.hostname, "sitemap.hostname")?;
        if let Some(analytics) = &mut self.analytics {
            analytics.loader_src =
                expand::expand_env(&analytics.loader_src, "analytics.loader_src")?;
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            manifest: resolve(self.docs.manifest.as_deref(), "docs.json"),
            project_dir: config_dir.join(".docnav"),
        };
    }
}
