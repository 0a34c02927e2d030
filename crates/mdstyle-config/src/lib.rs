//! Configuration management for mdstyle.
//!
//! Parses `mdstyle.toml` with serde and discovers it in the current directory
//! or its parents. CLI flags are applied on top through [`CliSettings`].
//!
//! ```toml
//! [defaults]
//! theme = "grace"
//! font_family = "衬线"
//! primary_color = "翡翠绿"
//! code_theme = "github"
//! custom_css = "styles/override.css"
//!
//! [assets]
//! stylesheet_url = "${CDN:-https://cdn.bootcdn.net}/ajax/libs/highlight.js/11.10.0/styles/{theme}.min.css"
//!
//! [diagrams]
//! kroki_url = "https://kroki.io"
//! cache_dir = ".mdstyle/diagrams"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` and `${VAR:-default}` are expanded in `assets.stylesheet_url` and
//! `diagrams.kroki_url`.

mod expand;
pub mod options;

use std::path::{Path, PathBuf};
use std::time::Duration;

use mdstyle_cache::DEFAULT_STYLESHEET_URL;
use mdstyle_renderer::RenderOptions;
use serde::Deserialize;

pub use options::{FallbackPolicy, OptionError};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdstyle.toml";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub theme: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub primary_color: Option<String>,
    pub legend: Option<String>,
    pub code_theme: Option<String>,
    pub use_indent: Option<bool>,
    pub citations: Option<bool>,
    pub mac_code_blocks: Option<bool>,
    pub fallback: Option<FallbackPolicy>,
    pub custom_css: Option<PathBuf>,
    pub kroki_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render option defaults, as labels or values.
    pub defaults: DefaultsConfig,
    /// Code theme stylesheet source.
    pub assets: AssetsConfig,
    /// Diagram rendering configuration (optional section).
    /// When present, `kroki_url` is required.
    diagrams: Option<DiagramsConfigRaw>,

    /// Resolved diagrams configuration (set after loading).
    #[serde(skip)]
    pub diagrams_resolved: DiagramsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[defaults]` section.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub theme: String,
    pub font_family: String,
    pub font_size: String,
    pub primary_color: String,
    pub legend: String,
    pub code_theme: String,
    pub use_indent: bool,
    pub citations: bool,
    pub mac_code_blocks: bool,
    pub footnote_heading: Option<String>,
    /// User CSS file, relative to the config file.
    pub custom_css: Option<PathBuf>,
    pub fallback: FallbackPolicy,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_owned(),
            font_family: "无衬线".to_owned(),
            font_size: "14px".to_owned(),
            primary_color: "经典蓝".to_owned(),
            legend: "title".to_owned(),
            code_theme: "tokyo-night-light".to_owned(),
            use_indent: false,
            citations: false,
            mac_code_blocks: true,
            footnote_heading: None,
            custom_css: None,
            fallback: FallbackPolicy::Warn,
        }
    }
}

/// `[assets]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Stylesheet URL pattern; `{theme}` is replaced by the code theme id.
    pub stylesheet_url: String,
    pub timeout_secs: u64,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            stylesheet_url: DEFAULT_STYLESHEET_URL.to_owned(),
            timeout_secs: 10,
        }
    }
}

impl AssetsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Raw diagrams configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DiagramsConfigRaw {
    kroki_url: Option<String>,
    timeout_secs: Option<u64>,
    cache_dir: Option<String>,
}

/// Resolved diagram rendering configuration.
#[derive(Debug)]
pub struct DiagramsConfig {
    /// Kroki server URL; diagrams are rendered only when set.
    pub kroki_url: Option<String>,
    pub timeout: Duration,
    /// On-disk SVG cache directory. Memory only when unset.
    pub cache_dir: Option<PathBuf>,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            kroki_url: None,
            timeout: Duration::from_secs(30),
            cache_dir: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`diagrams.kroki_url`").
        field: String,
        /// Error message (e.g., "${`KROKI_URL`} not set").
        message: String,
    },
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
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `mdstyle.toml` in the current directory and its parents, falling
    /// back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Render options from `[defaults]`, honoring the fallback policy.
    ///
    /// `custom_css` is left unset; the caller reads the file named by
    /// `defaults.custom_css`.
    pub fn render_options(&self) -> Result<RenderOptions, OptionError> {
        options::resolve(&self.defaults)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let defaults = &mut self.defaults;
        let strings = [
            (&mut defaults.theme, &settings.theme),
            (&mut defaults.font_family, &settings.font_family),
            (&mut defaults.font_size, &settings.font_size),
            (&mut defaults.primary_color, &settings.primary_color),
            (&mut defaults.legend, &settings.legend),
            (&mut defaults.code_theme, &settings.code_theme),
        ];
        for (target, value) in strings {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
        if let Some(use_indent) = settings.use_indent {
            defaults.use_indent = use_indent;
        }
        if let Some(citations) = settings.citations {
            defaults.citations = citations;
        }
        if let Some(mac_code_blocks) = settings.mac_code_blocks {
            defaults.mac_code_blocks = mac_code_blocks;
        }
        if let Some(fallback) = settings.fallback {
            defaults.fallback = fallback;
        }
        if let Some(custom_css) = &settings.custom_css {
            defaults.custom_css = Some(custom_css.clone());
        }
        if let Some(kroki_url) = &settings.kroki_url {
            self.diagrams_resolved.kroki_url = Some(kroki_url.clone());
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_http_url(&self.assets.stylesheet_url, "assets.stylesheet_url")?;
        if !self.assets.stylesheet_url.contains("{theme}") {
            return Err(ConfigError::Validation(
                "assets.stylesheet_url must contain {theme}".to_owned(),
            ));
        }
        if self.assets.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "assets.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        if let Some(ref kroki_url) = self.diagrams_resolved.kroki_url {
            require_http_url(kroki_url, "diagrams.kroki_url")?;
        }
        if self.diagrams_resolved.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "diagrams.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.assets.stylesheet_url =
            expand::expand_env(&self.assets.stylesheet_url, "assets.stylesheet_url")?;

        if let Some(ref mut diagrams) = self.diagrams
            && let Some(ref url) = diagrams.kroki_url
        {
            diagrams.kroki_url = Some(expand::expand_env(url, "diagrams.kroki_url")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    ///
    /// Validates that `kroki_url` is provided when `[diagrams]` section exists.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        if let Some(custom_css) = &self.defaults.custom_css {
            self.defaults.custom_css = Some(config_dir.join(custom_css));
        }

        self.diagrams_resolved = match &self.diagrams {
            Some(diagrams) => {
                let kroki_url = diagrams.kroki_url.clone().ok_or_else(|| {
                    ConfigError::Validation(
                        "[diagrams] section requires kroki_url to be set".to_owned(),
                    )
                })?;
                let defaults = DiagramsConfig::default();
                DiagramsConfig {
                    kroki_url: Some(kroki_url),
                    timeout: diagrams
                        .timeout_secs
                        .map_or(defaults.timeout, Duration::from_secs),
                    cache_dir: diagrams.cache_dir.as_deref().map(|d| config_dir.join(d)),
                }
            }
            None => DiagramsConfig::default(),
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.theme, "default");
        assert_eq!(config.defaults.code_theme, "tokyo-night-light");
        assert_eq!(config.assets.stylesheet_url, DEFAULT_STYLESHEET_URL);
        assert_eq!(config.assets.timeout(), Duration::from_secs(10));
        assert!(config.diagrams_resolved.kroki_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.defaults.font_size, "14px");
        assert!(config.defaults.mac_code_blocks);
        assert_eq!(config.defaults.fallback, FallbackPolicy::Warn);
    }

    #[test]
    fn test_parse_defaults() {
        let toml = r#"
[defaults]
theme = "优雅"
font_family = "serif"
legend = "alt 优先"
citations = true
fallback = "reject"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.defaults.theme, "优雅");
        assert_eq!(config.defaults.font_family, "serif");
        assert_eq!(config.defaults.legend, "alt 优先");
        assert!(config.defaults.citations);
        assert_eq!(config.defaults.fallback, FallbackPolicy::Reject);
        // Unset fields keep their defaults
        assert_eq!(config.defaults.primary_color, "经典蓝");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[defaults]
custom_css = "styles/override.css"

[diagrams]
kroki_url = "https://kroki.io"
timeout_secs = 5
cache_dir = ".mdstyle/diagrams"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();

        assert_eq!(
            config.defaults.custom_css,
            Some(PathBuf::from("/project/styles/override.css"))
        );
        assert_eq!(
            config.diagrams_resolved.kroki_url,
            Some("https://kroki.io".to_owned())
        );
        assert_eq!(config.diagrams_resolved.timeout, Duration::from_secs(5));
        assert_eq!(
            config.diagrams_resolved.cache_dir,
            Some(PathBuf::from("/project/.mdstyle/diagrams"))
        );
    }

    #[test]
    fn test_diagrams_section_requires_kroki_url() {
        let toml = r#"
[diagrams]
timeout_secs = 5
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve_paths(Path::new("/project")).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("kroki_url"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let settings = CliSettings {
            theme: Some("grace".to_owned()),
            font_size: Some("16px".to_owned()),
            citations: Some(true),
            mac_code_blocks: Some(false),
            kroki_url: Some("https://kroki.example.com".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&settings);

        assert_eq!(config.defaults.theme, "grace");
        assert_eq!(config.defaults.font_size, "16px");
        assert!(config.defaults.citations);
        assert!(!config.defaults.mac_code_blocks);
        assert_eq!(config.defaults.font_family, "无衬线"); // Unchanged
        assert_eq!(
            config.diagrams_resolved.kroki_url,
            Some("https://kroki.example.com".to_owned())
        );
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("MDSTYLE_TEST_CONFIG_KROKI", "https://kroki.test.com");
        }

        let toml = r#"
[diagrams]
kroki_url = "${MDSTYLE_TEST_CONFIG_KROKI}"

[assets]
stylesheet_url = "${MDSTYLE_TEST_CONFIG_CDN:-https://cdn.test.com}/{theme}.css"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(
            config.diagrams.as_ref().unwrap().kroki_url,
            Some("https://kroki.test.com".to_owned())
        );
        assert_eq!(config.assets.stylesheet_url, "https://cdn.test.com/{theme}.css");

        unsafe {
            std::env::remove_var("MDSTYLE_TEST_CONFIG_KROKI");
        }
    }

    // Validation tests

    fn assert_validation_error(config: &Config, expected: &str) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        assert!(msg.contains(expected), "Expected '{expected}' in: {msg}");
    }

    #[test]
    fn test_validate_stylesheet_url_scheme() {
        let mut config = Config::default();
        config.assets.stylesheet_url = "ftp://cdn/{theme}.css".to_owned();
        assert_validation_error(&config, "assets.stylesheet_url");
    }

    #[test]
    fn test_validate_stylesheet_url_placeholder() {
        let mut config = Config::default();
        config.assets.stylesheet_url = "https://cdn/github.css".to_owned();
        assert_validation_error(&config, "{theme}");
    }

    #[test]
    fn test_validate_timeouts() {
        let mut config = Config::default();
        config.assets.timeout_secs = 0;
        assert_validation_error(&config, "assets.timeout_secs");

        let mut config = Config::default();
        config.diagrams_resolved.timeout = Duration::ZERO;
        assert_validation_error(&config, "diagrams.timeout_secs");
    }

    #[test]
    fn test_validate_kroki_url_scheme() {
        let mut config = Config::default();
        config.diagrams_resolved.kroki_url = Some("kroki.io".to_owned());
        assert_validation_error(&config, "diagrams.kroki_url");
    }

    // Loading tests

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "[defaults]\ntheme = \"grace\"\n\n[diagrams]\nkroki_url = \"http://localhost:8000\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.defaults.theme, "grace");
        assert_eq!(config.config_path, Some(path));
        assert_eq!(
            config.diagrams_resolved.kroki_url,
            Some("http://localhost:8000".to_owned())
        );
    }

    #[test]
    fn test_load_missing_path() {
        let err = Config::load(Some(Path::new("/nonexistent/mdstyle.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdstyle.toml");
        fs::write(&path, "[defaults\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_cli_settings_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdstyle.toml");
        fs::write(&path, "").unwrap();
        let settings = CliSettings {
            kroki_url: Some("localhost:8000".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(err.to_string().contains("diagrams.kroki_url"));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs/posts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_config(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_render_options_from_config() {
        let mut config = Config::default();
        config.defaults.primary_color = "石墨黑".to_owned();
        let options = config.render_options().unwrap();
        assert_eq!(options.primary_color, "#333333");
        assert_eq!(options.code_theme_id, "tokyo-night-light");
    }
}
