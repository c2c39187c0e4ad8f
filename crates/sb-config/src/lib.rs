//! Study Buddy settings.
//!
//! Settings live in a `studybuddy.toml` file. When no file is named
//! explicitly, the nearest one in the working directory or an ancestor is
//! used, and built-in defaults apply when none exists. Command-line flags are
//! layered on top through [`CliSettings`].
//!
//! ## `${...}` references
//!
//! These fields may reference environment variables:
//! `server.host`, `diagrams.svg_url`, `diagrams.png_url` and
//! `diagrams.script_url`.
//!
//! `${NAME}` is replaced by the variable's value and is an error when NAME is
//! unset. `${NAME:-fallback}` uses `fallback` for an unset variable.

mod expand;

use std::path::{Path, PathBuf};

use sb_renderer::Extension;
use serde::Deserialize;

/// Values taken from command-line flags.
///
/// A `None` field leaves the file (or default) value in place.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Bind address for `serve`.
    pub host: Option<String>,
    /// Listen port for `serve`.
    pub port: Option<u16>,
    /// Docs root, used as given (not relative to the settings file).
    pub source_dir: Option<PathBuf>,
}

/// File name looked up during discovery.
const CONFIG_FILENAME: &str = "studybuddy.toml";

/// 16 MiB, shared by the request body and document size limits.
const DEFAULT_SIZE_LIMIT: usize = 16 * 1024 * 1024;

/// Placeholder that image URL templates must contain.
const DIAGRAM_PLACEHOLDER: &str = "{diagram}";

/// Loaded Study Buddy settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[app]` table.
    pub app: AppConfig,
    /// `[server]` table.
    pub server: ServerConfig,
    /// `[docs]` table as written; see `docs_resolved` for usable values.
    docs: DocsConfigRaw,
    /// `[markdown]` table.
    pub markdown: MarkdownConfig,
    /// `[diagrams]` table.
    pub diagrams: DiagramsConfig,

    /// Docs settings with the source directory made absolute.
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// File the settings came from, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults_at(Path::new("."))
    }
}

/// `[app]` table.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Name shown in page titles and headers.
    pub name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Study Buddy".to_owned(),
        }
    }
}

/// `[server]` table.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Listen port. Zero is rejected.
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub max_content_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            max_content_length: DEFAULT_SIZE_LIMIT,
        }
    }
}

/// `[docs]` table before resolution; every key is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    extension: Option<String>,
    max_document_size: Option<usize>,
}

/// Docs settings ready for use.
#[derive(Debug)]
pub struct DocsConfig {
    /// Root directory holding one subdirectory per subject.
    pub source_dir: PathBuf,
    /// Recognized document extension, without the leading dot.
    pub extension: String,
    /// Documents larger than this many bytes are rejected.
    pub max_document_size: usize,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            extension: "md".to_owned(),
            max_document_size: DEFAULT_SIZE_LIMIT,
        }
    }
}

/// `[markdown]` table.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Syntax extensions enabled for every document.
    pub extensions: Vec<Extension>,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: Extension::DEFAULT_SET.to_vec(),
        }
    }
}

/// `[diagrams]` table.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiagramsConfig {
    /// SVG image URL template with a `{diagram}` placeholder.
    pub svg_url: String,
    /// PNG image URL template with a `{diagram}` placeholder.
    pub png_url: String,
    /// URL of the client-side diagram renderer script.
    pub script_url: String,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            svg_url: "https://mermaid.ink/svg/{diagram}".to_owned(),
            png_url: "https://mermaid.ink/img/{diagram}".to_owned(),
            script_url: "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js".to_owned(),
        }
    }
}

/// Failure to produce usable settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly named settings file is missing.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The settings file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file is not valid TOML for this schema.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range or malformed.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// A `${NAME}` reference names an unset variable.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Dotted key of the offending value, such as `server.host`.
        field: String,
        /// What went wrong, such as `${STUDY_HOST} not set`.
        message: String,
    },
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Validation(message)
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(invalid(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_non_zero(value: usize, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(format!("{field} must be greater than 0")));
    }
    Ok(())
}

/// Accept only `http://` and `https://` URLs.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(invalid(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

fn require_placeholder(template: &str, field: &str) -> Result<(), ConfigError> {
    if !template.contains(DIAGRAM_PLACEHOLDER) {
        return Err(invalid(format!("{field} must contain {DIAGRAM_PLACEHOLDER}")));
    }
    Ok(())
}

impl Config {
    /// Build settings for a command.
    ///
    /// The file at `config_path` is used when given. Without it the nearest
    /// `studybuddy.toml` found by walking up from the working directory is
    /// used, and defaults rooted at the working directory apply when there is
    /// none. Flags in `cli_settings` win over anything read from a file.
    ///
    /// # Errors
    ///
    /// Fails when a named file is missing, when a file cannot be read or
    /// parsed, and when the final values do not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let source = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_upwards(),
        };
        let mut config = match source {
            Some(path) => Self::from_file(&path)?,
            None => Self::defaults_at(&std::env::current_dir().unwrap_or_default()),
        };

        if let Some(settings) = cli_settings {
            config.apply_overrides(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_overrides(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
    }

    /// Nearest settings file in the working directory or one of its ancestors.
    fn find_upwards() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        cwd.ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.exists())
    }

    /// Built-in defaults with the docs root at `<base>/docs`.
    fn defaults_at(base: &Path) -> Self {
        Self {
            app: AppConfig::default(),
            server: ServerConfig::default(),
            docs: DocsConfigRaw::default(),
            markdown: MarkdownConfig::default(),
            diagrams: DiagramsConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                ..DocsConfig::default()
            },
            config_path: None,
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_references()?;
        config.resolve_docs(path.parent().unwrap_or(Path::new(".")));
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Check every setting.
    ///
    /// [`load`](Self::load) runs this after reading a file and again after
    /// applying flags.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::Validation`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_docs()?;
        self.validate_diagrams()
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        // Zero would bind a random port
        if self.server.port == 0 {
            return Err(invalid("server.port cannot be 0".to_owned()));
        }
        require_non_zero(self.server.max_content_length, "server.max_content_length")
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;
        require_non_empty(&docs.extension, "docs.extension")?;
        if docs.extension.starts_with('.') {
            return Err(invalid("docs.extension must not start with a dot".to_owned()));
        }
        require_non_zero(docs.max_document_size, "docs.max_document_size")
    }

    fn validate_diagrams(&self) -> Result<(), ConfigError> {
        for (template, field) in [
            (&self.diagrams.svg_url, "diagrams.svg_url"),
            (&self.diagrams.png_url, "diagrams.png_url"),
        ] {
            require_http_url(template, field)?;
            require_placeholder(template, field)?;
        }
        require_http_url(&self.diagrams.script_url, "diagrams.script_url")
    }

    /// Replace `${...}` references in the fields that allow them.
    fn expand_references(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        let diagrams = &mut self.diagrams;
        diagrams.svg_url = expand::expand_env(&diagrams.svg_url, "diagrams.svg_url")?;
        diagrams.png_url = expand::expand_env(&diagrams.png_url, "diagrams.png_url")?;
        diagrams.script_url = expand::expand_env(&diagrams.script_url, "diagrams.script_url")?;

        Ok(())
    }

    /// Fill `docs_resolved`, joining `docs.source_dir` onto `config_dir`.
    fn resolve_docs(&mut self, config_dir: &Path) {
        let defaults = DocsConfig::default();
        let raw = &self.docs;

        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(raw.source_dir.as_deref().unwrap_or("docs")),
            extension: raw.extension.clone().unwrap_or(defaults.extension),
            max_document_size: raw.max_document_size.unwrap_or(defaults.max_document_size),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn defaults() -> Config {
        Config::defaults_at(Path::new("/test"))
    }

    #[test]
    fn test_default_config() {
        let config = defaults();
        assert_eq!(config.app.name, "Study Buddy");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.max_content_length, 16 * 1024 * 1024);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.extension, "md");
        assert_eq!(config.markdown.extensions, Extension::DEFAULT_SET);
        assert_eq!(config.diagrams.svg_url, "https://mermaid.ink/svg/{diagram}");
        assert_eq!(config.diagrams.png_url, "https://mermaid.ink/img/{diagram}");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.markdown.extensions, Extension::DEFAULT_SET);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[app]
name = "Biology Notes"

[server]
host = "0.0.0.0"
port = 8080
max_content_length = 1024

[docs]
source_dir = "notes"
extension = "markdown"
max_document_size = 2048

[markdown]
extensions = ["tables", "smart_punctuation"]

[diagrams]
svg_url = "http://ink.local/svg/{diagram}"
png_url = "http://ink.local/img/{diagram}"
script_url = "http://ink.local/mermaid.js"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_docs(Path::new("/project"));

        assert_eq!(config.app.name, "Biology Notes");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_content_length, 1024);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/notes"));
        assert_eq!(config.docs_resolved.extension, "markdown");
        assert_eq!(config.docs_resolved.max_document_size, 2048);
        assert_eq!(
            config.markdown.extensions,
            vec![Extension::Tables, Extension::SmartPunctuation]
        );
        assert_eq!(config.diagrams.script_url, "http://ink.local/mermaid.js");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_unknown_extension_fails() {
        let toml = r#"
[markdown]
extensions = ["tables", "toc"]
"#;
        let result: Result<Config, _> = toml::from_str(toml);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("toc"), "got: {err}");
    }

    #[test]
    fn test_parse_empty_extension_list() {
        let toml = r"
[markdown]
extensions = []
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.markdown.extensions.is_empty());
    }

    #[test]
    fn test_resolve_docs_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_docs(Path::new("/project"));

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/docs"));
        assert_eq!(config.docs_resolved.extension, "md");
        assert_eq!(config.docs_resolved.max_document_size, 16 * 1024 * 1024);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server]\nport = 6000\n\n[docs]\nsource_dir = \"subjects\"\n")
            .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 6000);
        assert_eq!(config.docs_resolved.source_dir, dir.path().join("subjects"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/nonexistent/studybuddy.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();

        let result = Config::load(Some(&path), None);

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server]\nport = 6000\n").unwrap();
        let settings = CliSettings {
            port: Some(7000),
            source_dir: Some(PathBuf::from("/elsewhere")),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_override_host_only() {
        let mut config = defaults();

        config.apply_overrides(&CliSettings {
            host: Some("0.0.0.0".to_owned()),
            ..CliSettings::default()
        });

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
    }

    #[test]
    fn test_no_overrides_keep_defaults() {
        let mut config = defaults();

        config.apply_overrides(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
    }

    #[test]
    fn test_expand_references_server_host() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SB_CONFIG_TEST_HOST", "0.0.0.0");
        }

        let toml = r#"
[server]
host = "${SB_CONFIG_TEST_HOST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_references().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");

        unsafe {
            std::env::remove_var("SB_CONFIG_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_references_diagram_urls() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SB_CONFIG_TEST_INK");
        }

        let toml = r#"
[diagrams]
svg_url = "${SB_CONFIG_TEST_INK:-https://ink.internal}/svg/{diagram}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_references().unwrap();

        assert_eq!(config.diagrams.svg_url, "https://ink.internal/svg/{diagram}");
        assert_eq!(config.diagrams.png_url, "https://mermaid.ink/img/{diagram}");
    }

    #[test]
    fn test_expand_references_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SB_CONFIG_TEST_MISSING");
        }

        let toml = r#"
[diagrams]
script_url = "${SB_CONFIG_TEST_MISSING}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_references().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("diagrams.script_url"));
    }

    /// Validation fails and the message names every given fragment.
    fn assert_rejected(config: &Config, fragments: &[&str]) {
        let Err(ConfigError::Validation(message)) = config.validate() else {
            panic!("{config:?} should fail validation");
        };
        for fragment in fragments {
            assert!(message.contains(fragment), "{message:?} lacks {fragment:?}");
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = defaults();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = defaults();
        config.server.host = String::new();
        assert_rejected(&config, &["server.host", "empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = defaults();
        config.server.port = 0;
        assert_rejected(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_max_content_length_zero() {
        let mut config = defaults();
        config.server.max_content_length = 0;
        assert_rejected(&config, &["server.max_content_length"]);
    }

    #[test]
    fn test_validate_extension_with_dot() {
        let mut config = defaults();
        config.docs_resolved.extension = ".md".to_owned();
        assert_rejected(&config, &["docs.extension", "dot"]);
    }

    #[test]
    fn test_validate_extension_empty() {
        let mut config = defaults();
        config.docs_resolved.extension = String::new();
        assert_rejected(&config, &["docs.extension", "empty"]);
    }

    #[test]
    fn test_validate_max_document_size_zero() {
        let mut config = defaults();
        config.docs_resolved.max_document_size = 0;
        assert_rejected(&config, &["docs.max_document_size"]);
    }

    #[test]
    fn test_validate_svg_url_invalid_scheme() {
        let mut config = defaults();
        config.diagrams.svg_url = "ftp://ink/{diagram}".to_owned();
        assert_rejected(&config, &["diagrams.svg_url", "http"]);
    }

    #[test]
    fn test_validate_png_url_missing_placeholder() {
        let mut config = defaults();
        config.diagrams.png_url = "https://mermaid.ink/img/".to_owned();
        assert_rejected(&config, &["diagrams.png_url", "{diagram}"]);
    }

    #[test]
    fn test_validate_script_url_invalid_scheme() {
        let mut config = defaults();
        config.diagrams.script_url = "/static/mermaid.js".to_owned();
        assert_rejected(&config, &["diagrams.script_url"]);
    }
}
