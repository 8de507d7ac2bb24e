//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only receives the
//! [`GenerateSettings`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `PLANTGEN_<SECTION>__<KEY>`
//!    (e.g. `PLANTGEN_WORKSPACE__ROOT`)
//! 3. Config file (`--config`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use plantgen_core::{
    application::{DEFAULT_PACKAGE, GenerateSettings},
    domain::{DEFAULT_QUALIFIED_PATH, DEFAULT_SERVICE_TOKEN, DomainError, TemplateTokens},
};

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "PLANTGEN";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where packages are generated.
    pub workspace: WorkspaceConfig,
    /// The template tree and its tokens.
    pub template: TemplateConfig,
    /// Generation behaviour.
    pub generation: GenerationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub root: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Explicit template directory. Defaults to the qualified path under the
    /// workspace root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub qualified_path: String,
    /// Package-name token. Defaults to the last segment of `qualified_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_token: Option<String>,
    pub service_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub rename_paths: bool,
    pub default_package: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig {
                root: default_workspace_root(),
            },
            template: TemplateConfig {
                path: None,
                qualified_path: DEFAULT_QUALIFIED_PATH.into(),
                package_token: None,
                service_token: DEFAULT_SERVICE_TOKEN.into(),
            },
            generation: GenerationConfig {
                rename_paths: false,
                default_package: DEFAULT_PACKAGE.into(),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// A file passed explicitly via `--config` must exist; the default
    /// location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to encode built-in configuration defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.plantgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "theplant", "plantgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".plantgen.toml"))
    }

    /// Tokens the configured template is written with.
    pub fn template_tokens(&self) -> Result<TemplateTokens, DomainError> {
        let template = &self.template;
        match &template.package_token {
            Some(token) => Ok(TemplateTokens::new(
                template.qualified_path.as_str(),
                token.as_str(),
                template.service_token.as_str(),
            )),
            None => TemplateTokens::from_qualified_path(
                &template.qualified_path,
                template.service_token.as_str(),
            ),
        }
    }

    /// Settings for the generate service. `workspace_root` overrides
    /// `workspace.root`; the default template location follows it.
    pub fn generate_settings(
        &self,
        workspace_root: Option<&Path>,
    ) -> Result<GenerateSettings, DomainError> {
        let root = workspace_root.unwrap_or(self.workspace.root.as_path());
        let mut settings = GenerateSettings::new(root)
            .with_tokens(self.template_tokens()?)
            .with_rename_paths(self.generation.rename_paths)
            .with_default_package(self.generation.default_package.as_str());
        if let Some(path) = &self.template.path {
            settings = settings.with_template_root(path);
        }
        Ok(settings)
    }
}

/// `$GOPATH/src` for the first `GOPATH` entry, else `$HOME/go/src`.
fn default_workspace_root() -> PathBuf {
    let gopath = std::env::var_os("GOPATH")
        .and_then(|value| std::env::split_paths(&value).find(|p| !p.as_os_str().is_empty()));

    match gopath {
        Some(gopath) => gopath.join("src"),
        None => dirs::home_dir()
            .map(|home| home.join("go"))
            .unwrap_or_else(|| PathBuf::from("go"))
            .join("src"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_workspace_is_a_src_directory() {
        let cfg = AppConfig::default();
        assert!(cfg.workspace.root.ends_with("src"));
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn default_tokens_are_canonical() {
        let tokens = AppConfig::default().template_tokens().unwrap();
        assert_eq!(tokens, TemplateTokens::default());
    }

    #[test]
    fn missing_default_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.generation.default_package, DEFAULT_PACKAGE);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plantgen.toml");
        std::fs::write(
            &path,
            "[workspace]\nroot = \"/srv/go/src\"\n\n[generation]\nrename_paths = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true).unwrap();
        assert_eq!(cfg.workspace.root, PathBuf::from("/srv/go/src"));
        assert!(cfg.generation.rename_paths);
        assert_eq!(cfg.template.service_token, DEFAULT_SERVICE_TOKEN);
    }

    #[test]
    fn explicit_package_token_is_used() {
        let mut cfg = AppConfig::default();
        cfg.template.qualified_path = "example.org/kit/skeleton".into();
        cfg.template.package_token = Some("skel".into());
        let tokens = cfg.template_tokens().unwrap();
        assert_eq!(tokens.package_token(), "skel");
    }

    #[test]
    fn settings_follow_template_path() {
        let mut cfg = AppConfig::default();
        cfg.workspace.root = PathBuf::from("/ws/src");
        cfg.template.path = Some(PathBuf::from("/opt/template"));

        let settings = cfg.generate_settings(None).unwrap();
        assert_eq!(settings.workspace_root, PathBuf::from("/ws/src"));
        assert_eq!(settings.template_root, PathBuf::from("/opt/template"));
    }

    #[test]
    fn root_override_moves_default_template() {
        let cfg = AppConfig::default();
        let settings = cfg.generate_settings(Some(Path::new("/other/src"))).unwrap();
        assert_eq!(settings.workspace_root, PathBuf::from("/other/src"));
        assert_eq!(
            settings.template_root,
            PathBuf::from("/other/src").join(DEFAULT_QUALIFIED_PATH)
        );
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
