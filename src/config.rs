//! Project configuration: defaults, `.tasklink/config.yaml`, then env vars.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::ServiceContext;

/// Config file location relative to the project root.
pub const CONFIG_FILE: &str = ".tasklink/config.yaml";

const DEFAULT_PLANNING_FILE: &str = ".taskmaster/tasks/tasks.json";
const DEFAULT_TAG: &str = "master";
const DEFAULT_BEADS_DIR: &str = ".beads";
const DEFAULT_BEADS_COMMAND: &str = "bd";
const DEFAULT_LINKS_FILE: &str = ".tasklink/links.json";

/// Failures loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config {path}: {message}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },
    /// The file is not valid YAML for the config schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// The YAML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Planning task file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planning_file: Option<String>,
    /// Active planning tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Beads data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beads_dir: Option<String>,
    /// Beads CLI program.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beads_command: Option<String>,
    /// Link store file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links_file: Option<String>,
}

impl FileConfig {
    /// A config file spelling out every default.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            planning_file: Some(DEFAULT_PLANNING_FILE.to_string()),
            tag: Some(DEFAULT_TAG.to_string()),
            beads_dir: Some(DEFAULT_BEADS_DIR.to_string()),
            beads_command: Some(DEFAULT_BEADS_COMMAND.to_string()),
            links_file: Some(DEFAULT_LINKS_FILE.to_string()),
        }
    }
}

/// Resolved settings for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Project root; relative paths resolve against it.
    pub root: PathBuf,
    /// Planning task file.
    pub planning_file: PathBuf,
    /// Active planning tag.
    pub tag: String,
    /// Beads data directory.
    pub beads_dir: PathBuf,
    /// Beads CLI program.
    pub beads_command: String,
    /// Link store file.
    pub links_file: PathBuf,
}

impl Config {
    /// The project root: `TASKLINK_ROOT`, or the current directory.
    #[must_use]
    pub fn root_from_env() -> PathBuf {
        std::env::var("TASKLINK_ROOT").map_or_else(|_| PathBuf::from("."), PathBuf::from)
    }

    /// Loads config for `root` from the config file and process env vars.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is unreadable or
    /// invalid.
    pub fn load(ctx: &ServiceContext, root: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(ctx, root, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], reading env vars through `env`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is unreadable or
    /// invalid.
    pub fn load_with_env(
        ctx: &ServiceContext,
        root: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = Self::read_file(ctx, root)?;
        let pick = |key: &str, from_file: Option<String>, default: &str| {
            env(key).filter(|v| !v.is_empty()).or(from_file).unwrap_or_else(|| default.to_string())
        };

        let planning_file =
            pick("TASKLINK_PLANNING_FILE", file.planning_file, DEFAULT_PLANNING_FILE);
        let beads_dir = pick("TASKLINK_BEADS_DIR", file.beads_dir, DEFAULT_BEADS_DIR);
        let links_file = pick("TASKLINK_LINKS_FILE", file.links_file, DEFAULT_LINKS_FILE);

        Ok(Self {
            root: root.to_path_buf(),
            planning_file: resolve(root, &planning_file),
            tag: pick("TASKLINK_TAG", file.tag, DEFAULT_TAG),
            beads_dir: resolve(root, &beads_dir),
            beads_command: pick("TASKLINK_BEADS_BIN", file.beads_command, DEFAULT_BEADS_COMMAND),
            links_file: resolve(root, &links_file),
        })
    }

    fn read_file(ctx: &ServiceContext, root: &Path) -> Result<FileConfig, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if !ctx.fs.exists(&path) {
            return Ok(FileConfig::default());
        }
        let contents = ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| ConfigError::Read { path: path.clone(), message: e.to_string() })?;
        if contents.trim().is_empty() {
            return Ok(FileConfig::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }
}

fn resolve(root: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_context, MemFs};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_file_or_env() {
        let ctx = test_context(MemFs::new());
        let config = Config::load_with_env(&ctx, Path::new("/p"), no_env).unwrap();
        assert_eq!(config.planning_file, PathBuf::from("/p/.taskmaster/tasks/tasks.json"));
        assert_eq!(config.tag, "master");
        assert_eq!(config.beads_dir, PathBuf::from("/p/.beads"));
        assert_eq!(config.beads_command, "bd");
        assert_eq!(config.links_file, PathBuf::from("/p/.tasklink/links.json"));
    }

    #[test]
    fn file_overrides_defaults_and_env_overrides_file() {
        let fs = MemFs::new();
        fs.insert("/p/.tasklink/config.yaml", "tag: feature\nbeads_command: /opt/bd\n");
        let ctx = test_context(fs);
        let env = |key: &str| (key == "TASKLINK_TAG").then(|| "release".to_string());

        let config = Config::load_with_env(&ctx, Path::new("/p"), env).unwrap();

        assert_eq!(config.tag, "release");
        assert_eq!(config.beads_command, "/opt/bd");
    }

    #[test]
    fn absolute_paths_are_kept() {
        let fs = MemFs::new();
        fs.insert("/p/.tasklink/config.yaml", "links_file: /shared/links.json\n");
        let ctx = test_context(fs);
        let config = Config::load_with_env(&ctx, Path::new("/p"), no_env).unwrap();
        assert_eq!(config.links_file, PathBuf::from("/shared/links.json"));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let fs = MemFs::new();
        fs.insert("/p/.tasklink/config.yaml", "unknown_key: 1\n");
        let ctx = test_context(fs);
        let err = Config::load_with_env(&ctx, Path::new("/p"), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn default_file_round_trips() {
        let yaml = serde_yaml::to_string(&FileConfig::defaults()).unwrap();
        let parsed: FileConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, FileConfig::defaults());
    }
}
