use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

pub const LOCAL_CONFIG: &str = ".paper-cli.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repo_path: PathBuf,
    pub csv_path: PathBuf,
    pub readme_path: PathBuf,
    /// Topic used by `add` when none is given.
    pub default_topic: Option<String>,
    /// Sync the document after every `add`.
    pub auto_sync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repo_path: PathBuf::from("."),
            csv_path: PathBuf::from("papers.csv"),
            readme_path: PathBuf::from("README.md"),
            default_topic: None,
            auto_sync: true,
        }
    }
}

impl Config {
    /// Load `explicit` if given, otherwise the first of `./.paper-cli.toml` and
    /// `$HOME/.config/paper-cli/config.toml` that exists, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let home = std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join(".config").join("paper-cli").join("config.toml"));
        for candidate in std::iter::once(PathBuf::from(LOCAL_CONFIG)).chain(home) {
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }
        debug!("no config file found, using defaults");
        Ok(Config::default())
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn with_repo(mut self, repo: Option<PathBuf>) -> Self {
        if let Some(repo) = repo {
            self.repo_path = repo;
        }
        self
    }

    pub fn csv_path(&self) -> PathBuf {
        self.resolve(&self.csv_path)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.resolve(&self.readme_path)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.repo_path.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_resolve_against_repo() {
        let config = Config::default().with_repo(Some(PathBuf::from("/srv/papers")));
        assert_eq!(config.csv_path(), PathBuf::from("/srv/papers/papers.csv"));
        assert_eq!(config.readme_path(), PathBuf::from("/srv/papers/README.md"));
        assert!(config.auto_sync);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = NamedTempFile::new().expect("tmp file");
        std::fs::write(
            tmp.path(),
            "readme_path = \"/abs/LIST.md\"\ndefault_topic = \"HCI\"\nauto_sync = false\n",
        )
        .unwrap();
        let config = Config::load(Some(tmp.path())).unwrap();
        assert_eq!(config.readme_path(), PathBuf::from("/abs/LIST.md"));
        assert_eq!(config.csv_path(), PathBuf::from("./papers.csv"));
        assert_eq!(config.default_topic.as_deref(), Some("HCI"));
        assert!(!config.auto_sync);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
