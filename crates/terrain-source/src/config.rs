use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fmt, fs};

use serde::Deserialize;

use crate::error::ConfigError;

pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

const DEFAULT_USER_AGENT: &str = concat!("terrain/", env!("CARGO_PKG_VERSION"));

/// Source settings. Precedence, lowest first: built-in defaults, the TOML
/// file, environment variables, then whatever the caller sets explicitly.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub token: Option<String>,
    pub login: Option<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Serve generated data instead of calling GitHub.
    pub mock: bool,
    pub seed: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: GITHUB_GRAPHQL_URL.to_string(),
            token: None,
            login: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 20,
            mock: false,
            seed: 42,
        }
    }
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("login", &self.login)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .field("mock", &self.mock)
            .field("seed", &self.seed)
            .finish()
    }
}

/// `~/.config/terrain/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_home().join(".config").join("terrain").join("config.toml")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

impl SourceConfig {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, or from the default location when it exists. An
    /// explicit path that cannot be read is an error; a missing default is
    /// not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_path(), false),
        };

        let mut config = match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::debug!("loaded config from {}", path.display());
                Self::from_toml_str(&content, &path)?
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = non_empty("TERRAIN_GITHUB_TOKEN").or_else(|| non_empty("GITHUB_TOKEN")) {
            self.token = Some(token);
        }
        if let Some(endpoint) = non_empty("TERRAIN_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(login) = non_empty("TERRAIN_LOGIN") {
            self.login = Some(login);
        }
        if let Some(mock) = non_empty("TERRAIN_MOCK") {
            self.mock = matches!(mock.trim(), "1" | "true" | "yes");
        }
    }

    /// Login to fetch: `explicit`, then the configured login, then the owner
    /// of the current directory's GitHub `origin` remote.
    pub fn resolve_login(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .or_else(|| self.login.clone().filter(|l| !l.trim().is_empty()))
            .or_else(detect_origin_owner)
    }
}

fn detect_origin_owner() -> Option<String> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    parse_github_owner(&url)
}

/// Owner segment of a GitHub remote URL.
///
/// Handles `git@github.com:org/repo.git`, `https://github.com/org/repo` and
/// `ssh://git@github.com/org/repo.git`. Other hosts yield `None`.
fn parse_github_owner(url: &str) -> Option<String> {
    let path = if let Some(rest) = url.split_once("://").map(|(_, r)| r) {
        let (host, path) = rest.split_once('/')?;
        if !is_github_host(host) {
            return None;
        }
        path
    } else {
        let (host, path) = url.split_once(':')?;
        if !is_github_host(host) {
            return None;
        }
        path
    };

    let owner = path.trim_matches('/').split('/').next()?;
    (!owner.is_empty()).then(|| owner.to_string())
}

/// `github.com`, optionally with a user part such as `git@`.
fn is_github_host(host: &str) -> bool {
    host == "github.com" || host.ends_with("@github.com")
}
