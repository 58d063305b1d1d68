//! Paths and user configuration
//!
//! The user configuration is a small JSON document stored at
//! `$HOME/.gobi.json`; it tells gobi who owns the projects and where they
//! are hosted. Projects are written under `$GOPATH/src`.

use colored::Colorize;
use datautil::valid::{self, Checker, Schema};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

pub const GITHUB: &str = "github.com";
pub const BITBUCKET: &str = "bitbucket.org";
pub const GOOGLE: &str = "code.google.com";

/// Supported hosts
pub const HOSTS: &[&str] = &[GITHUB, BITBUCKET, GOOGLE];

/// Supported licenses
pub const LICENSES: &[&str] = &[
    "AGPL",
    "Apache",
    "BSD",
    "BSD3-Clause",
    "Eclipse",
    "GPLv2",
    "GPLv3",
    "LGPLv2.1",
    "LGPLv3",
    "MIT",
    "Mozilla",
    "PublicDomain",
    "WTFPL",
    "no-license",
];

/// Environment variable overriding the embedded templates
pub const TEMPLATE_DIR_ENV: &str = "GOBI_TEMPLATE_DIR";

const CONFIG_FILE: &str = ".gobi.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot find the home directory")]
    NoHome,

    #[error("no configuration found at {}; run `gobi` in a terminal to create it", .0.display())]
    Missing(PathBuf),

    #[error(transparent)]
    Invalid(#[from] valid::Error),

    #[error("the username cannot contain '/' or spaces")]
    UserName,

    #[error("invalid host {0:?}. Options: {opts}", opts = HOSTS.join(", "))]
    Host(String),

    #[error("invalid license {0:?}. Options: {opts}", opts = LICENSES.join(", "))]
    License(String),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Filesystem locations used by gobi
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub gopath: PathBuf,
    /// `GOPATH/src`, where projects are created
    pub src: PathBuf,
    pub config_file: PathBuf,
    /// Local directory whose templates override the embedded ones
    pub template_dir: Option<PathBuf>,
}

impl Paths {
    /// Build the paths for a home directory and an optional GOPATH list.
    /// Only the first GOPATH entry is used; without one, `HOME/go`.
    pub fn new(home: &Path, gopath: Option<&std::ffi::OsStr>) -> Self {
        let gopath = gopath
            .and_then(|list| env::split_paths(list).next())
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| home.join("go"));

        Self {
            src: gopath.join("src"),
            gopath,
            config_file: home.join(CONFIG_FILE),
            template_dir: None,
        }
    }

    /// Read `HOME`, `GOPATH` and `GOBI_TEMPLATE_DIR` from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        let mut paths = Self::new(&home, env::var_os("GOPATH").as_deref());
        paths.template_dir = env::var_os(TEMPLATE_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        tracing::debug!(?paths, "resolved paths");
        Ok(paths)
    }
}

/// Everything gobi knows about the current user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    pub name: String,
    pub id: String,
    pub host: String,
    pub email: String,
    pub license: String,
}

impl UserConfig {
    /// Load the configuration; a missing or unreadable file gives `None`
    pub async fn load(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no user configuration");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed user configuration");
                None
            }
        }
    }

    pub async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .await
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Who the user is and where projects go
    pub fn whoami(&self) -> String {
        format!(
            "{} {} {}{}{}{} {} {} {} {}",
            "You are".blue(),
            self.name.green().bold(),
            "(".blue(),
            self.email.green().bold(),
            ").".blue(),
            " Creating projects on".blue(),
            format!("{}/{}", self.host, self.id).green().bold(),
            "under".blue(),
            self.license.green().bold(),
            "license.".blue()
        )
    }
}

// Every field is trimmed and required
fn field(s: &mut Schema) -> &mut Schema {
    s.set_checker(s.checker() | Checker::REQUIRED | Checker::TRIM_SPACE)
}

/// Name: cannot be empty
pub fn check_name(s: &mut Schema, input: &str) -> Result<String, ConfigError> {
    Ok(valid::string(field(s), input)?)
}

/// Username: cannot be empty and has only one path level
pub fn check_user_name(s: &mut Schema, input: &str) -> Result<String, ConfigError> {
    let name = valid::string(field(s), input)?;
    if name.contains('/') || name.contains(char::is_whitespace) {
        return Err(ConfigError::UserName);
    }
    Ok(name)
}

/// Host: one of [`HOSTS`], returned in its canonical form
pub fn check_host(s: &mut Schema, input: &str) -> Result<String, ConfigError> {
    let host = valid::string(field(s), input)?;
    HOSTS
        .iter()
        .find(|h| h.eq_ignore_ascii_case(&host))
        .map(|h| h.to_string())
        .ok_or(ConfigError::Host(host))
}

pub fn check_email(s: &mut Schema, input: &str) -> Result<String, ConfigError> {
    Ok(valid::email(field(s), input)?)
}

/// License: one of [`LICENSES`], returned in its canonical form
pub fn check_license(s: &mut Schema, input: &str) -> Result<String, ConfigError> {
    let license = valid::string(field(s), input)?;
    LICENSES
        .iter()
        .find(|l| l.eq_ignore_ascii_case(&license))
        .map(|l| l.to_string())
        .ok_or(ConfigError::License(license))
}

/// Ask the user for the configuration on the terminal
#[cfg(feature = "tui")]
pub fn prompt_config() -> anyhow::Result<UserConfig> {
    use datautil::Question;

    cliclack::intro("gobi setup")?;
    let mut q = Question::new();

    let name = q.prompt("Name").read_with(check_name)?;
    let id = q.prompt("Username").read_with(check_user_name)?;
    let host = q
        .prompt(&format!("Host ({})", HOSTS.join(", ")))
        .default(GITHUB)
        .read_with(check_host)?;
    let email = q.prompt("Email").read_with(check_email)?;
    let license = q
        .prompt("License")
        .default("MIT")
        .read_with(check_license)?;

    Ok(UserConfig {
        name,
        id,
        host,
        email,
        license,
    })
}

/// Load the user configuration, asking for it when missing and `interactive`
pub async fn ensure_config(paths: &Paths, interactive: bool) -> anyhow::Result<UserConfig> {
    if let Some(config) = UserConfig::load(&paths.config_file).await {
        return Ok(config);
    }

    if !interactive {
        return Err(ConfigError::Missing(paths.config_file.clone()).into());
    }

    #[cfg(feature = "tui")]
    {
        crate::messages::no_config();
        let config = prompt_config()?;
        config.save(&paths.config_file).await?;
        tracing::info!(path = %paths.config_file.display(), "saved user configuration");
        cliclack::outro(format!("Saved to {}", paths.config_file.display()))?;
        Ok(config)
    }

    #[cfg(not(feature = "tui"))]
    {
        Err(ConfigError::Missing(paths.config_file.clone()).into())
    }
}
