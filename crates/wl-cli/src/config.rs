//! Configuration loading and management.
//!
//! Values come from, in increasing priority: built-in defaults, the user
//! config file (`~/.config/wl/config.toml`), an explicit `--config` file,
//! the `GH_TOK` / `GH_USERNAME` / `CLIENTS` environment variables and
//! finally `WL_*` variables. A `.env` file in the working directory is
//! loaded into the environment first.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Environment variables holding the GitHub settings, and the keys they fill.
const GITHUB_ENV_VARS: [(&str, &str); 3] = [
    ("GH_TOK", "github_token"),
    ("GH_USERNAME", "username"),
    ("CLIENTS", "clients"),
];

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub access token (`GH_TOK`).
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub github_token: Option<String>,
    /// GitHub login whose activity is tracked (`GH_USERNAME`).
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub username: Option<String>,
    /// Organizations to search (`CLIENTS`, comma-separated).
    #[serde(default, deserialize_with = "deserialize_clients")]
    pub clients: Option<Vec<String>>,
    /// Intermediate events file.
    pub events_path: PathBuf,
    /// Sessions output file.
    pub sessions_path: PathBuf,
    /// GitHub REST API root.
    pub api_url: String,
    /// Emit the last open run instead of dropping it.
    pub flush_trailing: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("username", &self.username)
            .field("clients", &self.clients)
            .field("events_path", &self.events_path)
            .field("sessions_path", &self.sessions_path)
            .field("api_url", &self.api_url)
            .field("flush_trailing", &self.flush_trailing)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            username: None,
            clients: None,
            events_path: PathBuf::from("evs.csv"),
            sessions_path: PathBuf::from("evs_sorted.csv"),
            api_url: wl_github::DEFAULT_API_URL.to_string(),
            flush_trailing: false,
        }
    }
}

/// The GitHub settings the collector cannot run without.
#[derive(Clone)]
pub struct GithubSettings {
    pub token: String,
    pub username: String,
    pub clients: Vec<String>,
}

impl fmt::Debug for GithubSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubSettings")
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .field("clients", &self.clients)
            .finish()
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // GitHub settings keep their historical variable names and are taken
        // verbatim: logins like "007" must not be read as numbers
        for (var, key) in GITHUB_ENV_VARS {
            if let Ok(value) = std::env::var(var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }

        // Load from environment variables (WL_*)
        figment = figment.merge(Env::prefixed("WL_"));

        figment.extract()
    }

    /// Returns the GitHub settings, failing if any of them is missing or blank.
    pub fn github(&self) -> anyhow::Result<GithubSettings> {
        let token = non_blank(self.github_token.as_deref());
        let username = non_blank(self.username.as_deref());
        let clients = self.clients.clone().unwrap_or_default();

        match (token, username) {
            (Some(token), Some(username)) if !clients.is_empty() => Ok(GithubSettings {
                token,
                username,
                clients,
            }),
            (token, username) => {
                let missing: Vec<_> = [
                    ("GH_TOK", token.is_none()),
                    ("GH_USERNAME", username.is_none()),
                    ("CLIENTS", clients.is_empty()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                anyhow::bail!(
                    "missing required configuration: {} (set them in the environment or .env)",
                    missing.join(", ")
                )
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// A string setting that may have been typed as a number or bool by the
/// provider (`WL_USERNAME=1234`, `username = 1234` in TOML).
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|Scalar(value)| value))
}

/// Accepts either a TOML list or a comma-separated string.
fn deserialize_clients<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Clients {
        List(Vec<Scalar>),
        Csv(Scalar),
    }

    let clients = Option::<Clients>::deserialize(deserializer)?.map(|clients| {
        let items: Vec<String> = match clients {
            Clients::List(items) => items.into_iter().map(|Scalar(item)| item).collect(),
            Clients::Csv(Scalar(csv)) => csv.split(',').map(str::to_string).collect(),
        };
        items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    });
    Ok(clients)
}

/// Loads `.env` from the working directory into the environment, if present.
pub fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err).context("failed to load .env"),
    }
}

/// Returns the platform-specific config directory for wl.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wl"))
}
