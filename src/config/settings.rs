//! Settings resolution.
//!
//! Values come from three layers, highest priority first: command-line
//! flags, `FEEDER_*` environment variables (both handled by clap), and an
//! optional TOML settings file:
//!
//! ```toml
//! [store]
//! kind = "mongodb"
//! endpoint_url = "mongodb://localhost:27017"
//! database_name = "feeder"
//! container_name = "documents"
//!
//! [run]
//! batch_size = 1000
//! cycles = 10
//! settle_delay = "1s"
//! ```

use super::duration::parse_duration;
use crate::{RunOpts, StoreKind, StoreOpts};
use anyhow::Context;
use feeder_populate::{RunOptions, SeedMode, DEFAULT_SETTLE_DELAY};
use feeder_store_mongodb::MongoCredential;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Database used by the in-memory store when none is configured.
const MEMORY_DATABASE: &str = "feeder";
/// Container used by the in-memory store when none is configured.
const MEMORY_CONTAINER: &str = "documents";

/// Contents of a settings file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub run: RunSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    pub kind: Option<StoreKind>,
    pub endpoint_url: Option<String>,
    pub authorization_key: Option<String>,
    pub username: Option<String>,
    pub database_name: Option<String>,
    pub container_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    pub batch_size: Option<usize>,
    pub cycles: Option<u64>,
    pub seed: Option<u64>,
    pub max_concurrency: Option<usize>,
    pub settle_delay: Option<String>,
    pub vary_seed: Option<bool>,
}

impl SettingsFile {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {path:?}"))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse settings file: {path:?}"))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Where and how to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub kind: StoreKind,
    pub endpoint_url: Option<String>,
    pub authorization_key: Option<String>,
    pub username: Option<String>,
    pub database_name: String,
    pub container_name: String,
}

impl StoreSettings {
    /// Explicit credential, when an authorization key is configured.
    pub fn credential(&self) -> Option<MongoCredential> {
        let authorization_key = self.authorization_key.clone()?;
        Some(MongoCredential {
            username: self.username.clone().unwrap_or_default(),
            authorization_key,
        })
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreSettings,
    pub run: RunOptions,
    pub max_concurrency: Option<usize>,
    pub settle_delay: Duration,
}

impl Settings {
    /// Merge command-line/environment values over the settings file.
    pub fn resolve(file: SettingsFile, store: &StoreOpts, run: &RunOpts) -> anyhow::Result<Self> {
        let kind = if run.dry_run {
            StoreKind::Memory
        } else {
            store.store.or(file.store.kind).unwrap_or_default()
        };

        let endpoint_url = store.endpoint_url.clone().or(file.store.endpoint_url);
        let authorization_key = store
            .authorization_key
            .clone()
            .or(file.store.authorization_key);
        let username = store.username.clone().or(file.store.username);
        let database_name = store.database_name.clone().or(file.store.database_name);
        let container_name = store.container_name.clone().or(file.store.container_name);

        let (database_name, container_name) = match kind {
            StoreKind::Memory => (
                database_name.unwrap_or_else(|| MEMORY_DATABASE.to_string()),
                container_name.unwrap_or_else(|| MEMORY_CONTAINER.to_string()),
            ),
            StoreKind::Mongodb => {
                if endpoint_url.is_none() {
                    anyhow::bail!(
                        "Endpoint URL is required (--endpoint-url, FEEDER_ENDPOINT_URL or [store].endpoint_url)"
                    );
                }
                if authorization_key.is_some() && username.is_none() {
                    anyhow::bail!("A username is required when an authorization key is set");
                }
                (
                    database_name.context(
                        "Database name is required (--database-name, FEEDER_DATABASE_NAME or [store].database_name)",
                    )?,
                    container_name.context(
                        "Container name is required (--container-name, FEEDER_CONTAINER_NAME or [store].container_name)",
                    )?,
                )
            }
        };

        let defaults = RunOptions::default();
        let batch_size = run
            .batch_size
            .or(file.run.batch_size)
            .unwrap_or(defaults.batch_size);
        if batch_size == 0 {
            anyhow::bail!("Batch size must be greater than zero");
        }

        let vary_seed = run.vary_seed || file.run.vary_seed.unwrap_or(false);
        let settle_delay = match run.settle_delay.as_deref().or(file.run.settle_delay.as_deref()) {
            Some(value) => parse_duration(value).context("Invalid settle delay")?,
            None => DEFAULT_SETTLE_DELAY,
        };

        Ok(Self {
            store: StoreSettings {
                kind,
                endpoint_url,
                authorization_key,
                username,
                database_name,
                container_name,
            },
            run: RunOptions {
                cycles: run.cycles.or(file.run.cycles).unwrap_or(defaults.cycles),
                batch_size,
                seed: run.seed.or(file.run.seed).unwrap_or(defaults.seed),
                seed_mode: if vary_seed {
                    SeedMode::PerCycle
                } else {
                    SeedMode::Fixed
                },
            },
            max_concurrency: run
                .max_concurrency
                .or(file.run.max_concurrency)
                .filter(|n| *n > 0),
            settle_delay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn mongodb_opts() -> StoreOpts {
        StoreOpts {
            endpoint_url: Some("mongodb://localhost:27017".to_string()),
            database_name: Some("feeder".to_string()),
            container_name: Some("items".to_string()),
            ..StoreOpts::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings =
            Settings::resolve(SettingsFile::default(), &mongodb_opts(), &RunOpts::default())
                .unwrap();

        assert_eq!(settings.store.kind, StoreKind::Mongodb);
        assert_eq!(settings.run, RunOptions::default());
        assert_eq!(settings.max_concurrency, None);
        assert_eq!(settings.settle_delay, Duration::from_secs(1));
        assert!(settings.store.credential().is_none());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = SettingsFile::from_toml(
            r#"
[store]
endpoint_url = "mongodb://file:27017"
database_name = "from-file"
container_name = "file-items"

[run]
batch_size = 10
cycles = 2
seed = 7
settle_delay = "250ms"
"#,
        )
        .unwrap();
        let store = StoreOpts {
            database_name: Some("from-cli".to_string()),
            ..StoreOpts::default()
        };
        let run = RunOpts {
            cycles: Some(5),
            max_concurrency: Some(16),
            vary_seed: true,
            ..RunOpts::default()
        };

        let settings = Settings::resolve(file, &store, &run).unwrap();

        assert_eq!(
            settings.store.endpoint_url.as_deref(),
            Some("mongodb://file:27017")
        );
        assert_eq!(settings.store.database_name, "from-cli");
        assert_eq!(settings.store.container_name, "file-items");
        assert_eq!(settings.run.batch_size, 10);
        assert_eq!(settings.run.cycles, 5);
        assert_eq!(settings.run.seed, 7);
        assert_eq!(settings.run.seed_mode, SeedMode::PerCycle);
        assert_eq!(settings.max_concurrency, Some(16));
        assert_eq!(settings.settle_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_dry_run_uses_memory_store() {
        let run = RunOpts {
            dry_run: true,
            ..RunOpts::default()
        };

        let settings =
            Settings::resolve(SettingsFile::default(), &StoreOpts::default(), &run).unwrap();

        assert_eq!(settings.store.kind, StoreKind::Memory);
        assert_eq!(settings.store.database_name, "feeder");
        assert_eq!(settings.store.container_name, "documents");
    }

    #[test]
    fn test_missing_endpoint() {
        let store = StoreOpts {
            endpoint_url: None,
            ..mongodb_opts()
        };
        let error = Settings::resolve(SettingsFile::default(), &store, &RunOpts::default())
            .unwrap_err();
        assert!(error.to_string().contains("Endpoint URL is required"));
    }

    #[test]
    fn test_missing_database_name() {
        let store = StoreOpts {
            database_name: None,
            ..mongodb_opts()
        };
        let error = Settings::resolve(SettingsFile::default(), &store, &RunOpts::default())
            .unwrap_err();
        assert!(error.to_string().contains("Database name is required"));
    }

    #[test]
    fn test_credential() {
        let store = StoreOpts {
            authorization_key: Some("secret".to_string()),
            username: Some("feeder".to_string()),
            ..mongodb_opts()
        };
        let settings =
            Settings::resolve(SettingsFile::default(), &store, &RunOpts::default()).unwrap();

        let credential = settings.store.credential().unwrap();
        assert_eq!(credential.username, "feeder");
        assert_eq!(credential.authorization_key, "secret");
    }

    #[test]
    fn test_key_without_username_rejected() {
        let store = StoreOpts {
            authorization_key: Some("secret".to_string()),
            ..mongodb_opts()
        };
        assert!(Settings::resolve(SettingsFile::default(), &store, &RunOpts::default()).is_err());
    }

    #[test]
    fn test_zero_concurrency_is_unbounded() {
        let run = RunOpts {
            max_concurrency: Some(0),
            ..RunOpts::default()
        };
        let settings =
            Settings::resolve(SettingsFile::default(), &mongodb_opts(), &run).unwrap();
        assert_eq!(settings.max_concurrency, None);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let run = RunOpts {
            batch_size: Some(0),
            ..RunOpts::default()
        };
        assert!(Settings::resolve(SettingsFile::default(), &mongodb_opts(), &run).is_err());
    }

    #[test]
    fn test_invalid_settle_delay() {
        let run = RunOpts {
            settle_delay: Some("soon".to_string()),
            ..RunOpts::default()
        };
        assert!(Settings::resolve(SettingsFile::default(), &mongodb_opts(), &run).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[store]\nkind = \"memory\"\n\n[run]\ncycles = 3\nmax_concurrency = 8"
        )
        .unwrap();

        let settings_file = SettingsFile::from_file(file.path()).unwrap();
        let settings =
            Settings::resolve(settings_file, &StoreOpts::default(), &RunOpts::default()).unwrap();

        assert_eq!(settings.store.kind, StoreKind::Memory);
        assert_eq!(settings.run.cycles, 3);
        assert_eq!(settings.max_concurrency, Some(8));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(SettingsFile::from_toml("[store]\nendpoint = \"x\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(SettingsFile::from_file(Path::new("/nonexistent/feeder.toml")).is_err());
    }
}
