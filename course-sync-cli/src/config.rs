//! Layered configuration: defaults, then the TOML file, then env vars,
//! then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use course_sync_fetch::HttpOptions;
use course_sync_import::DEFAULT_WORKERS;

use crate::CliError;

pub(crate) const ENV_DB: &str = "COURSE_SYNC_DB";
pub(crate) const ENV_WORKERS: &str = "COURSE_SYNC_WORKERS";
pub(crate) const ENV_DESCRIPTION_URL: &str = "COURSE_SYNC_DESCRIPTION_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub(crate) struct ConfigFile {
    pub sync: Option<SyncSection>,
    pub descriptions: Option<DescriptionSection>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub(crate) struct SyncSection {
    pub database: Option<PathBuf>,
    pub workers: Option<usize>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub(crate) struct DescriptionSection {
    pub url: Option<String>,
    pub min_request_interval_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// Where a setting's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueSource {
    Flag,
    EnvVar(&'static str),
    ConfigFile,
    Default,
    Missing,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub(crate) struct SyncConfig {
    pub db_path: PathBuf,
    pub workers: usize,
    pub description_url: Option<String>,
    pub min_request_interval: Duration,
    pub timeout: Duration,
    pub sources: ConfigSources,
}

/// Provenance of each setting, for `config show`.
#[derive(Debug, Clone)]
pub(crate) struct ConfigSources {
    pub db_path: ValueSource,
    pub workers: ValueSource,
    pub description_url: ValueSource,
}

/// Settings given on the command line.
#[derive(Debug, Default, Clone)]
pub(crate) struct Overrides {
    pub db_path: Option<PathBuf>,
    pub workers: Option<usize>,
    pub description_url: Option<String>,
}

impl SyncConfig {
    /// Load from the default config file and the process environment.
    pub fn load(overrides: Overrides) -> Result<Self, CliError> {
        let file = match config_path() {
            Some(path) => read_config_file(&path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(file, |var| std::env::var(var).ok(), overrides)
    }

    /// Merge the layers. `env` looks up an environment variable.
    pub fn resolve(
        file: ConfigFile,
        env: impl Fn(&str) -> Option<String>,
        overrides: Overrides,
    ) -> Result<Self, CliError> {
        let sync = file.sync.unwrap_or_default();
        let descriptions = file.descriptions.unwrap_or_default();

        let (db_path, db_source) = pick(
            overrides.db_path,
            env(ENV_DB).map(PathBuf::from).map(|p| (p, ENV_DB)),
            sync.database,
        );
        let db_path = db_path.unwrap_or_else(default_db_path);
        let db_source = match db_source {
            ValueSource::Missing => ValueSource::Default,
            s => s,
        };

        let env_workers = match env(ENV_WORKERS) {
            Some(raw) => Some((
                raw.trim().parse::<usize>().map_err(|_| {
                    CliError::config(format!("{ENV_WORKERS} must be a number, got '{raw}'"))
                })?,
                ENV_WORKERS,
            )),
            None => None,
        };
        let (workers, workers_source) = pick(overrides.workers, env_workers, sync.workers);
        let (workers, workers_source) = match workers {
            Some(w) => (w, workers_source),
            None => (DEFAULT_WORKERS, ValueSource::Default),
        };
        if workers == 0 {
            return Err(CliError::config("workers must be at least 1"));
        }

        let (description_url, url_source) = pick(
            overrides.description_url,
            env(ENV_DESCRIPTION_URL).map(|u| (u, ENV_DESCRIPTION_URL)),
            descriptions.url,
        );

        Ok(Self {
            db_path,
            workers,
            description_url,
            min_request_interval: Duration::from_millis(
                descriptions.min_request_interval_ms.unwrap_or(0),
            ),
            timeout: Duration::from_secs(descriptions.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            sources: ConfigSources {
                db_path: db_source,
                workers: workers_source,
                description_url: url_source,
            },
        })
    }

    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            min_request_interval: self.min_request_interval,
            timeout: self.timeout,
        }
    }

    /// Lock file guarding the database against concurrent syncs.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .db_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.db_path.with_file_name(name)
    }
}

/// Highest-priority value among flag, env var and config file.
fn pick<T>(
    flag: Option<T>,
    env: Option<(T, &'static str)>,
    file: Option<T>,
) -> (Option<T>, ValueSource) {
    if let Some(v) = flag {
        (Some(v), ValueSource::Flag)
    } else if let Some((v, var)) = env {
        (Some(v), ValueSource::EnvVar(var))
    } else if let Some(v) = file {
        (Some(v), ValueSource::ConfigFile)
    } else {
        (None, ValueSource::Missing)
    }
}

/// Return the path to the config file.
pub(crate) fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("course-sync").join("config.toml"))
}

/// Default database location, in the platform data directory.
pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("course-sync")
        .join("schedule.db")
}

/// Read a config file. A missing file is an empty config; a malformed one
/// is an error.
pub(crate) fn read_config_file(path: &Path) -> Result<ConfigFile, CliError> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)
            .map_err(|e| CliError::config(format!("Invalid config {}: {}", path.display(), e))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(e.into()),
    }
}
