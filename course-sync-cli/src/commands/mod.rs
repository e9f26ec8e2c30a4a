pub(crate) mod blueprints;
pub(crate) mod config;
pub(crate) mod history;
pub(crate) mod stats;
pub(crate) mod sync;

use std::future::Future;
use std::path::Path;

use course_sync_core::RawCourse;
use course_sync_fetch::{
    DescriptionSource, FetchError, HttpDescriptionSource, StaticDescriptionSource,
};

use crate::CliError;
use crate::cli_types::SourceArgs;
use crate::config::{ENV_DESCRIPTION_URL, SyncConfig};

/// The description source picked for this run.
pub(crate) enum CliSource {
    Http(HttpDescriptionSource),
    Static(StaticDescriptionSource),
}

impl DescriptionSource for CliSource {
    fn fetch_description(
        &self,
        course: &RawCourse,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        async move {
            match self {
                Self::Http(source) => source.fetch_description(course).await,
                Self::Static(source) => source.fetch_description(course).await,
            }
        }
    }
}

/// One entry of a `--descriptions` file.
#[derive(Debug, serde::Deserialize)]
struct DescriptionRecord {
    subject: String,
    course_num: String,
    description: String,
}

/// A descriptions file wins over the configured URL.
pub(crate) fn build_source(config: &SyncConfig, args: &SourceArgs) -> Result<CliSource, CliError> {
    if let Some(path) = &args.descriptions {
        return load_descriptions(path).map(CliSource::Static);
    }

    match &config.description_url {
        Some(url) => {
            let source = HttpDescriptionSource::new(url.clone(), config.http_options())?;
            log::debug!("Fetching descriptions from {}", url);
            Ok(CliSource::Http(source))
        }
        None => Err(CliError::config(format!(
            "No description source. Pass --descriptions <file>, --description-url, \
             or set ${ENV_DESCRIPTION_URL}"
        ))),
    }
}

fn load_descriptions(path: &Path) -> Result<StaticDescriptionSource, CliError> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<DescriptionRecord> = serde_json::from_str(&content).map_err(|e| {
        CliError::config(format!("Invalid descriptions file {}: {}", path.display(), e))
    })?;

    let mut source = StaticDescriptionSource::new();
    for record in records {
        source.insert(&record.subject, &record.course_num, record.description);
    }
    log::debug!(
        "Loaded {} descriptions from {}",
        source.len(),
        path.display()
    );
    Ok(source)
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}
