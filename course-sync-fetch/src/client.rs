//! HTTP description source.
//!
//! Fetches one course description per request from a URL template, with a
//! minimum spacing between requests shared by every worker.

use std::future::Future;
use std::sync::Arc;

use course_sync_core::RawCourse;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::error::FetchError;
use crate::source::DescriptionSource;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Tuning knobs for [`HttpDescriptionSource`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Minimum spacing between request starts, shared by every worker.
    /// Zero disables client-side rate limiting.
    pub min_request_interval: Duration,
    pub timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            min_request_interval: Duration::ZERO,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// JSON body shape accepted from the description endpoint.
#[derive(Debug, serde::Deserialize)]
struct DescriptionResponse {
    description: String,
}

/// Fetches descriptions over HTTP from a URL template.
///
/// The template may contain `{subject}` and `{number}` placeholders, e.g.
/// `https://catalog.example.edu/api/courses/{subject}/{number}`. Responses
/// may be JSON (`{"description": "..."}`) or plain text.
pub struct HttpDescriptionSource {
    http: reqwest::Client,
    url_template: String,
    min_request_interval: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl HttpDescriptionSource {
    pub fn new(url_template: impl Into<String>, options: HttpOptions) -> Result<Self, FetchError> {
        let url_template = url_template.into();
        // Validate the template once with dummy values so bad config fails fast.
        let probe = fill_template(&url_template, "SUBJ", "1");
        reqwest::Url::parse(&probe).map_err(|e| FetchError::InvalidUrl {
            url: url_template.clone(),
            message: e.to_string(),
        })?;

        let http = reqwest::Client::builder().timeout(options.timeout).build()?;

        Ok(Self {
            http,
            url_template,
            min_request_interval: options.min_request_interval,
            last_request: Arc::new(Mutex::new(
                Instant::now()
                    .checked_sub(options.min_request_interval)
                    .unwrap_or_else(Instant::now),
            )),
        })
    }

    /// Concrete URL for one course.
    pub fn url_for(&self, course: &RawCourse) -> String {
        fill_template(&self.url_template, &course.subject, &course.course_num)
    }

    async fn fetch(&self, course: &RawCourse) -> Result<String, FetchError> {
        let url = self.url_for(course);

        self.rate_limit().await;

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                subject: course.subject.clone(),
                course_num: course.course_num.clone(),
            });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimit);
        }

        let is_json = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(FetchError::ServerError {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }

        let description = parse_description(&text, is_json)?;
        if description.is_empty() {
            return Err(FetchError::NotFound {
                subject: course.subject.clone(),
                course_num: course.course_num.clone(),
            });
        }
        Ok(description)
    }

    /// Wait until at least `min_request_interval` has passed since the last
    /// request started.
    async fn rate_limit(&self) {
        if self.min_request_interval.is_zero() {
            return;
        }
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < self.min_request_interval {
            tokio::time::sleep(self.min_request_interval - elapsed).await;
        }
        *last = Instant::now();
    }
}

impl DescriptionSource for HttpDescriptionSource {
    fn fetch_description(
        &self,
        course: &RawCourse,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        self.fetch(course)
    }
}

fn fill_template(template: &str, subject: &str, number: &str) -> String {
    template
        .replace("{subject}", subject)
        .replace("{number}", number)
}

/// Extract the description from a response body.
pub(crate) fn parse_description(body: &str, is_json: bool) -> Result<String, FetchError> {
    let trimmed = body.trim();
    if is_json || trimmed.starts_with('{') {
        let parsed: DescriptionResponse = serde_json::from_str(trimmed).map_err(|e| {
            let snippet: String = trimmed.chars().take(200).collect();
            FetchError::Parse(format!("{e}. Response: {snippet}"))
        })?;
        Ok(parsed.description.trim().to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
