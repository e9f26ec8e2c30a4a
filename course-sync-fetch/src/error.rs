/// Errors that can occur while fetching a course description.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by description source")]
    RateLimit,

    #[error("No description found for {subject} {course_num}")]
    NotFound { subject: String, course_num: String },

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid description URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to parse description response: {0}")]
    Parse(String),
}
