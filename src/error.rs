use ::scraper::error::SelectorErrorKind;

/// All errors that can occur while scraping and exporting fighter data.
#[derive(thiserror::Error, Debug)]
pub enum SherdogError {
    /// HTTP request failed (network, DNS, TLS, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The underlying HTTP client could not be built from the configuration.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// A base URL or scraped link could not be turned into a request URL.
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Reading or writing an output file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing CSV failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Reading or writing JSON failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl<'a> From<SelectorErrorKind<'a>> for SherdogError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        SherdogError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SherdogError>;
