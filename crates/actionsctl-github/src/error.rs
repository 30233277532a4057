use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid repository (expected owner/name): {0}")]
    InvalidRepository(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// `reqwest` refused to assemble the request, e.g. a header value with a newline.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[source] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        documentation_url: Option<String>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status of an API error, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the request never left the client.
    pub fn is_request_construction(&self) -> bool {
        matches!(
            self,
            Error::InvalidBaseUrl(_) | Error::Url(_) | Error::InvalidRequest(_)
        )
    }

    /// Sorts a `reqwest` failure raised while building a request.
    pub(crate) fn from_build(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::InvalidRequest(err)
        } else {
            Error::Http(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
