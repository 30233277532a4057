use crate::{Error, Response, ResponseMeta, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Request};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";
pub const DEFAULT_USER_AGENT: &str = concat!("actionsctl/", env!("CARGO_PKG_VERSION"));

const MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Thin wrapper over `reqwest` that knows how to talk to the GitHub REST API.
///
/// Holds no per-call state; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
    user_agent: String,
}

#[derive(Debug, Default)]
pub struct GitHubClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    user_agent: Option<String>,
}

impl GitHubClientBuilder {
    /// API root. Must end with `/` or every request built from it is rejected.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<GitHubClient> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let http = Client::builder().build()?;

        Ok(GitHubClient {
            http,
            base_url,
            token: self.token.filter(|t| !t.is_empty()),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    documentation_url: Option<String>,
}

impl GitHubClient {
    /// Client for api.github.com authenticated with a personal access token.
    pub fn new(token: String) -> Result<Self> {
        Self::builder().token(token).build()
    }

    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves path segments against the base URL, percent-encoding each one.
    ///
    /// Fails without touching the network when the base URL has no trailing slash.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if !self.base_url.path().ends_with('/') {
            return Err(Error::InvalidBaseUrl(format!(
                "base URL must have a trailing slash, but {} does not",
                self.base_url
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Builds a request that carries no body at all.
    pub fn build_request(&self, method: Method, url: Url) -> Result<Request> {
        self.request_builder(method, url)
            .build()
            .map_err(Error::from_build)
    }

    /// Builds a request whose body is `body` encoded as JSON.
    pub fn build_json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<Request> {
        let payload = serde_json::to_vec(body)?;

        self.request_builder(method, url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .build()
            .map_err(Error::from_build)
    }

    fn request_builder(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(ACCEPT, MEDIA_TYPE)
            .header(API_VERSION_HEADER, API_VERSION)
            .header(USER_AGENT, &self.user_agent);

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends `request` and decodes a JSON body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<Response<T>> {
        let response = self.send(request).await?;
        let meta = ResponseMeta::from_parts(response.status().as_u16(), response.headers());
        let body = response.bytes().await?;

        Ok(Response {
            data: serde_json::from_slice(&body)?,
            meta,
        })
    }

    /// Sends `request` and discards whatever body comes back.
    pub async fn execute_empty(&self, request: Request) -> Result<Response<()>> {
        let response = self.send(request).await?;
        let meta = ResponseMeta::from_parts(response.status().as_u16(), response.headers());
        response.bytes().await?;

        Ok(Response { data: (), meta })
    }

    async fn send(&self, request: Request) -> Result<reqwest::Response> {
        tracing::debug!("{} {}", request.method(), request.url());

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let text = response.text().await.map_err(|e| {
            tracing::warn!("Failed to read error body from {}: {}", url, e);
            Error::Http(e)
        })?;
        let error = api_error(status.as_u16(), &text);
        tracing::warn!("GitHub API request to {} failed: {}", url, error);

        Err(error)
    }
}

fn api_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => Error::Api {
            status,
            message: parsed.message,
            documentation_url: parsed.documentation_url,
        },
        Err(_) => Error::Api {
            status,
            message: body.trim().to_string(),
            documentation_url: None,
        },
    }
}
