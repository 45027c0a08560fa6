use civic_core::{CouncilMember, Project, TaxRecord};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}: {message}")]
    Status {
        url: String,
        status: StatusCode,
        message: String,
    },

    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Body of `GET /api/test-db`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub message: String,
    pub time: String,
}

/// Thin wrapper over the civic API. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(concat!("tino/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.url("/api/test-db");
        let response = self.send(&url).await?;
        if !response.status().is_success() {
            return Err(status_error(url, response).await);
        }
        response
            .json()
            .await
            .map_err(|source| ClientError::Decode { url, source })
    }

    pub async fn tax_records(&self) -> Result<Vec<TaxRecord>, ClientError> {
        self.collection("/api/tax-records").await
    }

    pub async fn council_members(&self) -> Result<Vec<CouncilMember>, ClientError> {
        self.collection("/api/council-members").await
    }

    pub async fn projects(&self) -> Result<Vec<Project>, ClientError> {
        self.collection("/api/projects").await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, ClientError> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.to_string(),
                source,
            })
    }

    /// The server answers `404 {"error": ...}` for an empty table; that maps
    /// to an empty list. A 404 without that body is still an error.
    async fn collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let url = self.url(path);
        let response = self.send(&url).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return match response.json::<ErrorBody>().await {
                Ok(body) => {
                    debug!(%url, message = %body.error, "empty collection");
                    Ok(Vec::new())
                }
                Err(_) => Err(ClientError::Status {
                    url,
                    status,
                    message: "not found".to_string(),
                }),
            };
        }

        if !status.is_success() {
            return Err(status_error(url, response).await);
        }

        let records: Vec<T> = response
            .json()
            .await
            .map_err(|source| ClientError::Decode {
                url: url.clone(),
                source,
            })?;
        debug!(%url, count = records.len(), "fetched collection");
        Ok(records)
    }
}

async fn status_error(url: String, response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    ClientError::Status {
        url,
        status,
        message,
    }
}
