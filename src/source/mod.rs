use thiserror::Error;

use crate::record::{RawRecord, Record, ValidationError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("endpoint returned status {status}")]
    BadStatus { status: u16 },

    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Seam between the board and whatever produces records. The one-shot fetch
/// preserves the element order of the underlying feed.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError>;
}

fn validate_all(raw: Vec<RawRecord>) -> Result<Vec<Record>, FetchError> {
    raw.into_iter()
        .map(Record::from_raw)
        .collect::<Result<Vec<_>, _>>()
        .map_err(FetchError::from)
}

/// Fetches the record feed from a remote JSON endpoint. One GET, no retries.
#[derive(Clone, Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSource {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DataSource for HttpSource {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                url: self.endpoint.clone(),
                source: e,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                status: status.as_u16(),
            });
        }
        let raw: Vec<RawRecord> = resp.json().await.map_err(|e| FetchError::Decode { source: e })?;
        validate_all(raw)
    }
}

/// Reads the record feed from a local JSON file (the `--offline` driver).
#[derive(Clone, Debug)]
pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

impl DataSource for FileSource {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::FileRead {
                path: self.path.clone(),
                source: e,
            })?;
        let raw: Vec<RawRecord> =
            serde_json::from_str(&contents).map_err(|e| FetchError::FileParse {
                path: self.path.clone(),
                source: e,
            })?;
        validate_all(raw)
    }
}

/// Canned source for tests and demos: either a fixed raw feed or a forced
/// status failure.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    records: Vec<RawRecord>,
    fail_status: Option<u16>,
}

impl StaticSource {
    pub fn from_raw(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            fail_status: None,
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            records: Vec::new(),
            fail_status: Some(status),
        }
    }
}

impl DataSource for StaticSource {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        if let Some(status) = self.fail_status {
            return Err(FetchError::BadStatus { status });
        }
        validate_all(self.records.clone())
    }
}
