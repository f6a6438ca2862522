use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::board::{Board, BoardConfig, BoardError};
use crate::source::{DataSource, HttpSource};

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// One replayable user interaction against the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Select { id: u64 },
    Deselect,
}

#[derive(Clone, Debug)]
pub struct Options {
    pub endpoint: String,
    pub initial_page_size: usize,
    pub page_increment: usize,
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
    pub script: Vec<Action>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            initial_page_size: crate::board::DEFAULT_INITIAL_PAGE_SIZE,
            page_increment: crate::board::DEFAULT_PAGE_INCREMENT,
            timeout_seconds: 10,
            proxy: None,
            script: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("endpoint is empty")]
    EmptyEndpoint,

    #[error("invalid endpoint: {url}")]
    InvalidEndpoint { url: String },

    #[error("initial page size must be a positive integer")]
    ZeroPageSize,

    #[error("page increment must be a positive integer")]
    ZeroPageIncrement,

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Clone, Debug)]
pub struct SessionResult {
    pub board: Board,
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        if options.endpoint.trim().is_empty() {
            return Err(RunnerError::EmptyEndpoint);
        }
        if reqwest::Url::parse(&options.endpoint).is_err() {
            return Err(RunnerError::InvalidEndpoint {
                url: options.endpoint.clone(),
            });
        }
        if options.initial_page_size == 0 {
            return Err(RunnerError::ZeroPageSize);
        }
        if options.page_increment == 0 {
            return Err(RunnerError::ZeroPageIncrement);
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Performs the one-shot fetch against the configured endpoint, then
    /// replays the scripted interactions on the resulting board.
    pub async fn run(&self) -> Result<SessionResult, RunnerError> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.options.timeout_seconds as u64));
        if let Some(proxy_url) = self.options.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| RunnerError::ProxySetup {
                proxy: proxy_url.to_string(),
                source: e,
            })?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| RunnerError::HttpClientBuild { source: e })?;
        let source = HttpSource::new(client, self.options.endpoint.clone());
        self.run_with_source(&source).await
    }

    /// Same session flow with an injected source (offline files, canned
    /// feeds in tests).
    pub async fn run_with_source<S: DataSource>(
        &self,
        source: &S,
    ) -> Result<SessionResult, RunnerError> {
        let started = Instant::now();
        let mut board = Board::new(BoardConfig {
            initial_page_size: self.options.initial_page_size,
            page_increment: self.options.page_increment,
        });
        board.ingest(source.fetch_all().await);
        for action in &self.options.script {
            match action {
                Action::Reveal => {
                    board.reveal_more();
                }
                Action::Select { id } => {
                    board.select(*id)?;
                }
                Action::Deselect => board.deselect(),
            }
        }
        Ok(SessionResult {
            board,
            elapsed: started.elapsed(),
        })
    }
}
