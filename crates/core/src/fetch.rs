use crossbeam_channel::Sender;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::Dataset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Source {
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Source::Url(s.to_string())
        } else {
            Source::File(PathBuf::from(s))
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Url(url) => f.write_str(url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read response body: {0}")]
    Body(#[source] std::io::Error),
    #[error("malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches and parses the dataset. One attempt, no timeout, no retry.
pub fn fetch_dataset(source: &Source) -> Result<Dataset, FetchError> {
    let text = match source {
        Source::Url(url) => {
            tracing::info!(%url, "fetching dataset");
            let resp = ureq::get(url).call().map_err(|e| FetchError::Http {
                url: url.clone(),
                source: Box::new(e),
            })?;
            resp.into_string().map_err(FetchError::Body)?
        }
        Source::File(path) => {
            tracing::info!(path = %path.display(), "reading dataset");
            std::fs::read_to_string(path).map_err(|source| FetchError::Io {
                path: path.clone(),
                source,
            })?
        }
    };
    let data = Dataset::from_json(&text)?;
    tracing::debug!(platforms = data.children.len(), "dataset parsed");
    Ok(data)
}

#[derive(Debug, Clone)]
pub enum LoadMsg {
    Done(Dataset),
    Error(String),
}

/// Runs the fetch off the calling thread and reports back over a channel.
pub struct Loader {
    source: Source,
}

impl Loader {
    pub fn new(source: Source) -> Self {
        Self { source }
    }

    pub fn load(&self, tx: Sender<LoadMsg>) {
        let msg = match fetch_dataset(&self.source) {
            Ok(data) => LoadMsg::Done(data),
            Err(e) => {
                tracing::error!(source = %self.source, "error loading data: {e}");
                LoadMsg::Error(e.to_string())
            }
        };
        let _ = tx.send(msg);
    }

    pub fn spawn(self, tx: Sender<LoadMsg>) -> std::thread::JoinHandle<()> {
        std::thread::spawn(move || self.load(tx))
    }
}
