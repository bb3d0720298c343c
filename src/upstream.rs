//! Upstream data source for the controller's status page.
//!
//! Exactly one source is selected at startup: a live HTTP GET against the
//! controller's CGI endpoint, or a mock file read from disk. The responder
//! does not know which one is active.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::UpstreamConfig;

/// Fetch errors. None of these are retried; they surface to the scrape
/// response as-is.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to get {url}: {source}")]
    Http { url: String, source: reqwest::Error },
    #[error("failed to read response body from {url}: {source}")]
    Body { url: String, source: reqwest::Error },
    #[error("failed to read mock response file {}: {source}", path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The configured status page source.
#[derive(Debug, Clone)]
pub enum Upstream {
    /// Live HTTP GET against the controller.
    Http { client: reqwest::Client, url: String },
    /// Canned response read from a local file.
    File { path: PathBuf },
}

impl Upstream {
    /// Select the source from configuration: a non-empty mock path wins over
    /// the live endpoint.
    pub fn from_config(config: &UpstreamConfig) -> Self {
        if config.mock.is_empty() {
            Self::Http {
                client: reqwest::Client::new(),
                url: config.target.clone(),
            }
        } else {
            Self::File {
                path: PathBuf::from(&config.mock),
            }
        }
    }

    /// Fetch the raw status page bytes. Each call is an independent
    /// round-trip; nothing is cached between scrapes.
    pub async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        match self {
            Self::Http { client, url } => {
                let response =
                    client
                        .get(url)
                        .send()
                        .await
                        .map_err(|source| FetchError::Http {
                            url: url.clone(),
                            source,
                        })?;
                let body = response.bytes().await.map_err(|source| FetchError::Body {
                    url: url.clone(),
                    source,
                })?;
                Ok(body.to_vec())
            }
            Self::File { path } => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| FetchError::File {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_config_selects_live_http_by_default() {
        let config = UpstreamConfig::default();
        let upstream = Upstream::from_config(&config);

        match upstream {
            Upstream::Http { url, .. } => assert_eq!(url, config.target),
            Upstream::File { .. } => panic!("empty mock must select live HTTP"),
        }
    }

    #[test]
    fn test_from_config_selects_mock_file_when_set() {
        let config = UpstreamConfig {
            mock: "/tmp/mock.txt".to_string(),
            ..Default::default()
        };

        match Upstream::from_config(&config) {
            Upstream::File { path } => assert_eq!(path, PathBuf::from("/tmp/mock.txt")),
            Upstream::Http { .. } => panic!("non-empty mock must select the file source"),
        }
    }

    #[tokio::test]
    async fn test_fetch_reads_mock_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "canned response").unwrap();

        let upstream = Upstream::File {
            path: file.path().to_path_buf(),
        };

        let bytes = upstream.fetch().await.unwrap();
        assert_eq!(bytes, b"canned response");
    }

    #[tokio::test]
    async fn test_fetch_missing_mock_file_is_an_error() {
        let upstream = Upstream::File {
            path: PathBuf::from("/nonexistent/mock-response.txt"),
        };

        let err = upstream.fetch().await.unwrap_err();
        assert!(
            err.to_string()
                .contains("failed to read mock response file")
        );
    }
}
