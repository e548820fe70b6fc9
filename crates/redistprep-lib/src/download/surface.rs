use crate::verification::{ContentDigest, ContentDigestVerifier, VerificationError};
use async_trait::async_trait;
use futures::StreamExt;
use opendal::Operator;
use opendal::services::Http;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Download aborted by user")]
    AbortedByUser,

    #[error("No download registered on the surface")]
    NothingQueued,

    #[error("Integrity check failed for {name}: {source}")]
    Digest {
        name: String,
        source: VerificationError,
    },

    #[error("Transfer failed for {url}: {reason}")]
    Transfer { url: String, reason: String },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The host's download-page widget, reduced to its protocol surface.
///
/// A surface holds at most one pending item: the retry protocol clears and
/// repopulates it on every attempt. `download` blocks until the transfer
/// completes or fails; a user-initiated abort is reported as
/// `FetchError::AbortedByUser`.
#[async_trait]
pub trait DownloadSurface {
    fn clear(&mut self);
    fn add(&mut self, url: Url, local_name: &str, expected_digest: Option<ContentDigest>);
    async fn download(&mut self) -> Result<(), FetchError>;
    fn show(&mut self);
    fn hide(&mut self);
}

#[derive(Clone, Debug)]
struct PendingItem {
    url: Url,
    local_name: String,
    expected_digest: Option<ContentDigest>,
}

/// HTTP implementation of the download surface.
///
/// Streams the artifact to `download_dir/<local_name>`, feeding the content
/// digest verifier along the way when an expected digest was registered.
/// `show`/`hide` only emit log events; there is no widget to render on a
/// console.
pub struct HttpDownloadSurface {
    download_dir: PathBuf,
    pending: Option<PendingItem>,
}

impl HttpDownloadSurface {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            download_dir,
            pending: None,
        }
    }

    /// Local path the pending item will be stored under.
    pub fn pending_output_path(&self) -> Option<PathBuf> {
        self.pending
            .as_ref()
            .map(|item| self.download_dir.join(&item.local_name))
    }
}

fn build_http_operator(endpoint: &str) -> Result<Operator, opendal::Error> {
    // Retry policy lives in the caller's state machine, so the operator is
    // built without a retry layer.
    let builder = Http::default().endpoint(endpoint);
    Ok(Operator::new(builder)?.finish())
}

/// Splits an absolute URL into an operator endpoint (the origin) and the
/// relative path fetched below it.
fn split_url(url: &Url) -> (String, String) {
    (url.origin().ascii_serialization(), url.path().to_string())
}

#[async_trait]
impl DownloadSurface for HttpDownloadSurface {
    fn clear(&mut self) {
        self.pending = None;
    }

    fn add(&mut self, url: Url, local_name: &str, expected_digest: Option<ContentDigest>) {
        self.pending = Some(PendingItem {
            url,
            local_name: local_name.to_string(),
            expected_digest,
        });
    }

    async fn download(&mut self) -> Result<(), FetchError> {
        let item = self.pending.clone().ok_or(FetchError::NothingQueued)?;
        let (endpoint, rel_path) = split_url(&item.url);
        let output_path = self.download_dir.join(&item.local_name);

        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|source| FetchError::Io {
                path: self.download_dir.clone(),
                source,
            })?;

        match &item.expected_digest {
            Some(digest) => info!(
                url = %item.url,
                output = %output_path.display(),
                expected_digest = digest.digest_hex(),
                "Downloading"
            ),
            None => info!(url = %item.url, output = %output_path.display(), "Downloading"),
        }

        let op = build_http_operator(&endpoint).map_err(|err| FetchError::Transfer {
            url: item.url.to_string(),
            reason: err.to_string(),
        })?;

        let mut verifier = item.expected_digest.clone().map(ContentDigestVerifier::new);

        let mut reader = op
            .reader(&rel_path)
            .await
            .map_err(|err| FetchError::Transfer {
                url: item.url.to_string(),
                reason: err.to_string(),
            })?
            .into_stream(..)
            .await
            .map_err(|err| FetchError::Transfer {
                url: item.url.to_string(),
                reason: err.to_string(),
            })?;

        let file = tokio::fs::File::create(&output_path)
            .await
            .map_err(|source| FetchError::Io {
                path: output_path.clone(),
                source,
            })?;
        let mut writer = tokio::io::BufWriter::new(file);

        while let Some(chunk) = reader.next().await {
            let buffer = chunk
                .map_err(|err| FetchError::Transfer {
                    url: item.url.to_string(),
                    reason: err.to_string(),
                })?
                .to_bytes();

            if let Some(verifier) = verifier.as_mut() {
                verifier.update(&buffer);
            }

            tokio::io::AsyncWriteExt::write_all(&mut writer, &buffer)
                .await
                .map_err(|source| FetchError::Io {
                    path: output_path.clone(),
                    source,
                })?;
        }

        tokio::io::AsyncWriteExt::flush(&mut writer)
            .await
            .map_err(|source| FetchError::Io {
                path: output_path.clone(),
                source,
            })?;

        if let Some(verifier) = verifier {
            verifier.verify().map_err(|source| FetchError::Digest {
                name: item.local_name.clone(),
                source,
            })?;
        }

        info!(url = %item.url, output = %output_path.display(), "Downloaded");
        Ok(())
    }

    fn show(&mut self) {
        debug!("Download surface shown");
    }

    fn hide(&mut self) {
        debug!("Download surface hidden");
    }
}
