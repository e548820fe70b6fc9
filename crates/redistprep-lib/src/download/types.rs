use crate::verification::ContentDigest;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
#[error("Mirror list must contain at least one URL")]
pub struct EmptyMirrorList;

/// Ordered, non-empty list of candidate URLs for one logical artifact.
///
/// Emptiness is rejected at construction so the retry protocol never has to
/// distinguish a caller error from a genuine download failure.
#[derive(Clone, Debug)]
pub struct MirrorList(Vec<Url>);

impl MirrorList {
    pub fn new(mirrors: Vec<Url>) -> Result<Self, EmptyMirrorList> {
        if mirrors.is_empty() {
            return Err(EmptyMirrorList);
        }
        Ok(Self(mirrors))
    }

    pub fn single(url: Url) -> Self {
        Self(vec![url])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> &Url {
        &self.0[index]
    }
}

/// Terminal result of one retryable download invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownloadOutcome {
    Success,
    AbortedByUser,
    RetryCancelledByUser,
    ExhaustedMaxRetries,
}

impl std::fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            DownloadOutcome::Success => "success",
            DownloadOutcome::AbortedByUser => "aborted by user",
            DownloadOutcome::RetryCancelledByUser => "retry cancelled by user",
            DownloadOutcome::ExhaustedMaxRetries => "exhausted maximum retries",
        };
        f.write_str(text)
    }
}

/// One retryable download: the mirrors to try, the local file name to store
/// the artifact under, an optional integrity digest, and how many extra full
/// passes over the mirror list the user may request.
///
/// `max_retries == 0` means the mirror list is tried exactly once.
#[derive(Clone, Debug)]
pub struct DownloadRequest {
    pub mirrors: MirrorList,
    pub local_name: String,
    pub expected_digest: Option<ContentDigest>,
    pub max_retries: u32,
}
