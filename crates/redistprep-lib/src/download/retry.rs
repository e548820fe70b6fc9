use super::surface::{DownloadSurface, FetchError};
use super::types::{DownloadOutcome, DownloadRequest};
use crate::presenter::{Presenter, RetryChoice};
use tracing::{info, warn};

/// Downloads one artifact, falling back through the request's mirrors and
/// prompting the user to retry the whole list up to `max_retries` times.
///
/// The mirror list is treated as one atomic attempt: a failing mirror
/// advances to the next one without consuming a retry, and a user-approved
/// retry always starts over from the first mirror. Mirrors are deliberately
/// not remembered as bad between passes.
pub async fn download_with_retry(
    surface: &mut (dyn DownloadSurface + Send),
    presenter: &mut dyn Presenter,
    request: &DownloadRequest,
) -> DownloadOutcome {
    let mut mirror_index = 0;
    let mut retries = 0u32;

    loop {
        let mirror = request.mirrors.get(mirror_index);

        surface.clear();
        surface.add(
            mirror.clone(),
            &request.local_name,
            request.expected_digest.clone(),
        );

        match surface.download().await {
            Ok(()) => {
                info!(
                    artifact = %request.local_name,
                    mirror = %mirror,
                    "Download succeeded"
                );
                return DownloadOutcome::Success;
            }
            Err(FetchError::AbortedByUser) => {
                warn!(
                    artifact = %request.local_name,
                    mirror = %mirror,
                    "Download aborted by user"
                );
                return DownloadOutcome::AbortedByUser;
            }
            Err(err) => {
                warn!(
                    artifact = %request.local_name,
                    mirror = %mirror,
                    error = %err,
                    "Mirror failed"
                );

                if mirror_index + 1 < request.mirrors.len() {
                    mirror_index += 1;
                    continue;
                }

                retries += 1;
                if retries > request.max_retries {
                    warn!(
                        artifact = %request.local_name,
                        retries,
                        "All mirrors failed, retry budget exhausted"
                    );
                    return DownloadOutcome::ExhaustedMaxRetries;
                }

                match presenter.confirm_retry(&request.local_name) {
                    RetryChoice::Retry => {
                        info!(artifact = %request.local_name, "User chose to retry");
                        mirror_index = 0;
                    }
                    RetryChoice::Cancel => {
                        info!(artifact = %request.local_name, "User declined to retry");
                        return DownloadOutcome::RetryCancelledByUser;
                    }
                }
            }
        }
    }
}
