use crate::cli::params::FetchParams;
use crate::download::{DownloadOutcome, HttpDownloadSurface, download_with_retry};
use crate::error::RedistPrepError;
use crate::presenter::ConsolePresenter;
use tracing::info;

pub async fn run_fetch(params: FetchParams) -> Result<(), RedistPrepError> {
    let mut surface = HttpDownloadSurface::new(params.output_dir.clone());
    let mut presenter = ConsolePresenter::new(params.interactive);

    let outcome = download_with_retry(&mut surface, &mut presenter, &params.request).await;

    match outcome {
        DownloadOutcome::Success => {
            info!(
                artifact = %params.request.local_name,
                output = %params.output_dir.join(&params.request.local_name).display(),
                "Fetch completed successfully"
            );
            Ok(())
        }
        outcome => Err(RedistPrepError::DownloadFailed {
            artifact: params.request.local_name.clone(),
            outcome,
        }),
    }
}
