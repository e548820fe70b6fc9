mod retry;
mod surface;
mod types;

pub use retry::download_with_retry;
pub use surface::{DownloadSurface, FetchError, HttpDownloadSurface};
pub use types::{DownloadOutcome, DownloadRequest, EmptyMirrorList, MirrorList};
