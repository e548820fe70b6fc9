use super::{Presenter, RetryChoice};
use std::io::{BufRead, Write};
use tracing::{error, info};

/// Console rendition of the wizard's progress surfaces.
///
/// Progress updates and blocking errors go to stderr; retry prompts read a
/// single line from stdin. In non-interactive mode prompts are answered with
/// `Cancel` so unattended runs never hang on input.
pub struct ConsolePresenter {
    interactive: bool,
}

impl ConsolePresenter {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl Presenter for ConsolePresenter {
    fn show_progress(&mut self, label: &str) {
        info!("{label}");
        eprintln!("{label}");
    }

    fn hide_progress(&mut self) {}

    fn show_blocking_error(&mut self, message: &str) {
        error!("{message}");
        eprintln!("ERROR: {message}");
    }

    fn confirm_retry(&mut self, artifact: &str) -> RetryChoice {
        if !self.interactive {
            info!(artifact, "Non-interactive run, declining retry");
            return RetryChoice::Cancel;
        }

        eprint!("Download of {artifact} failed on all mirrors. Retry? [y/N] ");
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return RetryChoice::Cancel;
        }

        match answer.trim() {
            "y" | "Y" | "yes" => RetryChoice::Retry,
            _ => RetryChoice::Cancel,
        }
    }
}
