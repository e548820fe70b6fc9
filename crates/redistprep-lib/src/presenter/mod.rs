mod console;

pub use console::ConsolePresenter;

/// User's answer to a "retry the download?" prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryChoice {
    Retry,
    Cancel,
}

/// Presentation capability required by the download and install protocols.
///
/// Implementations may render to a console, a GUI progress page, or nothing
/// at all (headless runs, tests). The protocols never format user-facing
/// text beyond the labels they are given.
pub trait Presenter {
    fn show_progress(&mut self, label: &str);
    fn hide_progress(&mut self);
    fn show_blocking_error(&mut self, message: &str);
    fn confirm_retry(&mut self, artifact: &str) -> RetryChoice;
}
