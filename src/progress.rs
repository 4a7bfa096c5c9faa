//! Progress reporting infrastructure

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::borrow::Cow;

/// CLI progress report of ongoing operations
///
/// To avoid corrupted terminal output, you should not write anything to stdout
/// or stderr yourself as long as a report is being displayed. Please use
/// [`note()`](Self::note) for user-facing messages and logs for debug messages.
#[derive(Clone, Debug, Default)]
pub struct ProgressReport(MultiProgress);
//
impl ProgressReport {
    /// Prepare to report progress on the cli
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare to report on a new operation
    pub fn add(&self, what: impl Into<Cow<'static, str>>, config: ProgressConfig) -> ProgressTracker {
        let ProgressConfig {
            work,
            show_rate_eta,
        } = config;
        let style_header = "{prefix} {wide_bar} ";
        let style_trailer = match (work, show_rate_eta) {
            (Work::Steps(_), false) => "{pos}/{len}",
            (Work::Steps(_), true) => "{pos}/{len} ({per_sec})",
            (Work::PercentSteps(_), false) => "{percent:>2}%",
            (Work::PercentSteps(_), true) => "{percent:>2}% (~{eta} left)",
            (Work::Bytes(_), false) => "{decimal_bytes}/{decimal_total_bytes}",
            (Work::Bytes(_), true) => {
                "{decimal_bytes}/{decimal_total_bytes} ({decimal_bytes_per_sec})"
            }
        };
        let bar = ProgressBar::new(work.into())
            .with_prefix(what)
            .with_style(
                ProgressStyle::with_template(&format!("{style_header}{style_trailer}"))
                    .expect("all styles above should be valid indicatif styles"),
            );
        ProgressTracker {
            bar: self.0.add(bar),
            report: Some(self.0.clone()),
        }
    }

    /// Display a message above the progress bars
    pub fn note(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        log::info!("{message}");
        if self.0.is_hidden() || self.0.println(message).is_err() {
            eprintln!("{message}");
        }
    }
}

/// Progress bar configuration
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct ProgressConfig {
    /// Length of the progress bar
    work: Work,

    /// Show the completion rate or estimated remaining time, depending on work
    show_rate_eta: bool,
}
//
impl ProgressConfig {
    /// Default configuration, for a certain amount of work
    pub fn new(work: Work) -> Self {
        Self {
            work,
            show_rate_eta: true,
        }
    }

    /// Disable tracking of step completions
    pub fn dont_show_rate_eta(self) -> Self {
        Self {
            show_rate_eta: false,
            ..self
        }
    }
}

/// Work whose progression can be tracked
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Work {
    /// Steps to be taken, with a precise count display
    Steps(usize),

    /// Steps to be taken, with a percentage-based display
    PercentSteps(usize),

    /// Bytes to be processed
    Bytes(u64),
}
//
impl From<Work> for u64 {
    fn from(value: Work) -> Self {
        match value {
            Work::Steps(s) => s as u64,
            Work::PercentSteps(p) => p as u64,
            Work::Bytes(b) => b,
        }
    }
}

/// Mechanism to track progress
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    /// Progress bar for this specific process
    bar: ProgressBar,

    /// Underlying process report, if the bar is displayed
    report: Option<MultiProgress>,
}
//
impl ProgressTracker {
    /// Tracker that is never displayed
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            report: None,
        }
    }

    /// Show that a certain amount of progress has been made
    ///
    /// Returns truth that the progress bar has reached its maximum value, in
    /// which case it is removed from the display.
    pub fn make_progress(&self, progress: u64) -> bool {
        self.bar.inc(progress);
        let Some(max) = self.bar.length() else {
            return false;
        };
        let current = self.bar.position();
        debug_assert!(current <= max, "recorded more progress than expected");
        let finished = current >= max;
        if finished {
            self.finish();
        }
        finished
    }

    /// Hide the progress bar, whether the work was completed or not
    pub fn finish(&self) {
        if self.bar.is_finished() {
            return;
        }
        self.bar.finish_and_clear();
        if let Some(report) = &self.report {
            report.remove(&self.bar);
        }
    }
}
