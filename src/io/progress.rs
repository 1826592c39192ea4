//! Progress display for batch synthesis runs
//!
//! Wraps indicatif bars behind the solver's observer hook: the solver
//! reports collapsed-cell counts at its yield boundaries and the bars
//! render them, without the solver knowing anything about terminals.

use crate::algorithm::executor::{Observer, Progress};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static CELL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len} cells {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display across a batch of sample files
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    synthesis_bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with an idle synthesis bar
    pub fn new() -> Self {
        let multi_progress = MultiProgress::new();
        let synthesis_bar = multi_progress.add(ProgressBar::new(0));
        synthesis_bar.set_style(CELL_STYLE.clone());
        synthesis_bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            multi_progress,
            batch_bar: None,
            synthesis_bar,
        }
    }

    /// Add a file-count bar when processing more than one sample
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.insert(0, batch_bar));
        }
    }

    /// Label the synthesis bar for a new file
    pub fn start_file(&mut self, path: &Path) {
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.synthesis_bar.reset();
        self.synthesis_bar.set_message(display_name);
        self.synthesis_bar.set_prefix("");
    }

    /// Observer handle to install on a synthesizer
    ///
    /// Indicatif bars are cheaply cloneable handles to shared state, so the
    /// observer can live inside the solver while the manager keeps drawing.
    pub fn observer(&self) -> BarObserver {
        BarObserver {
            bar: self.synthesis_bar.clone(),
        }
    }

    /// Mark the current file done and advance the batch bar
    pub fn complete_file(&mut self, elapsed: Duration) {
        self.synthesis_bar
            .set_prefix(format!("({:.1}s)", elapsed.as_secs_f64()));
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Finish and clear all bars
    pub fn finish(&mut self) {
        self.synthesis_bar.finish_and_clear();
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.finish_and_clear();
        }
    }
}

/// Observer that mirrors solver progress into a progress bar
pub struct BarObserver {
    bar: ProgressBar,
}

impl Observer for BarObserver {
    fn on_progress(&mut self, progress: Progress) {
        self.bar.set_length(progress.total_cells as u64);
        self.bar.set_position(progress.collapsed_cells as u64);
        if progress.max_attempts > 1 {
            self.bar.set_prefix(format!(
                "attempt {}/{}",
                progress.attempt, progress.max_attempts
            ));
        }
    }
}
