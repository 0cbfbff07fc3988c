use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Progress bar plus per-item status lines.
///
/// Status lines are printed above the bar while it is visible and straight
/// to stdout otherwise. `quiet` silences the lines, `show_bar` controls the
/// bar; the bar is never drawn when stderr is not a terminal.
pub struct ProgressReporter {
    multi_progress: MultiProgress,
    bar: Option<ProgressBar>,
    show_bar: bool,
    quiet: bool,
}

impl ProgressReporter {
    pub fn new(show_bar: bool, quiet: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bar: None,
            show_bar: show_bar && !quiet && std::io::stderr().is_terminal(),
            quiet,
        }
    }

    /// Reporter that prints nothing at all
    pub fn silent() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bar: None,
            show_bar: false,
            quiet: true,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn start(&mut self, total: usize, message: &str) {
        if !self.show_bar {
            return;
        }

        let pb = self.multi_progress.add(ProgressBar::new(total as u64));
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg} ({eta})",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        self.bar = Some(pb);
    }

    pub fn advance(&self) {
        if let Some(ref pb) = self.bar {
            pb.inc(1);
        }
    }

    /// Print one status line unless quiet
    pub fn line(&self, message: &str) {
        if self.quiet {
            return;
        }

        match self.bar {
            Some(_) => self.multi_progress.println(message).unwrap_or(()),
            None => println!("{message}"),
        }
    }

    pub fn finish(&mut self, message: &str) {
        if let Some(pb) = self.bar.take() {
            pb.finish_with_message(message.to_string());
            self.multi_progress.clear().unwrap_or(());
        }
    }
}
