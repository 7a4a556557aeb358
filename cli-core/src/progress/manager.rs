use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use console::Style;
use indicatif::{MultiProgress, ProgressBar};

use super::style::{colors, prefixes, templates};

#[derive(Clone)]
pub struct ProgressManager {
    inner: Arc<ProgressManagerInner>,
}

struct ProgressManagerInner {
    multi: MultiProgress,
    start_time: Instant,
    enabled: bool,
}

/// A right-aligned, styled prefix followed by the message.
fn format_line(
    style: Style,
    prefix: &str,
    message: &str,
) -> String {
    format!("{:>12} {}", style.apply_to(prefix), message)
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(enabled: bool) -> Self {
        Self {
            inner: Arc::new(ProgressManagerInner {
                multi: MultiProgress::new(),
                start_time: Instant::now(),
                enabled,
            }),
        }
    }

    /// Create a disabled (no-op) progress manager
    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled
    }

    /// Add a spinner (indeterminate progress)
    pub fn add_spinner(
        &self,
        prefix: &str,
    ) -> ProgressBar {
        if !self.inner.enabled {
            return ProgressBar::hidden();
        }

        let spinner = self
            .inner
            .multi
            .add(ProgressBar::new_spinner());
        spinner.set_style(templates::spinner());
        spinner.set_prefix(prefix.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    /// Print a styled message
    pub fn println(
        &self,
        prefix: &str,
        message: &str,
    ) {
        if !self.inner.enabled {
            return;
        }

        let _ = self
            .inner
            .multi
            .println(format_line(colors::prefix(), prefix, message));
    }

    pub fn warn(
        &self,
        message: &str,
    ) {
        if !self.inner.enabled {
            return;
        }

        let _ = self
            .inner
            .multi
            .println(format_line(colors::warning(), prefixes::WARNING, message));
    }

    /// Complete with custom message
    pub fn complete(
        &self,
        message: impl AsRef<str>,
    ) {
        if !self.inner.enabled {
            return;
        }

        let secs = self.elapsed().as_secs_f64();

        let _ = self.inner.multi.println(format_line(
            colors::success(),
            prefixes::PUBLISHED,
            &format!("{} in {secs:.3} seconds", message.as_ref()),
        ));
    }

    pub fn elapsed(&self) -> Duration {
        self.inner.start_time.elapsed()
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::disabled()
    }
}
