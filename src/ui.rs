//! # Notification and Overlay Surfaces
//!
//! [`Toast`] is the page-wide notification surface: four severity-tagged
//! one-liners that expire after a configured duration. [`LoadingOverlay`] is
//! the blocking overlay shown while the weather widget is fetching.
//!
//! Both are plain values owned by the application bootstrap and handed to the
//! pipeline. The pipeline only sees toasts through the [`Notifier`] trait.

use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Anything that can surface a one-line message to the user.
pub trait Notifier {
    fn notify(&mut self, severity: Severity, message: &str);

    fn success(&mut self, message: &str) {
        self.notify(Severity::Success, message);
    }

    fn info(&mut self, message: &str) {
        self.notify(Severity::Info, message);
    }

    fn warning(&mut self, message: &str) {
        self.notify(Severity::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(Severity::Error, message);
    }
}

/// A single toast and the instant it was raised.
#[derive(Debug, Clone)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub raised_at: Instant,
}

/// Auto-dismissing notification list.
#[derive(Debug, Clone)]
pub struct Toast {
    duration: Duration,
    shown: Vec<Notification>,
}

impl Toast {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            shown: Vec::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Notifications still visible at `now`. Expired ones are dropped.
    pub fn active_at(&mut self, now: Instant) -> &[Notification] {
        let duration = self.duration;
        self.shown
            .retain(|n| now.saturating_duration_since(n.raised_at) < duration);
        &self.shown
    }

    /// Notifications still visible right now.
    pub fn active(&mut self) -> &[Notification] {
        self.active_at(Instant::now())
    }
}

impl Notifier for Toast {
    fn notify(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Success | Severity::Info => info!(toast = ?severity, "{}", message),
            Severity::Warning => warn!(toast = ?severity, "{}", message),
            Severity::Error => error!(toast = ?severity, "{}", message),
        }
        self.shown.push(Notification {
            severity,
            message: message.to_string(),
            raised_at: Instant::now(),
        });
    }
}

/// Blocking "loading" overlay. Showing or hiding twice is harmless.
#[derive(Debug, Default, Clone)]
pub struct LoadingOverlay {
    message: Option<String>,
}

impl LoadingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the overlay, or update its message if already shown.
    pub fn show(&mut self, message: &str) {
        if self.message.as_deref() != Some(message) {
            debug!(overlay = message, "loading overlay shown");
            self.message = Some(message.to_string());
        }
    }

    pub fn hide(&mut self) {
        if self.message.take().is_some() {
            debug!("loading overlay hidden");
        }
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
