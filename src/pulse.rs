//! # Grid Opacity Pulse
//!
//! A recurring cosmetic task: every interval the weather grid dims briefly and
//! comes back. It never touches the network and the fetch pipeline never waits
//! on it. Opacity values are published on a `watch` channel; whoever owns the
//! grid applies them.

use crate::config::DisplayConfig;
use std::time::Duration;
use tokio::{sync::watch, task::JoinHandle, time};

pub const FULL_OPACITY: f32 = 1.0;
pub const DIMMED_OPACITY: f32 = 0.8;

#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    interval: Duration,
    dim_for: Duration,
}

impl Pulse {
    /// A zero interval is bumped to one millisecond.
    pub fn new(interval: Duration, dim_for: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            dim_for,
        }
    }

    pub fn from_config(display: &DisplayConfig) -> Self {
        Self::new(
            Duration::from_secs(display.pulse_interval_secs),
            Duration::from_millis(display.pulse_dim_ms),
        )
    }

    /// Spawn the pulse task on the current tokio runtime.
    ///
    /// The task ends once every receiver has been dropped.
    pub fn spawn(self) -> (JoinHandle<()>, watch::Receiver<f32>) {
        let (tx, rx) = watch::channel(FULL_OPACITY);
        let handle = tokio::spawn(async move {
            // First tick fires one full interval after start
            let mut ticker = time::interval_at(time::Instant::now() + self.interval, self.interval);
            loop {
                ticker.tick().await;
                if tx.send(DIMMED_OPACITY).is_err() {
                    break;
                }
                time::sleep(self.dim_for).await;
                if tx.send(FULL_OPACITY).is_err() {
                    break;
                }
            }
        });
        (handle, rx)
    }
}
