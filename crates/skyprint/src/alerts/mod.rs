//! Near-exact transit alerts.
//!
//! After the user opts in, an [`AlertTask`] rescans the rendered transits
//! panel once per period and hands every qualifying entry to a [`Notifier`].

use crate::transits::{Alert, NearExactDetector, TransitsPanel};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Outcome of asking the user for notification rights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    Unsupported,
}

/// Reasons opting into alerts can fail. Display text is shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptInError {
    #[error("Notifications not supported in this browser.")]
    Unsupported,
    #[error("Notifications disabled.")]
    Denied,
}

/// Local notification surface
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn request_permission(&self) -> Permission;

    fn notify(&self, alert: &Alert);
}

/// Source of "today" for matching transit dates
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the machine
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Fixed date, for replaying a day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Handle to the running periodic scan. Aborted on drop.
pub struct AlertTask {
    handle: JoinHandle<()>,
}

impl AlertTask {
    /// Start scanning. The first scan happens one full `period` after start.
    pub fn spawn(
        mut panel: watch::Receiver<TransitsPanel>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        detector: NearExactDetector,
        period: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let today = clock.today();
                let alerts = detector.scan(&panel.borrow_and_update(), today);
                log::debug!("AlertTask: scan for {} found {} near-exact transits", today, alerts.len());
                for alert in &alerts {
                    log::info!("AlertTask: {}: {}", alert.title, alert.body);
                    notifier.notify(alert);
                }
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for AlertTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
