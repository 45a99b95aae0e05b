use crate::transits::panel::TransitsPanel;
use chrono::NaiveDate;

pub const ALERT_TITLE: &str = "Transit exact-ish today";

/// Orb below which a transit counts as near-exact
pub const DEFAULT_NEAR_EXACT_ORB: f64 = 1.0;

/// Notification raised for a near-exact transit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub body: String,
}

/// Flags rendered transit entries that are dated today and tighter than the threshold.
#[derive(Debug, Clone, Copy)]
pub struct NearExactDetector {
    threshold: f64,
}

impl NearExactDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// One alert per qualifying entry. Repeated scans re-alert; there is no dedup.
    pub fn scan(&self, panel: &TransitsPanel, today: NaiveDate) -> Vec<Alert> {
        panel
            .cards()
            .iter()
            .filter(|card| card.date == today)
            .flat_map(|card| card.entries.iter())
            .filter(|entry| entry.event.orb < self.threshold)
            .map(|entry| Alert {
                title: ALERT_TITLE.to_string(),
                body: entry.text.clone(),
            })
            .collect()
    }
}

impl Default for NearExactDetector {
    fn default() -> Self {
        Self::new(DEFAULT_NEAR_EXACT_ORB)
    }
}
