use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A transiting body forming an aspect to a natal body on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitEvent {
    /// Transiting body, e.g. "Mars"
    pub transit: String,
    /// Aspect type, e.g. "square"
    pub aspect: String,
    /// Natal body being aspected
    pub natal: String,
    /// Distance from the exact aspect in degrees
    pub orb: f64,
    pub date: NaiveDate,
}

impl TransitEvent {
    /// Display line, e.g. "Mars square natal Sun (orb 0.4°)"
    pub fn describe(&self) -> String {
        format!(
            "{} {} natal {} (orb {}°)",
            self.transit, self.aspect, self.natal, self.orb
        )
    }
}

/// Response body of the transits endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitReport {
    #[serde(default)]
    pub events: Vec<TransitEvent>,
}

/// Parameters of a transits request
#[derive(Debug, Clone, PartialEq)]
pub struct TransitQuery {
    /// First day of the window
    pub date: NaiveDate,
    pub days: u32,
    pub tz: String,
    /// Natal body -> longitude
    pub natal: BTreeMap<String, f64>,
}

impl TransitQuery {
    /// Query-string pairs in endpoint order: date, days, tz, natal_json.
    pub fn to_query_pairs(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        Ok(vec![
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("days", self.days.to_string()),
            ("tz", self.tz.clone()),
            ("natal_json", serde_json::to_string(&self.natal)?),
        ])
    }
}
