pub mod aggregator;
pub mod detector;
pub mod panel;
pub mod types;

pub use aggregator::{group_by_date, sorted_dates, TransitsByDate};
pub use detector::{Alert, NearExactDetector, ALERT_TITLE, DEFAULT_NEAR_EXACT_ORB};
pub use panel::{DateCard, TransitEntry, TransitsPanel, NO_EVENTS_MESSAGE, UNAVAILABLE_MESSAGE};
pub use types::{TransitEvent, TransitQuery, TransitReport};
