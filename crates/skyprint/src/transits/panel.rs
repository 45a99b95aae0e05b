use crate::transits::aggregator::TransitsByDate;
use crate::transits::types::{TransitEvent, TransitReport};
use chrono::NaiveDate;

pub const NO_EVENTS_MESSAGE: &str = "No major hits in the next 7 days (tight orbs).";
pub const UNAVAILABLE_MESSAGE: &str = "Transits need Swiss Ephemeris files on the server.";

/// One rendered line of the transits panel
#[derive(Debug, Clone, PartialEq)]
pub struct TransitEntry {
    pub event: TransitEvent,
    pub text: String,
}

/// A dated card holding that day's entries
#[derive(Debug, Clone, PartialEq)]
pub struct DateCard {
    pub date: NaiveDate,
    pub entries: Vec<TransitEntry>,
}

impl DateCard {
    pub fn heading(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// What the transits panel currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TransitsPanel {
    /// Nothing rendered yet
    #[default]
    Blank,
    /// Request succeeded with no events
    Empty,
    /// Cards in ascending date order
    Grouped(Vec<DateCard>),
    /// Request failed; the rest of the page is unaffected
    Unavailable,
}

impl TransitsPanel {
    pub fn from_report(report: &TransitReport) -> Self {
        Self::from_grouped(&TransitsByDate::group(&report.events))
    }

    pub fn from_grouped(grouped: &TransitsByDate) -> Self {
        if grouped.is_empty() {
            return TransitsPanel::Empty;
        }
        let cards = grouped
            .iter()
            .map(|(date, events)| DateCard {
                date,
                entries: events
                    .iter()
                    .map(|ev| TransitEntry {
                        text: ev.describe(),
                        event: ev.clone(),
                    })
                    .collect(),
            })
            .collect();
        TransitsPanel::Grouped(cards)
    }

    /// Inline message for the non-card states
    pub fn message(&self) -> Option<&'static str> {
        match self {
            TransitsPanel::Empty => Some(NO_EVENTS_MESSAGE),
            TransitsPanel::Unavailable => Some(UNAVAILABLE_MESSAGE),
            _ => None,
        }
    }

    pub fn cards(&self) -> &[DateCard] {
        match self {
            TransitsPanel::Grouped(cards) => cards,
            _ => &[],
        }
    }

    /// Plain-text rendering: the message, or one heading per card followed by its entries.
    pub fn render_text(&self) -> String {
        if let Some(msg) = self.message() {
            return msg.to_string();
        }
        let mut out = String::new();
        for card in self.cards() {
            out.push_str(&card.heading());
            out.push('\n');
            for entry in &card.entries {
                out.push_str("  - ");
                out.push_str(&entry.text);
                out.push('\n');
            }
        }
        out
    }
}
