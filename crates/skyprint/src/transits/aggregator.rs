use crate::transits::types::TransitEvent;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Transit events bucketed by calendar day.
///
/// Within a bucket events keep their input order; buckets iterate in
/// chronological order since keys are real dates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitsByDate {
    buckets: BTreeMap<NaiveDate, Vec<TransitEvent>>,
}

impl TransitsByDate {
    /// Single pass over `events`, creating a bucket on first sight of a date.
    pub fn group<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a TransitEvent>,
    {
        let mut buckets: BTreeMap<NaiveDate, Vec<TransitEvent>> = BTreeMap::new();
        for event in events {
            buckets.entry(event.date).or_default().push(event.clone());
        }
        Self { buckets }
    }

    /// Dates in ascending chronological order
    pub fn sorted_dates(&self) -> Vec<NaiveDate> {
        self.buckets.keys().copied().collect()
    }

    pub fn events_on(&self, date: NaiveDate) -> &[TransitEvent] {
        self.buckets.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[TransitEvent])> {
        self.buckets.iter().map(|(d, evs)| (*d, evs.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of distinct dates
    pub fn len(&self) -> usize {
        self.buckets.len()
    }
}

pub fn group_by_date(events: &[TransitEvent]) -> TransitsByDate {
    TransitsByDate::group(events)
}

pub fn sorted_dates(grouped: &TransitsByDate) -> Vec<NaiveDate> {
    grouped.sorted_dates()
}
