//! Grouping entries by day, and summarizing how much of a day has been done
//!
//! Entries are compared at the (local) day granularity: the time of day of their date is ignored.
//! Within a day, entries are listed by creation time, oldest first.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::entry::CalendarEntry;

/// How many entries a day has, and how many of them are completed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DaySummary {
    total: usize,
    completed: usize,
}

impl DaySummary {
    pub fn total_count(&self) -> usize { self.total }
    pub fn completed_count(&self) -> usize { self.completed }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Whether this day deserves a star: it has entries, and every one of them is completed.
    ///
    /// An empty day is never "all completed"
    pub fn all_completed(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}


/// The order entries are listed in, within a single day
pub fn creation_order(a: &CalendarEntry, b: &CalendarEntry) -> Ordering {
    a.created_at().cmp(b.created_at())
        .then_with(|| a.id().cmp(b.id()))
}

/// The entries of a given day, oldest first
pub fn entries_for_day<'a, I>(entries: I, day: NaiveDate) -> Vec<&'a CalendarEntry>
where
    I: IntoIterator<Item = &'a CalendarEntry>,
{
    let mut bucket: Vec<&CalendarEntry> = entries.into_iter()
        .filter(|entry| entry.is_on(day))
        .collect();
    bucket.sort_by(|a, b| creation_order(a, b));
    bucket
}

pub fn summarize(bucket: &[&CalendarEntry]) -> DaySummary {
    DaySummary {
        total: bucket.len(),
        completed: bucket.iter().filter(|entry| entry.completed()).count(),
    }
}

pub fn summary_for_day<'a, I>(entries: I, day: NaiveDate) -> DaySummary
where
    I: IntoIterator<Item = &'a CalendarEntry>,
{
    summarize(&entries_for_day(entries, day))
}

/// Every entry, grouped by day. Each group is sorted oldest first
pub fn group_by_day<'a, I>(entries: I) -> HashMap<NaiveDate, Vec<&'a CalendarEntry>>
where
    I: IntoIterator<Item = &'a CalendarEntry>,
{
    let mut groups = entries.into_iter().into_group_map_by(|entry| entry.day());
    for bucket in groups.values_mut() {
        bucket.sort_by(|a, b| creation_order(a, b));
    }
    groups
}

/// The days (among `days`) whose entries are all completed
pub fn star_days<'a, I, D>(entries: I, days: D) -> Vec<NaiveDate>
where
    I: IntoIterator<Item = &'a CalendarEntry>,
    D: IntoIterator<Item = NaiveDate>,
{
    let groups = group_by_day(entries);
    days.into_iter()
        .filter(|day| {
            groups.get(day)
                .map(|bucket| summarize(bucket).all_completed())
                .unwrap_or(false)
        })
        .collect()
}

/// The number of days (among `days`) whose entries are all completed
pub fn star_day_count<'a, I, D>(entries: I, days: D) -> usize
where
    I: IntoIterator<Item = &'a CalendarEntry>,
    D: IntoIterator<Item = NaiveDate>,
{
    star_days(entries, days).len()
}


#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Duration, Local, TimeZone, Utc};

    use crate::record::{EntryId, Title};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// An entry on a given day and hour, created `created_offset` seconds after a fixed instant
    fn entry(day: NaiveDate, hour: u32, completed: bool, created_offset: i64) -> CalendarEntry {
        let date: DateTime<Local> = Local.from_local_datetime(&day.and_hms_opt(hour, 0, 0).unwrap()).single().unwrap();
        let created_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(created_offset);
        CalendarEntry::new_with_parameters(EntryId::random(), Title::new(format!("entry {}", created_offset)).unwrap(),
                                           date, String::new(), completed, created_at)
    }

    #[test]
    fn partially_completed_day() {
        let entries = vec![
            entry(ymd(2025, 3, 5), 9, true, 0),
            entry(ymd(2025, 3, 5), 18, false, 1),
        ];

        let summary = summary_for_day(&entries, ymd(2025, 3, 5));
        assert!(summary.all_completed() == false);
        assert!(summary.is_empty() == false);
        assert_eq!(summary.completed_count(), 1);
        assert_eq!(summary.total_count(), 2);

        let empty = summary_for_day(&entries, ymd(2025, 3, 6));
        assert!(empty.all_completed() == false);
        assert!(empty.is_empty());
    }

    #[test]
    fn fully_completed_day() {
        let entries = vec![
            entry(ymd(2025, 3, 5), 9, true, 0),
            entry(ymd(2025, 3, 5), 18, true, 1),
        ];
        let summary = summary_for_day(&entries, ymd(2025, 3, 5));
        assert!(summary.all_completed());
        assert_eq!(summary, DaySummary { total: 2, completed: 2 });
        assert!(DaySummary::default().all_completed() == false);
    }

    #[test]
    fn buckets_only_hold_the_requested_day_in_creation_order() {
        let entries = vec![
            entry(ymd(2025, 3, 5), 23, false, 30),
            entry(ymd(2025, 3, 4), 23, false, 5),
            entry(ymd(2025, 3, 5), 0, false, 10),
            entry(ymd(2025, 3, 6), 0, false, 1),
            entry(ymd(2025, 3, 5), 12, false, 20),
        ];

        let bucket = entries_for_day(&entries, ymd(2025, 3, 5));
        assert_eq!(bucket.len(), 3);
        assert!(bucket.iter().all(|e| e.day() == ymd(2025, 3, 5)));
        let titles: Vec<&str> = bucket.iter().map(|e| e.title().as_str()).collect();
        assert_eq!(titles, vec!["entry 10", "entry 20", "entry 30"]);
    }

    #[test]
    fn grouping_by_day() {
        let entries = vec![
            entry(ymd(2025, 3, 5), 9, true, 2),
            entry(ymd(2025, 3, 5), 10, false, 1),
            entry(ymd(2025, 3, 7), 10, true, 3),
        ];
        let groups = group_by_day(&entries);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&ymd(2025, 3, 5)].len(), 2);
        assert_eq!(groups[&ymd(2025, 3, 5)][0].title().as_str(), "entry 1");
        assert_eq!(groups[&ymd(2025, 3, 7)].len(), 1);
    }

    #[test]
    fn counting_star_days() {
        let entries = vec![
            // 3 entries, all done
            entry(ymd(2025, 3, 1), 9, true, 0),
            entry(ymd(2025, 3, 1), 10, true, 1),
            entry(ymd(2025, 3, 1), 11, true, 2),
            // one left to do
            entry(ymd(2025, 3, 2), 9, true, 3),
            entry(ymd(2025, 3, 2), 10, false, 4),
            // all done
            entry(ymd(2025, 3, 3), 9, true, 5),
            // all done, but outside of the counted range
            entry(ymd(2025, 4, 1), 9, true, 6),
        ];

        let march = (1..=31).map(|d| ymd(2025, 3, d));
        assert_eq!(star_days(&entries, march.clone()), vec![ymd(2025, 3, 1), ymd(2025, 3, 3)]);
        assert_eq!(star_day_count(&entries, march), 2);
        assert_eq!(star_day_count(&entries, Vec::new()), 0);
    }
}
