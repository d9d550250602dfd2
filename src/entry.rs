//! Calendar entries: the to-do items that belong to a single day

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{EntryId, Title};

/// A to-do item, owned by exactly one calendar day
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalendarEntry {
    /// The entry identifier
    id: EntryId,

    /// The display name of the entry
    title: Title,

    /// The day this entry belongs to.
    /// Only the (local) day matters, the time of day is ignored when grouping entries by day
    date: DateTime<Local>,

    /// Free text, may be empty
    notes: String,

    /// Whether this entry has been done
    completed: bool,

    /// The time this entry was created.
    /// Entries of a single day are listed in this order
    created_at: DateTime<Utc>,
}

impl CalendarEntry {
    /// Create a brand new entry for the given day, that is not completed yet.
    /// This will pick a new (random) entry ID.
    pub fn new(title: Title, date: DateTime<Local>) -> Self {
        Self::new_with_parameters(EntryId::random(), title, date, String::new(), false, Utc::now())
    }

    /// Create a new CalendarEntry instance, e.g. to restore an existing one
    pub fn new_with_parameters(id: EntryId, title: Title, date: DateTime<Local>,
                               notes: String, completed: bool, created_at: DateTime<Utc>,
                            ) -> Self
    {
        Self { id, title, date, notes, completed, created_at }
    }

    pub fn id(&self) -> &EntryId                { &self.id          }
    pub fn title(&self) -> &Title               { &self.title       }
    pub fn date(&self) -> &DateTime<Local>      { &self.date        }
    pub fn notes(&self) -> &str                 { &self.notes       }
    pub fn completed(&self) -> bool             { self.completed    }
    pub fn created_at(&self) -> &DateTime<Utc>  { &self.created_at  }

    /// The local calendar day this entry belongs to
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Whether this entry belongs to the given day
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.day() == day
    }

    /// Compares every field, unlike `==` which only compares ids
    pub fn has_same_contents_as(&self, other: &CalendarEntry) -> bool {
           self.id == other.id
        && self.title == other.title
        && self.date == other.date
        && self.notes == other.notes
        && self.completed == other.completed
        && self.created_at == other.created_at
    }

    pub fn set_title(&mut self, new_title: Title) {
        self.title = new_title;
    }

    pub fn set_notes(&mut self, new_notes: String) {
        self.notes = new_notes;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}

impl PartialEq for CalendarEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for CalendarEntry {}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 30, 0).unwrap();
        Local.from_local_datetime(&naive).single().unwrap()
    }

    #[test]
    fn new_entries_are_not_completed() {
        let entry = CalendarEntry::new(Title::new("Read a book").unwrap(), local(2025, 3, 5, 9));
        assert!(entry.completed() == false);
        assert!(entry.notes().is_empty());
        assert_eq!(entry.day(), NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
    }

    #[test]
    fn time_of_day_is_ignored() {
        let morning = CalendarEntry::new(Title::new("Jog").unwrap(), local(2025, 3, 5, 0));
        let evening = CalendarEntry::new(Title::new("Stretch").unwrap(), local(2025, 3, 5, 23));
        assert_eq!(morning.day(), evening.day());
        assert!(evening.is_on(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()));
        assert!(evening.is_on(NaiveDate::from_ymd_opt(2025, 3, 6).unwrap()) == false);
    }

    #[test]
    fn equality_is_based_on_ids() {
        let mut entry = CalendarEntry::new(Title::new("Laundry").unwrap(), local(2025, 3, 5, 9));
        let original = entry.clone();

        entry.toggle_completed();
        entry.set_title(Title::new("Laundry (whites)").unwrap());
        assert_eq!(entry, original);
        assert!(entry.has_same_contents_as(&original) == false);

        entry.toggle_completed();
        assert!(entry.completed() == false);
    }

    #[test]
    fn serde_entry() {
        let entry = CalendarEntry::new(Title::new("Dentist").unwrap(), local(2024, 2, 29, 14));
        let json = serde_json::to_string(&entry).unwrap();
        let retrieved: CalendarEntry = serde_json::from_str(&json).unwrap();
        assert!(entry.has_same_contents_as(&retrieved));
        assert_eq!(retrieved.day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
