//! A month view controller, that a UI shell drives and renders
//!
//! The view only holds navigation state (the displayed month and the selected day).
//! Everything it displays is derived from the records it is given, every time it is asked to. Nothing is cached,
//! so a UI shell simply asks for a new snapshot whenever the store notifies a change.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::bucket::{self, DaySummary};
use crate::entry::CalendarEntry;
use crate::error::ValidationError;
use crate::grid::{self, MonthGrid, Slot};
use crate::record::Title;

/// How many entries are shown as completion dots on a day that is not starred
pub const MAX_INDICATORS: usize = 3;

/// Everything needed to render one day of the grid
#[derive(Clone, Debug, PartialEq)]
pub struct DayCell {
    slot: Slot,
    summary: DaySummary,
    is_today: bool,
    indicators: Vec<bool>,
}

impl DayCell {
    pub fn slot(&self) -> &Slot { &self.slot }
    pub fn date(&self) -> NaiveDate { self.slot.date() }
    pub fn summary(&self) -> &DaySummary { &self.summary }
    pub fn is_today(&self) -> bool { self.is_today }
    pub fn is_sunday(&self) -> bool { self.slot.weekday() == Weekday::Sun }
    pub fn is_saturday(&self) -> bool { self.slot.weekday() == Weekday::Sat }

    /// Whether this day gets a star, i.e. has entries that are all completed
    pub fn is_starred(&self) -> bool {
        self.summary.all_completed()
    }

    /// Completion status of the first few entries of the day (oldest first).
    /// Starred days show a star instead, and have no indicators
    pub fn indicators(&self) -> &[bool] { &self.indicators }
}


/// A render-ready month
#[derive(Clone, Debug, PartialEq)]
pub struct MonthSnapshot {
    year: i32,
    month: u32,
    weekdays: [Weekday; grid::DAYS_PER_WEEK],
    cells: Vec<DayCell>,
    star_days: usize,
}

impl MonthSnapshot {
    pub fn year(&self) -> i32 { self.year }
    pub fn month(&self) -> u32 { self.month }
    /// The column headers
    pub fn weekdays(&self) -> &[Weekday; grid::DAYS_PER_WEEK] { &self.weekdays }
    pub fn cells(&self) -> &[DayCell] { &self.cells }
    /// How many displayed days are starred
    pub fn star_days(&self) -> usize { self.star_days }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date() == date)
    }
}


/// The navigation state of a calendar screen
#[derive(Clone, Debug, PartialEq)]
pub struct MonthView {
    displayed: NaiveDate,
    first_weekday: Weekday,
    selected_day: Option<NaiveDate>,
}

impl MonthView {
    /// A view that displays the month of `today`
    pub fn new(today: NaiveDate, first_weekday: Weekday) -> Self {
        Self { displayed: today, first_weekday, selected_day: None }
    }

    /// A view that displays the month of `today`, with weeks starting on the configured [`FIRST_WEEKDAY`](crate::config::FIRST_WEEKDAY)
    pub fn with_config(today: NaiveDate) -> Self {
        Self::new(today, crate::config::first_weekday())
    }

    /// Any day of the displayed month
    pub fn displayed_month(&self) -> NaiveDate { self.displayed }
    pub fn first_weekday(&self) -> Weekday { self.first_weekday }
    pub fn selected_day(&self) -> Option<NaiveDate> { self.selected_day }

    pub fn previous_month(&mut self) {
        self.displayed = grid::previous_month(self.displayed);
    }

    pub fn next_month(&mut self) {
        self.displayed = grid::next_month(self.displayed);
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.displayed = today;
    }

    /// Open the entry list of a day
    pub fn select_day(&mut self, day: NaiveDate) {
        self.selected_day = Some(day);
    }

    pub fn close_day(&mut self) {
        self.selected_day = None;
    }

    pub fn grid(&self) -> MonthGrid {
        grid::month_grid(self.displayed, self.first_weekday)
    }

    /// Derive the displayed month from the given entries
    pub fn snapshot<'a, I>(&self, entries: I, today: NaiveDate) -> MonthSnapshot
    where
        I: IntoIterator<Item = &'a CalendarEntry>,
    {
        let grid = self.grid();
        let groups = bucket::group_by_day(entries);

        let cells: Vec<DayCell> = grid.slots().iter()
            .map(|slot| {
                let day_entries: &[&CalendarEntry] = groups.get(&slot.date()).map(|b| b.as_slice()).unwrap_or(&[]);
                let summary = bucket::summarize(day_entries);
                let indicators = if summary.all_completed() {
                    Vec::new()
                } else {
                    day_entries.iter().take(MAX_INDICATORS).map(|entry| entry.completed()).collect()
                };
                DayCell {
                    slot: *slot,
                    summary,
                    is_today: slot.date() == today,
                    indicators,
                }
            })
            .collect();
        let star_days = cells.iter().filter(|cell| cell.is_starred()).count();

        MonthSnapshot {
            year: grid.year(),
            month: grid.month(),
            weekdays: grid::weekday_header(self.first_weekday),
            cells,
            star_days,
        }
    }

    /// The entries of the selected day (oldest first), or nothing if no day is selected.
    ///
    /// This is always computed from the given entries, so that it reflects changes made since the day has been selected
    pub fn day_entries<'a, I>(&self, entries: I) -> Vec<&'a CalendarEntry>
    where
        I: IntoIterator<Item = &'a CalendarEntry>,
    {
        match self.selected_day {
            None => Vec::new(),
            Some(day) => bucket::entries_for_day(entries, day),
        }
    }

    /// Whether the displayed month is the month of `day`
    pub fn displays_month_of(&self, day: NaiveDate) -> bool {
        self.displayed.year() == day.year() && self.displayed.month() == day.month()
    }
}


/// The text field of an "add" or "edit" form.
///
/// The confirming action should be disabled as long as [`can_submit`](DayDraft::can_submit) is false
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayDraft {
    title: String,
}

impl DayDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft to edit an existing title
    pub fn editing(title: &Title) -> Self {
        Self { title: title.as_str().to_string() }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = title.into();
    }

    pub fn can_submit(&self) -> bool {
        Title::new(self.title.as_str()).is_ok()
    }

    pub fn into_title(self) -> Result<Title, ValidationError> {
        Title::new(self.title)
    }
}
