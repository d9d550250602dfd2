//! Month grids: the 6 weeks of days displayed for a month
//!
//! A grid always holds [`GRID_SIZE`] consecutive days. It starts on the first day of the week that contains the first day of the month,
//! so that it usually shows a few days of the previous month before the displayed month, and rolls into the next month after it.
//! Every slot holds a concrete date. Slots outside of the displayed month are only tagged as such (so that they can be dimmed).

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS_PER_GRID: usize = 6;
/// The number of slots in a month grid
pub const GRID_SIZE: usize = DAYS_PER_WEEK * WEEKS_PER_GRID;

/// A position of a month grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    date: NaiveDate,
    in_month: bool,
}

impl Slot {
    pub fn date(&self) -> NaiveDate  { self.date     }
    /// Whether this slot belongs to the displayed month
    pub fn in_month(&self) -> bool   { self.in_month }
    pub fn day_of_month(&self) -> u32 { self.date.day() }
    pub fn weekday(&self) -> Weekday { self.date.weekday() }
}


/// The [`GRID_SIZE`] days to display for a given month
#[derive(Clone, Debug, PartialEq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    first_weekday: Weekday,
    slots: Vec<Slot>,
}

impl MonthGrid {
    /// Year of the displayed month
    pub fn year(&self) -> i32 { self.year }
    /// The displayed month (1 to 12)
    pub fn month(&self) -> u32 { self.month }
    pub fn first_weekday(&self) -> Weekday { self.first_weekday }
    pub fn slots(&self) -> &[Slot] { &self.slots }

    pub fn first_date(&self) -> NaiveDate {
        self.slots[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.slots[GRID_SIZE - 1].date
    }

    /// Every day of the displayed month, in order
    pub fn in_month_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.slots.iter().filter(|slot| slot.in_month).map(|slot| slot.date)
    }

    /// The grid, one row per week
    pub fn weeks(&self) -> std::slice::Chunks<'_, Slot> {
        self.slots.chunks(DAYS_PER_WEEK)
    }

    /// Whether `date` is displayed in this grid (including out-of-month slots)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_date() <= date && date <= self.last_date()
    }
}


/// Build the grid that displays the month `reference` belongs to, with weeks starting on `first_weekday`.
///
/// The few months at the edges of the supported date range whose grid would run past [`NaiveDate::MIN`] or
/// [`NaiveDate::MAX`] are displayed as the closest month whose grid fits instead.
pub fn month_grid(reference: NaiveDate, first_weekday: Weekday) -> MonthGrid {
    let mut reference = reference;
    let start = loop {
        if let Some(start) = grid_start(reference, first_weekday) {
            break start;
        }
        let closest = if reference.year() > 0 { previous_month(reference) } else { next_month(reference) };
        log::debug!("The grid of {} does not fit in the supported dates, displaying {} instead", reference, closest);
        reference = closest;
    };

    let slots = start.iter_days()
        .take(GRID_SIZE)
        .map(|date| Slot { date, in_month: is_same_month(date, reference) })
        .collect();

    MonthGrid {
        year: reference.year(),
        month: reference.month(),
        first_weekday,
        slots,
    }
}

/// The first date of the grid of `reference`, if every date of this grid can be represented
fn grid_start(reference: NaiveDate, first_weekday: Weekday) -> Option<NaiveDate> {
    let start = week_start(first_day_of_month(reference), first_weekday)?;
    start.checked_add_signed(Duration::days(GRID_SIZE as i64 - 1))?;
    Some(start)
}

/// Same as [`month_grid`], using the configured [`FIRST_WEEKDAY`](crate::config::FIRST_WEEKDAY)
pub fn month_grid_with_config(reference: NaiveDate) -> MonthGrid {
    month_grid(reference, crate::config::first_weekday())
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

/// The first day (according to `first_weekday`) of the week `date` belongs to.
/// Returns `None` if this day is before [`NaiveDate::MIN`]
pub fn week_start(date: NaiveDate, first_weekday: Weekday) -> Option<NaiveDate> {
    let offset = (DAYS_PER_WEEK as u32 + date.weekday().num_days_from_sunday() - first_weekday.num_days_from_sunday())
        % DAYS_PER_WEEK as u32;
    date.checked_sub_signed(Duration::days(offset as i64))
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// The weekdays of the grid columns, from left to right
pub fn weekday_header(first_weekday: Weekday) -> [Weekday; DAYS_PER_WEEK] {
    let mut header = [first_weekday; DAYS_PER_WEEK];
    for i in 1..DAYS_PER_WEEK {
        header[i] = header[i - 1].succ();
    }
    header
}

/// The same day one month earlier. Days that do not exist in the previous month are clamped to its last day.
pub fn previous_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or_else(|| {
        log::debug!("No month before {}", date);
        date
    })
}

/// The same day one month later. Days that do not exist in the next month are clamped to its last day (e.g. Jan 31 → Feb 28).
pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or_else(|| {
        log::debug!("No month after {}", date);
        date
    })
}
