//! Debug printers and small helpers

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::entry::CalendarEntry;
use crate::template::EventTemplate;
use crate::view::MonthSnapshot;

/// A debug utility that pretty-prints a month snapshot as a grid, one week per line.
///
/// `★` marks days whose entries are all completed, `·` days that still have something to do
pub fn print_month(snapshot: &MonthSnapshot) {
    println!("{:04}-{:02} ({} star days)", snapshot.year(), snapshot.month(), snapshot.star_days());
    for week in snapshot.cells().chunks(crate::grid::DAYS_PER_WEEK) {
        let line: Vec<String> = week.iter()
            .map(|cell| {
                let marker = if cell.is_starred() {
                    "★"
                } else if cell.summary().is_empty() {
                    " "
                } else {
                    "·"
                };
                let day = cell.slot().day_of_month();
                if cell.slot().in_month() {
                    format!("{:>3}{}", day, marker)
                } else {
                    format!("({:>2}){}", day, marker)
                }
            })
            .collect();
        println!("  {}", line.join(" "));
    }
}

pub fn print_entry(entry: &CalendarEntry) {
    let completion = if entry.completed() { "✓" } else { " " };
    println!("    {} {}\t{}", completion, entry.title(), entry.id());
}

pub fn print_template(template: &EventTemplate) {
    let last_used = match template.last_used_at() {
        None => String::from("never used"),
        Some(at) => format!("last used {}", at.format("%Y-%m-%d %H:%M")),
    };
    println!("    {} {}\tx{} ({})", template.emoji(), template.title(), template.usage_count(), last_used);
}


/// Whether two maps have exactly the same keys, regardless of their values
pub fn same_keys<K, U, V>(left: &HashMap<K, U>, right: &HashMap<K, V>) -> bool
where
    K: Hash + Eq + Display,
{
    let missing: Vec<&K> = left.keys().filter(|key| right.contains_key(*key) == false).collect();
    let extra: Vec<&K> = right.keys().filter(|key| left.contains_key(*key) == false).collect();
    if missing.is_empty() && extra.is_empty() {
        return true;
    }

    log::debug!("Key mismatch: {} only on the left, {} only on the right", missing.len(), extra.len());
    for key in missing.iter().chain(extra.iter()) {
        log::debug!("   {}", key);
    }
    false
}
