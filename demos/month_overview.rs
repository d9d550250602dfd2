//! This is an example of how completion-calendar can be used.
//! It fills an in-memory store with a few entries, and prints the current month with its starred days.

use chrono::{Duration, Local};

use completion_calendar::traits::EntryStore;
use completion_calendar::store::events::StoreEvent;
use completion_calendar::view::MonthView;
use completion_calendar::{CalendarEntry, EntryChange, RecordKinds, Store, Title};

fn main() {
    env_logger::init();

    let mut store = Store::in_memory();
    store.subscribe(RecordKinds::all(), Box::new(|event: &StoreEvent| log::info!("Store changed: {}", event)));

    let now = Local::now();
    for (offset, titles) in [(-2, vec!["Homework", "Piano"]), (0, vec!["Laundry"]), (1, vec!["Run", "Stretch"])].iter() {
        for title in titles {
            let title = match Title::new(*title) {
                Ok(title) => title,
                Err(err) => {
                    log::error!("Skipping an entry: {}", err);
                    continue;
                }
            };
            let entry = CalendarEntry::new(title, now + Duration::days(*offset));
            let id = *entry.id();
            if let Err(err) = store.insert(entry.into()) {
                log::error!("Unable to add an entry: {}", err);
                continue;
            }
            // Everything but tomorrow is done
            if *offset <= 0 {
                if let Err(err) = store.update_entry(&id, EntryChange::SetCompleted(true)) {
                    log::error!("Unable to complete an entry: {}", err);
                }
            }
        }
    }

    let today = now.date_naive();
    let mut view = MonthView::with_config(today);
    completion_calendar::utils::print_month(&view.snapshot(store.entries(), today));

    view.select_day(today);
    println!("Today:");
    for entry in view.day_entries(store.entries()) {
        completion_calendar::utils::print_entry(entry);
    }
}
