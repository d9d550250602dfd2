//! This is an example of how templates can be used.
//! It opens (or creates) a store file, makes sure a few templates exist, and applies one of them to today.
//!
//! The store file is given as the first argument (defaults to `example_store.json`)

use std::path::PathBuf;

use chrono::Local;

use completion_calendar::apply::apply_template;
use completion_calendar::traits::EntryStore;
use completion_calendar::{EventTemplate, Store, Title};

const STORE_FILE: &str = "example_store.json";

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(STORE_FILE));
    let mut store = match Store::open(&path) {
        Ok(store) => store,
        Err(err) => {
            log::error!("Unable to open the store: {}", err);
            std::process::exit(1);
        }
    };

    if store.templates().is_empty() {
        for (title, emoji) in [("Homework", "📚"), ("Piano", "🎵"), ("Run", "🏃")].iter() {
            if let Ok(title) = Title::new(*title) {
                let template = EventTemplate::new_with_style(title, emoji.to_string(), completion_calendar::config::default_template_color());
                if let Err(err) = store.insert(template.into()) {
                    log::error!("Unable to add a template: {}", err);
                    std::process::exit(1);
                }
            }
        }
    }

    let template_id = match store.templates().first() {
        Some(template) => *template.id(),
        None => return,
    };
    match apply_template(&mut store, &template_id, Local::now()) {
        Ok(Some(entry_id)) => println!("Created entry {}", entry_id),
        Ok(None) => println!("This template does not exist anymore"),
        Err(err) => log::error!("Unable to apply the template: {}", err),
    }

    println!("Templates:");
    for template in store.templates() {
        completion_calendar::utils::print_template(template);
    }
}
