//! This crate provides the logic of a "completion calendar": a month-grid calendar where each day holds a short list of to-do entries.
//! Days whose entries are all completed get a star.
//!
//! Records (calendar [entries](CalendarEntry) and reusable [templates](EventTemplate)) are owned by an [`EntryStore`](traits::EntryStore).
//! The provided [`Store`](store::Store) keeps them in memory and saves them to a local JSON file.
//! Every committed change is notified to observers, which is the signal to derive the displayed data again.
//!
//! Derived data is computed by pure functions:
//! * the [`grid`] module lays out the 42 days displayed for a month,
//! * the [`bucket`] module groups entries by day and tells which days are fully completed,
//! * the [`apply`] module turns a template into a new entry,
//! * the [`view`] module puts all of them together into render-ready month snapshots, for a UI shell to display.

pub mod traits;

mod record;
pub use record::{EntryId, Record, RecordId, RecordKinds, TemplateId, Title};
pub mod entry;
pub use entry::CalendarEntry;
pub mod template;
pub use template::{ColorTag, EventTemplate};
pub mod mutation;
pub use mutation::{EntryChange, Mutation, TemplateChange};
pub mod error;
pub use error::{StoreError, ValidationError};

pub mod store;
pub use store::Store;

pub mod grid;
pub mod bucket;
pub mod apply;
pub mod view;

pub mod config;
pub mod utils;
