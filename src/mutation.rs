//! Changes that can be committed to an [`EntryStore`](crate::traits::EntryStore)

use chrono::{DateTime, Utc};

use crate::record::{EntryId, Record, RecordId, TemplateId, Title};
use crate::template::ColorTag;

/// An in-place change to a [`CalendarEntry`](crate::CalendarEntry)
#[derive(Clone, Debug, PartialEq)]
pub enum EntryChange {
    Rename(Title),
    SetCompleted(bool),
    ToggleCompleted,
    SetNotes(String),
}

/// An in-place change to an [`EventTemplate`](crate::EventTemplate).
///
/// Usage counters cannot be changed this way, see [`apply_template`](crate::apply::apply_template)
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateChange {
    Rename(Title),
    SetEmoji(String),
    SetColor(Option<ColorTag>),
}

/// Proof that a template has just been applied.
///
/// This can only be built by this crate, so that usage counters only move when a template is actually applied.
#[derive(Clone, Debug, PartialEq)]
pub struct UsageStamp {
    at: DateTime<Utc>,
}

impl UsageStamp {
    pub(crate) fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    pub fn at(&self) -> &DateTime<Utc> {
        &self.at
    }
}

/// A single step of a batch that a store commits atomically
#[derive(Clone, Debug)]
pub enum Mutation {
    /// Insert a record, replacing any record with the same id
    Insert(Record),
    UpdateEntry(EntryId, EntryChange),
    UpdateTemplate(TemplateId, TemplateChange),
    /// Bump the usage counter of a template
    TemplateUsed(TemplateId, UsageStamp),
    Delete(RecordId),
}

impl Mutation {
    /// The record this mutation targets
    pub fn target(&self) -> RecordId {
        match self {
            Mutation::Insert(record) => record.id(),
            Mutation::UpdateEntry(id, _) => RecordId::Entry(*id),
            Mutation::UpdateTemplate(id, _) => RecordId::Template(*id),
            Mutation::TemplateUsed(id, _) => RecordId::Template(*id),
            Mutation::Delete(id) => *id,
        }
    }
}
