use crate::entry::CalendarEntry;
use crate::error::StoreError;
use crate::mutation::{EntryChange, Mutation, TemplateChange};
use crate::record::{EntryId, Record, RecordId, RecordKinds, TemplateId};
use crate::store::events::{Observer, SubscriptionId};
use crate::template::EventTemplate;

/// A source that owns every calendar entry and template
pub trait EntryStore {
    /// Returns every entry this store contains, in no particular order
    fn entries(&self) -> Vec<&CalendarEntry>;
    /// Returns every template this store contains, oldest first
    fn templates(&self) -> Vec<&EventTemplate>;

    fn entry(&self, id: &EntryId) -> Option<&CalendarEntry>;
    fn template(&self, id: &TemplateId) -> Option<&EventTemplate>;

    /// Apply a batch of mutations atomically.
    ///
    /// Either every mutation is applied (and persisted, for stores that have a backing storage) and observers are notified once,
    /// or nothing changes and an error is returned.
    /// Mutations that target a record that does not exist (anymore) are no-ops.
    fn commit(&mut self, batch: Vec<Mutation>) -> Result<(), StoreError>;

    /// Register an observer, that will be called after every committed batch that touches records of the given kinds
    fn subscribe(&mut self, kinds: RecordKinds, observer: Observer) -> SubscriptionId;
    /// Returns whether this observer was subscribed
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    fn insert(&mut self, record: Record) -> Result<(), StoreError> {
        self.commit(vec![Mutation::Insert(record)])
    }

    fn update_entry(&mut self, id: &EntryId, change: EntryChange) -> Result<(), StoreError> {
        self.commit(vec![Mutation::UpdateEntry(*id, change)])
    }

    fn update_template(&mut self, id: &TemplateId, change: TemplateChange) -> Result<(), StoreError> {
        self.commit(vec![Mutation::UpdateTemplate(*id, change)])
    }

    fn delete(&mut self, id: RecordId) -> Result<(), StoreError> {
        self.commit(vec![Mutation::Delete(id)])
    }
}
