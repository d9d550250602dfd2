//! This module provides a store for calendar entries and templates, optionally backed by a local JSON file

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entry::CalendarEntry;
use crate::error::StoreError;
use crate::mutation::{EntryChange, Mutation, TemplateChange};
use crate::record::{EntryId, Record, RecordId, RecordKinds, TemplateId};
use crate::template::EventTemplate;
use crate::traits::EntryStore;
use crate::utils::same_keys;

pub mod events;
use events::{Change, Observer, RevisionReceiver, RevisionSender, StoreEvent, SubscriptionId};


/// An [`EntryStore`] that keeps its records in memory, and writes them to a backing file (if any) after every commit
pub struct Store {
    backing_file: Option<PathBuf>,
    data: StoredData,

    revision: u64,
    revision_sender: RevisionSender,
    // Keeps the revision channel open even when nobody listens
    revision_receiver: RevisionReceiver,

    observers: Vec<Subscription>,
    next_subscription_id: u64,
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
struct StoredData {
    entries: HashMap<EntryId, CalendarEntry>,
    templates: HashMap<TemplateId, EventTemplate>,
}

struct Subscription {
    id: SubscriptionId,
    kinds: RecordKinds,
    observer: Observer,
}

impl Store {
    /// Initialize an empty store that is never written to disk
    pub fn in_memory() -> Self {
        Self::with_data(None, StoredData::default())
    }

    /// Initialize an empty store, that will be saved to `path`
    pub fn new(path: &Path) -> Self {
        log::info!("Creating a new store at {:?}", path);
        Self::with_data(Some(PathBuf::from(path)), StoredData::default())
    }

    /// Initialize a store from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let file = std::fs::File::open(path).map_err(|source| StoreError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        let data: StoredData = serde_json::from_reader(std::io::BufReader::new(file))?;
        log::info!("Loaded {} entries and {} templates from {:?}", data.entries.len(), data.templates.len(), path);

        Ok(Self::with_data(Some(PathBuf::from(path)), data))
    }

    /// Load the store saved at `path`, or create an empty one if there is no such file yet.
    ///
    /// An existing but unreadable or invalid file is an error: there is no fallback to an empty store, so that no data is silently lost.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::new(path))
        }
    }

    fn with_data(backing_file: Option<PathBuf>, data: StoredData) -> Self {
        let (revision_sender, revision_receiver) = events::revision_channel();
        Self {
            backing_file,
            data,
            revision: 0,
            revision_sender,
            revision_receiver,
            observers: Vec::new(),
            next_subscription_id: 0,
        }
    }

    pub fn backing_file(&self) -> Option<&Path> {
        self.backing_file.as_deref()
    }

    /// The number of batches committed since this store has been opened
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Get notified (asynchronously) of every committed revision
    pub fn revisions(&self) -> RevisionReceiver {
        self.revision_receiver.clone()
    }

    /// Store the current contents to the backing file (if any).
    ///
    /// The contents are written to a sibling temporary file first, that then replaces the backing file.
    /// A failed save leaves the previous backing file untouched.
    pub fn save_to_file(&self) -> Result<(), StoreError> {
        let path = match &self.backing_file {
            None => return Ok(()),
            Some(path) => path,
        };
        let temp_path = temp_path_for(path);

        if let Err(err) = self.write_to(&temp_path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(err);
        }
        if let Err(source) = std::fs::rename(&temp_path, path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StoreError::Io { path: path.clone(), source });
        }
        log::debug!("Saved the store to {:?}", path);
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<(), StoreError> {
        let io_error = |source: std::io::Error| StoreError::Io { path: PathBuf::from(path), source };

        let file = std::fs::File::create(path).map_err(io_error)?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer(&mut writer, &self.data)?;
        writer.flush().map_err(io_error)?;
        writer.get_ref().sync_all().map_err(io_error)
    }

    /// Compares two Stores to check they have the same current content
    ///
    /// This does not compare observers, revisions nor backing files
    pub fn has_same_contents_than(&self, other: &Self) -> bool {
        if same_keys(&self.data.entries, &other.data.entries) == false
            || same_keys(&self.data.templates, &other.data.templates) == false
        {
            return false;
        }

        let same_entries = self.data.entries.iter().all(|(id, entry_l)| {
            other.data.entries.get(id)
                .map(|entry_r| entry_l.has_same_contents_as(entry_r))
                .unwrap_or(false)
        });
        let same_templates = self.data.templates.iter().all(|(id, template_l)| {
            other.data.templates.get(id)
                .map(|template_r| template_l.has_same_contents_as(template_r))
                .unwrap_or(false)
        });
        same_entries && same_templates
    }

    /// Applies a mutation to the in-memory data.
    /// Returns `None` if it targets a record that does not exist
    fn apply(data: &mut StoredData, mutation: Mutation) -> Option<Change> {
        match mutation {
            Mutation::Insert(Record::Entry(entry)) => {
                let id = *entry.id();
                data.entries.insert(id, entry);
                Some(Change::Inserted(RecordId::Entry(id)))
            },
            Mutation::Insert(Record::Template(template)) => {
                let id = *template.id();
                data.templates.insert(id, template);
                Some(Change::Inserted(RecordId::Template(id)))
            },
            Mutation::UpdateEntry(id, change) => {
                let entry = data.entries.get_mut(&id)?;
                match change {
                    EntryChange::Rename(title) => entry.set_title(title),
                    EntryChange::SetCompleted(completed) => entry.set_completed(completed),
                    EntryChange::ToggleCompleted => entry.toggle_completed(),
                    EntryChange::SetNotes(notes) => entry.set_notes(notes),
                }
                Some(Change::Updated(RecordId::Entry(id)))
            },
            Mutation::UpdateTemplate(id, change) => {
                let template = data.templates.get_mut(&id)?;
                match change {
                    TemplateChange::Rename(title) => template.set_title(title),
                    TemplateChange::SetEmoji(emoji) => template.set_emoji(emoji),
                    TemplateChange::SetColor(color) => template.set_color(color),
                }
                Some(Change::Updated(RecordId::Template(id)))
            },
            Mutation::TemplateUsed(id, stamp) => {
                let template = data.templates.get_mut(&id)?;
                template.record_usage(*stamp.at());
                Some(Change::Updated(RecordId::Template(id)))
            },
            Mutation::Delete(RecordId::Entry(id)) => {
                data.entries.remove(&id)?;
                Some(Change::Deleted(RecordId::Entry(id)))
            },
            Mutation::Delete(RecordId::Template(id)) => {
                data.templates.remove(&id)?;
                Some(Change::Deleted(RecordId::Template(id)))
            },
        }
    }

    fn notify(&mut self, event: &StoreEvent) {
        let _ = self.revision_sender.send(event.revision());

        for subscription in self.observers.iter_mut() {
            if event.touches(subscription.kinds) {
                (subscription.observer)(event);
            }
        }
    }
}

/// The file a store is written to, before it replaces `path`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

impl EntryStore for Store {
    fn entries(&self) -> Vec<&CalendarEntry> {
        self.data.entries.values().collect()
    }

    fn templates(&self) -> Vec<&EventTemplate> {
        let mut templates: Vec<&EventTemplate> = self.data.templates.values().collect();
        templates.sort_by(|a, b| a.created_at().cmp(b.created_at()).then_with(|| a.id().cmp(b.id())));
        templates
    }

    fn entry(&self, id: &EntryId) -> Option<&CalendarEntry> {
        self.data.entries.get(id)
    }

    fn template(&self, id: &TemplateId) -> Option<&EventTemplate> {
        self.data.templates.get(id)
    }

    fn commit(&mut self, batch: Vec<Mutation>) -> Result<(), StoreError> {
        let previous_data = self.data.clone();

        let mut changes = Vec::with_capacity(batch.len());
        for mutation in batch {
            let target = mutation.target();
            match Self::apply(&mut self.data, mutation) {
                Some(change) => changes.push(change),
                None => log::debug!("Ignoring a change to {}, that does not exist (anymore)", target),
            }
        }

        if changes.is_empty() {
            return Ok(());
        }

        if let Err(err) = self.save_to_file() {
            log::warn!("Unable to save the store, rolling back {} change(s): {}", changes.len(), err);
            self.data = previous_data;
            return Err(err);
        }

        self.revision += 1;
        let event = StoreEvent::new(self.revision, changes);
        log::debug!("Committed {}", event);
        self.notify(&event);
        Ok(())
    }

    fn subscribe(&mut self, kinds: RecordKinds, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.observers.push(Subscription { id, kinds, observer });
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let n_before = self.observers.len();
        self.observers.retain(|subscription| subscription.id != id);
        self.observers.len() != n_before
    }
}

impl Debug for Store {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("backing_file", &self.backing_file)
            .field("revision", &self.revision)
            .field("entries", &self.data.entries.len())
            .field("templates", &self.data.templates.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use chrono::{Local, TimeZone};

    use crate::record::Title;

    fn entry(title: &str, completed: bool) -> CalendarEntry {
        let date = Local.with_ymd_and_hms(2025, 3, 5, 10, 0, 0).single().unwrap();
        let mut entry = CalendarEntry::new(Title::new(title).unwrap(), date);
        entry.set_completed(completed);
        entry
    }

    fn recorded_events(store: &mut Store, kinds: RecordKinds) -> Arc<Mutex<Vec<StoreEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        store.subscribe(kinds, Box::new(move |event: &StoreEvent| sink.lock().unwrap().push(event.clone())));
        events
    }

    #[test]
    fn serde_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let store_path = dir.path().join("store.json");

        let mut store = Store::new(&store_path);
        store.insert(entry("Piano", true).into()).unwrap();
        store.insert(EventTemplate::new(Title::new("Homework").unwrap()).into()).unwrap();

        let retrieved_store = Store::from_file(&store_path).unwrap();
        assert!(store.has_same_contents_than(&retrieved_store));
        assert_eq!(retrieved_store.entries().len(), 1);
        assert_eq!(retrieved_store.templates().len(), 1);
    }

    #[test]
    fn invalid_backing_file_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let store_path = dir.path().join("store.json");
        std::fs::write(&store_path, "{ not json").unwrap();

        assert!(matches!(Store::open(&store_path), Err(StoreError::Serialization(_))));
        assert!(matches!(Store::from_file(&dir.path().join("missing.json")), Err(StoreError::Io { .. })));
    }

    #[test]
    fn updates_and_deletions() {
        let mut store = Store::in_memory();
        let first = entry("Piano", false);
        let id = *first.id();
        store.insert(first.into()).unwrap();

        store.update_entry(&id, EntryChange::ToggleCompleted).unwrap();
        store.update_entry(&id, EntryChange::Rename(Title::new("Piano scales").unwrap())).unwrap();
        store.update_entry(&id, EntryChange::SetNotes("20 minutes".to_string())).unwrap();

        let stored = store.entry(&id).unwrap();
        assert!(stored.completed());
        assert_eq!(stored.title().as_str(), "Piano scales");
        assert_eq!(stored.notes(), "20 minutes");

        store.delete(id.into()).unwrap();
        assert!(store.entry(&id).is_none());
        assert_eq!(store.revision(), 5);
    }

    #[test]
    fn missing_records_are_no_ops() {
        let mut store = Store::in_memory();
        let events = recorded_events(&mut store, RecordKinds::all());

        store.update_entry(&EntryId::random(), EntryChange::SetCompleted(true)).unwrap();
        store.update_template(&TemplateId::random(), TemplateChange::SetEmoji("🎯".to_string())).unwrap();
        store.delete(EntryId::random().into()).unwrap();

        assert_eq!(store.revision(), 0);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn observers_only_get_the_kinds_they_asked_for() {
        let mut store = Store::in_memory();
        let entry_events = recorded_events(&mut store, RecordKinds::ENTRY);
        let template_events = recorded_events(&mut store, RecordKinds::TEMPLATE);

        store.insert(entry("Laundry", false).into()).unwrap();
        store.insert(entry("Dishes", false).into()).unwrap();
        store.insert(EventTemplate::new(Title::new("Run").unwrap()).into()).unwrap();

        let entry_events = entry_events.lock().unwrap();
        assert_eq!(entry_events.len(), 2);
        assert_eq!(entry_events[1].revision(), 2);
        assert_eq!(template_events.lock().unwrap().len(), 1);
    }

    #[test]
    fn unsubscribed_observers_are_not_called() {
        let mut store = Store::in_memory();
        let events = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&events);
        let subscription = store.subscribe(RecordKinds::all(), Box::new(move |_: &StoreEvent| *sink.lock().unwrap() += 1));

        store.insert(entry("Laundry", false).into()).unwrap();
        assert!(store.unsubscribe(subscription));
        assert!(store.unsubscribe(subscription) == false);
        store.insert(entry("Dishes", false).into()).unwrap();

        assert_eq!(*events.lock().unwrap(), 1);
    }

    #[test]
    fn failed_saves_roll_back_the_whole_batch() {
        let dir = tempfile::TempDir::new().unwrap();
        // The parent folder does not exist, so that every save fails
        let mut store = Store::new(&dir.path().join("missing").join("store.json"));
        let events = recorded_events(&mut store, RecordKinds::all());

        let result = store.commit(vec![
            Mutation::Insert(entry("Laundry", false).into()),
            Mutation::Insert(EventTemplate::new(Title::new("Run").unwrap()).into()),
        ]);

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(store.entries().is_empty());
        assert!(store.templates().is_empty());
        assert_eq!(store.revision(), 0);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_saves_keep_the_previous_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let store_path = dir.path().join("store.json");
        let mut store = Store::new(&store_path);
        let kept = entry("Laundry", true);
        let kept_id = *kept.id();
        store.insert(kept.into()).unwrap();
        let saved_contents = std::fs::read_to_string(&store_path).unwrap();

        // A folder where the temporary file should be written makes the next save fail
        std::fs::create_dir(temp_path_for(&store_path)).unwrap();
        let result = store.insert(entry("Dishes", false).into());
        assert!(matches!(result, Err(StoreError::Io { .. })));

        assert_eq!(std::fs::read_to_string(&store_path).unwrap(), saved_contents);
        let reopened = Store::open(&store_path).unwrap();
        assert!(reopened.has_same_contents_than(&store));
        assert_eq!(reopened.entries().len(), 1);
        assert!(reopened.entry(&kept_id).is_some());
    }

    #[test]
    fn saves_do_not_leave_temporary_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let store_path = dir.path().join("store.json");
        let mut store = Store::new(&store_path);
        store.insert(entry("Laundry", false).into()).unwrap();
        store.insert(entry("Dishes", false).into()).unwrap();

        assert_eq!(temp_path_for(&store_path), dir.path().join("store.json.tmp"));
        assert!(temp_path_for(&store_path).exists() == false);
        assert_eq!(Store::open(&store_path).unwrap().entries().len(), 2);
    }

    #[test]
    fn templates_are_listed_oldest_first() {
        let mut store = Store::in_memory();
        let titles = ["Homework", "Piano", "Run"];
        for title in titles.iter() {
            store.insert(EventTemplate::new(Title::new(*title).unwrap()).into()).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let listed: Vec<&str> = store.templates().iter().map(|t| t.title().as_str()).collect();
        assert_eq!(listed, titles);
    }

    #[tokio::test]
    async fn revision_channel_follows_commits() {
        let mut store = Store::in_memory();
        let mut revisions = store.revisions();
        assert_eq!(*revisions.borrow(), 0);

        store.insert(entry("Laundry", false).into()).unwrap();
        revisions.changed().await.unwrap();
        assert_eq!(*revisions.borrow(), 1);
    }
}
