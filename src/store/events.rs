//! Change notifications sent by a store once a batch has been committed

use std::fmt::{Display, Error, Formatter};

use crate::record::{RecordId, RecordKinds};

/// What happened to a single record
#[derive(Clone, Debug, PartialEq)]
pub enum Change {
    Inserted(RecordId),
    Updated(RecordId),
    Deleted(RecordId),
}

impl Change {
    pub fn record_id(&self) -> &RecordId {
        match self {
            Change::Inserted(id) | Change::Updated(id) | Change::Deleted(id) => id,
        }
    }

    pub fn kind(&self) -> RecordKinds {
        self.record_id().kind()
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Change::Inserted(id) => write!(f, "inserted {}", id),
            Change::Updated(id) => write!(f, "updated {}", id),
            Change::Deleted(id) => write!(f, "deleted {}", id),
        }
    }
}


/// Every change of a committed batch.
///
/// A batch is always notified as a whole, so that observers never see half of it.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreEvent {
    revision: u64,
    changes: Vec<Change>,
}

impl StoreEvent {
    pub(crate) fn new(revision: u64, changes: Vec<Change>) -> Self {
        Self { revision, changes }
    }

    /// The store revision this batch produced
    pub fn revision(&self) -> u64 { self.revision }
    pub fn changes(&self) -> &[Change] { &self.changes }

    /// The kinds of records this batch touched
    pub fn kinds(&self) -> RecordKinds {
        self.changes
            .iter()
            .fold(RecordKinds::empty(), |kinds, change| kinds | change.kind())
    }

    /// Whether this batch touched a record of any of the given kinds
    pub fn touches(&self, kinds: RecordKinds) -> bool {
        self.kinds().intersects(kinds)
    }
}

impl Display for StoreEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "revision {}:", self.revision)?;
        for change in &self.changes {
            write!(f, " {};", change)?;
        }
        Ok(())
    }
}


/// Callback invoked with every committed batch an observer subscribed to
pub type Observer = Box<dyn FnMut(&StoreEvent) + Send>;

/// Identifies an observer, so that it can be unsubscribed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);


/// See [`revision_channel`]
pub type RevisionSender = tokio::sync::watch::Sender<u64>;
/// See [`revision_channel`]
pub type RevisionReceiver = tokio::sync::watch::Receiver<u64>;

/// Create a revision channel, that tells async listeners the latest committed store revision
pub fn revision_channel() -> (RevisionSender, RevisionReceiver) {
    tokio::sync::watch::channel(0)
}
