//! Records held by an [`EntryStore`](crate::traits::EntryStore): calendar entries and templates

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::CalendarEntry;
use crate::error::ValidationError;
use crate::template::EventTemplate;

/// Declares a newtype around a random UUID, that is (de)serialized as its hyphenated string
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            content: uuid::Uuid,
        }

        impl $name {
            /// Generate a random id
            pub fn random() -> Self {
                Self { content: uuid::Uuid::new_v4() }
            }

            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.content
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(content: uuid::Uuid) -> Self {
                Self { content }
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let content = uuid::Uuid::parse_str(s)?;
                Ok(Self { content })
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
                write!(f, "{}", self.content.to_hyphenated())
            }
        }

        /// Used to support serde
        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        /// Used to support serde
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<$name, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

record_id!(
    /// The unique identifier of a [`CalendarEntry`]
    EntryId
);
record_id!(
    /// The unique identifier of an [`EventTemplate`]
    TemplateId
);


/// A display title, that is guaranteed to be non-empty.
///
/// Surrounding whitespace is trimmed, and titles that are empty after trimming are rejected.
/// Records only accept a `Title`, so that an empty title can never reach a store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    pub fn new<S: Into<String>>(title: S) -> Result<Self, ValidationError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Title {
    type Error = ValidationError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> String {
        title.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Title {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}


bitflags! {
    /// The kinds of records a store holds.
    ///
    /// Observers use this set to tell which changes they are interested in.
    pub struct RecordKinds: u8 {
        /// A [`CalendarEntry`]
        const ENTRY = 1;
        /// An [`EventTemplate`]
        const TEMPLATE = 2;
    }
}


/// Any record a store can hold
#[derive(Clone, Debug)]
pub enum Record {
    Entry(CalendarEntry),
    Template(EventTemplate),
}

/// Returns `entry.$property_name` or `template.$property_name`, depending on the kind of record
macro_rules! synthetise_common_getter {
    ($property_name:ident, $return_type:ty) => {
        pub fn $property_name(&self) -> $return_type {
            match self {
                Record::Entry(e) => e.$property_name(),
                Record::Template(t) => t.$property_name(),
            }
        }
    }
}

impl Record {
    synthetise_common_getter!(title, &Title);
    synthetise_common_getter!(created_at, &DateTime<Utc>);

    pub fn id(&self) -> RecordId {
        match self {
            Record::Entry(e) => RecordId::Entry(*e.id()),
            Record::Template(t) => RecordId::Template(*t.id()),
        }
    }

    pub fn kind(&self) -> RecordKinds {
        self.id().kind()
    }
}

impl From<CalendarEntry> for Record {
    fn from(entry: CalendarEntry) -> Self {
        Record::Entry(entry)
    }
}

impl From<EventTemplate> for Record {
    fn from(template: EventTemplate) -> Self {
        Record::Template(template)
    }
}


/// The identifier of any record a store can hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordId {
    Entry(EntryId),
    Template(TemplateId),
}

impl RecordId {
    pub fn kind(&self) -> RecordKinds {
        match self {
            RecordId::Entry(_) => RecordKinds::ENTRY,
            RecordId::Template(_) => RecordKinds::TEMPLATE,
        }
    }
}

impl From<EntryId> for RecordId {
    fn from(id: EntryId) -> Self {
        RecordId::Entry(id)
    }
}

impl From<TemplateId> for RecordId {
    fn from(id: TemplateId) -> Self {
        RecordId::Template(id)
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            RecordId::Entry(id) => write!(f, "entry {}", id),
            RecordId::Template(id) => write!(f, "template {}", id),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_rejects_empty_input() {
        assert!(matches!(Title::new(""), Err(ValidationError::EmptyTitle)));
        assert!(matches!(Title::new("   \t"), Err(ValidationError::EmptyTitle)));

        let title = Title::new("  Piano practice ").unwrap();
        assert_eq!(title.as_str(), "Piano practice");
    }

    #[test]
    fn title_deserialization_is_validated() {
        let title: Title = serde_json::from_str("\"Homework\"").unwrap();
        assert_eq!(title.as_str(), "Homework");

        assert!(serde_json::from_str::<Title>("\"\"").is_err());
    }

    #[test]
    fn ids_roundtrip_through_strings() {
        let id = EntryId::random();
        let parsed: EntryId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);

        assert!("not-a-uuid".parse::<TemplateId>().is_err());
        assert_ne!(EntryId::random(), EntryId::random());
    }

    #[test]
    fn record_ids_know_their_kind() {
        let entry = RecordId::from(EntryId::random());
        let template = RecordId::from(TemplateId::random());
        assert_eq!(entry.kind(), RecordKinds::ENTRY);
        assert_eq!(template.kind(), RecordKinds::TEMPLATE);
        assert!((RecordKinds::ENTRY | RecordKinds::TEMPLATE).contains(template.kind()));
    }
}
