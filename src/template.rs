//! Event templates: reusable presets that quickly create calendar entries

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::CalendarEntry;
use crate::error::ValidationError;
use crate::record::{EntryId, TemplateId, Title};

/// A validated color, stored as an uppercase `RRGGBB` (or `RRGGBBAA`) hex string, without the leading `#`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorTag {
    hex: String,
}

impl ColorTag {
    /// Parse any CSS color (`#ff6b9d`, `FF6B9D`, `rgb(255, 107, 157)`, `hotpink`...)
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        // Bare hex strings are how colors are usually stored, but CSS wants a `#` in front of them
        let css = if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            format!("#{}", trimmed)
        } else {
            trimmed.to_string()
        };

        let color = csscolorparser::parse(&css).map_err(|err| ValidationError::InvalidColor {
            value: value.to_string(),
            reason: err.to_string(),
        })?;

        let hex = color.to_hex_string().trim_start_matches('#').to_ascii_uppercase();
        Ok(Self { hex })
    }

    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    pub fn to_color(&self) -> Option<csscolorparser::Color> {
        csscolorparser::parse(&format!("#{}", self.hex)).ok()
    }
}

impl TryFrom<String> for ColorTag {
    type Error = ValidationError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColorTag> for String {
    fn from(color: ColorTag) -> String {
        color.hex
    }
}

impl Display for ColorTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "#{}", self.hex)
    }
}


/// A reusable preset (title, emoji and color) for new entries
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventTemplate {
    id: TemplateId,
    title: Title,
    emoji: String,
    /// Older stores may not have any color at all
    #[serde(default)]
    color: Option<ColorTag>,
    created_at: DateTime<Utc>,
    /// `None` until this template is applied for the first time
    last_used_at: Option<DateTime<Utc>>,
    usage_count: u32,
}

impl EventTemplate {
    /// Create a brand new template, with the configured default emoji and color
    pub fn new(title: Title) -> Self {
        Self::new_with_style(title, crate::config::default_template_emoji(), crate::config::default_template_color())
    }

    /// Create a brand new template that has never been used.
    /// This will pick a new (random) template ID.
    pub fn new_with_style(title: Title, emoji: String, color: Option<ColorTag>) -> Self {
        Self {
            id: TemplateId::random(),
            title,
            emoji,
            color,
            created_at: Utc::now(),
            last_used_at: None,
            usage_count: 0,
        }
    }

    pub fn id(&self) -> &TemplateId                     { &self.id              }
    pub fn title(&self) -> &Title                       { &self.title           }
    pub fn emoji(&self) -> &str                         { &self.emoji           }
    pub fn color(&self) -> Option<&ColorTag>            { self.color.as_ref()   }
    pub fn created_at(&self) -> &DateTime<Utc>          { &self.created_at      }
    pub fn last_used_at(&self) -> Option<&DateTime<Utc>> { self.last_used_at.as_ref() }
    pub fn usage_count(&self) -> u32                    { self.usage_count      }

    /// Compares every field, unlike `==` which only compares ids
    pub fn has_same_contents_as(&self, other: &EventTemplate) -> bool {
           self.id == other.id
        && self.title == other.title
        && self.emoji == other.emoji
        && self.color == other.color
        && self.created_at == other.created_at
        && self.last_used_at == other.last_used_at
        && self.usage_count == other.usage_count
    }

    /// Build the entry this template stands for, on the given day
    pub fn instantiate(&self, date: DateTime<Local>, now: DateTime<Utc>) -> CalendarEntry {
        CalendarEntry::new_with_parameters(EntryId::random(), self.title.clone(), date, String::new(), false, now)
    }

    pub fn set_title(&mut self, new_title: Title) {
        self.title = new_title;
    }

    pub fn set_emoji(&mut self, new_emoji: String) {
        self.emoji = new_emoji;
    }

    pub fn set_color(&mut self, new_color: Option<ColorTag>) {
        self.color = new_color;
    }

    /// Only template applications may count a usage
    pub(crate) fn record_usage(&mut self, at: DateTime<Utc>) {
        self.usage_count = self.usage_count.saturating_add(1);
        self.last_used_at = Some(at);
    }
}

impl PartialEq for EventTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for EventTemplate {}
