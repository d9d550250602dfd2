//! Support for library configuration options

use std::sync::{Arc, Mutex};

use chrono::Weekday;
use once_cell::sync::Lazy;

use crate::template::ColorTag;

/// The emoji given to templates that are created without one.
/// Feel free to override it when initing this library.
pub static DEFAULT_TEMPLATE_EMOJI: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("📝".to_string())));

/// The color (as a hex string) given to templates that are created without one.
/// Feel free to override it when initing this library.
pub static DEFAULT_TEMPLATE_COLOR: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("FF6B9D".to_string())));

/// The weekday month grids start with.
/// Feel free to override it when initing this library.
pub static FIRST_WEEKDAY: Lazy<Arc<Mutex<Weekday>>> = Lazy::new(|| Arc::new(Mutex::new(Weekday::Sun)));

/// The emoji a template editor offers to pick from
pub const TEMPLATE_EMOJI_CHOICES: [&str; 12] = ["📝", "📚", "✏️", "🎨", "🎯", "⚡", "🌟", "🎵", "🏃", "💪", "🧠", "❤️"];


pub fn first_weekday() -> Weekday {
    *FIRST_WEEKDAY.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn default_template_emoji() -> String {
    DEFAULT_TEMPLATE_EMOJI.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
}

/// Returns the configured default template color, or `None` if it has been overridden with an invalid color
pub fn default_template_color() -> Option<ColorTag> {
    let raw = DEFAULT_TEMPLATE_COLOR.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone();
    match ColorTag::parse(&raw) {
        Ok(color) => Some(color),
        Err(err) => {
            log::warn!("Ignoring the configured default template color: {}", err);
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(first_weekday(), Weekday::Sun);
        assert_eq!(default_template_emoji(), "📝");
        assert_eq!(default_template_color().unwrap().as_hex(), "FF6B9D");
        assert!(TEMPLATE_EMOJI_CHOICES.contains(&default_template_emoji().as_str()));
    }
}
