use std::collections::HashMap;

use super::{Translator, ALREADY_CONNECTED, CONNECTING_SERVER_ERROR};
use crate::session::Locale;

/// In-memory translation table (locale tag → key → template).
///
/// Lookups try the full tag, then its language, then the baseline locale.
///
/// # Examples
///
/// ```
/// use hub::messages::{TranslationCatalog, Translator, CONNECTED};
/// use hub::session::Locale;
///
/// let mut catalog = TranslationCatalog::builtin();
/// catalog.insert(&Locale::new("de"), CONNECTED, "Verbunden mit {0}");
///
/// let template = catalog.translate(CONNECTED, &Locale::new("de_AT")).unwrap();
/// assert_eq!(template, "Verbunden mit {0}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    entries: HashMap<String, HashMap<String, String>>,
}

impl TranslationCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in baseline messages.
    ///
    /// The connecting/connected messages are intentionally absent so they
    /// stay silent unless an operator configures them.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        let baseline = Locale::baseline();
        catalog.insert(&baseline, ALREADY_CONNECTED, "You are already connected to {0}.");
        catalog.insert(
            &baseline,
            CONNECTING_SERVER_ERROR,
            "Unable to connect you to {0}. Please try again later.",
        );
        catalog
    }

    /// Built-in catalog with configured overrides merged on top
    pub fn with_overrides(overrides: &HashMap<String, HashMap<String, String>>) -> Self {
        let mut catalog = Self::builtin();
        for (tag, messages) in overrides {
            let locale = Locale::new(tag);
            for (key, template) in messages {
                catalog.insert(&locale, key, template);
            }
        }
        catalog
    }

    pub fn insert(&mut self, locale: &Locale, key: &str, template: &str) {
        self.entries
            .entry(locale.tag().to_string())
            .or_default()
            .insert(key.to_string(), template.to_string());
    }

    fn lookup(&self, tag: &str, key: &str) -> Option<&String> {
        self.entries.get(tag).and_then(|messages| messages.get(key))
    }
}

impl Translator for TranslationCatalog {
    fn translate(&self, key: &str, locale: &Locale) -> Option<String> {
        self.lookup(locale.tag(), key)
            .or_else(|| self.lookup(locale.language(), key))
            .or_else(|| self.lookup(Locale::baseline().tag(), key))
            .cloned()
    }
}
