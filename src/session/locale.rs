use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag of the baseline locale used when a client reports none
pub const BASELINE_LOCALE: &str = "en";

/// A client locale, normalized to a lowercase `language[_region]` tag.
///
/// # Examples
///
/// ```
/// use hub::session::Locale;
///
/// let locale = Locale::new("en-US");
/// assert_eq!(locale.tag(), "en_us");
/// assert_eq!(locale.language(), "en");
///
/// assert_eq!(Locale::or_baseline(None), Locale::baseline());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().replace('-', "_").to_ascii_lowercase())
    }

    pub fn baseline() -> Self {
        Self(BASELINE_LOCALE.to_string())
    }

    /// The effective locale, substituting the baseline for a missing one
    pub fn or_baseline(locale: Option<Locale>) -> Self {
        locale.unwrap_or_else(Self::baseline)
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Language part of the tag (`en` for `en_us`)
    pub fn language(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::new(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("Locale tag cannot be empty".to_string());
        }
        Ok(Self::new(s))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
