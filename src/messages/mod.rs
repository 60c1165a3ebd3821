//! Localized user feedback.
//!
//! Feedback is described as a [`FeedbackEvent`] (a message key plus ordered
//! arguments, or verbatim text from a backend) and delivered through a
//! [`MessageSink`]. Rendering goes through a [`Translator`].

mod catalog;
mod sink;

pub use catalog::TranslationCatalog;
pub use sink::{DeliveredMessage, RecordingSink};

use serde::Serialize;

use crate::session::{Locale, Session};

/// Shown when the client is already on a home server. Args: server name.
pub const ALREADY_CONNECTED: &str = "proxy.command.hub.fallback-already-connected";
/// Optional, shown before the attempt. Args: server name.
pub const CONNECTING: &str = "proxy.command.hub.fallback-connecting";
/// Optional, shown after a successful switch. Args: server name.
pub const CONNECTED: &str = "proxy.command.hub.fallback-connected";
/// Generic failure. Args: server name.
pub const CONNECTING_SERVER_ERROR: &str = "proxy.error.connecting-server-error";

/// A user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedbackEvent {
    /// Message resolved through the translator
    Translatable { key: String, args: Vec<String> },
    /// Text supplied by a backend, shown as-is
    Verbatim { text: String },
}

impl FeedbackEvent {
    pub fn translatable(key: &str, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        FeedbackEvent::Translatable {
            key: key.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn verbatim(text: impl Into<String>) -> Self {
        FeedbackEvent::Verbatim { text: text.into() }
    }

    /// Message key, `None` for verbatim text
    pub fn key(&self) -> Option<&str> {
        match self {
            FeedbackEvent::Translatable { key, .. } => Some(key),
            FeedbackEvent::Verbatim { .. } => None,
        }
    }
}

/// Resolves message templates
pub trait Translator: Send + Sync {
    /// Template for `key` under `locale`, or `None` if there is no translation
    fn translate(&self, key: &str, locale: &Locale) -> Option<String>;
}

/// Delivers feedback to a client
pub trait MessageSink: Send + Sync {
    fn send(&self, session: &dyn Session, event: FeedbackEvent);
}

/// Whether `key` has a usable translation for `locale`.
///
/// A missing locale is replaced by the baseline locale. An empty template
/// counts as missing; placeholders alone are enough to exist.
pub fn translation_exists(
    translator: &dyn Translator,
    key: &str,
    locale: Option<Locale>,
) -> bool {
    let locale = Locale::or_baseline(locale);
    translator
        .translate(key, &locale)
        .is_some_and(|template| !template.is_empty())
}

/// Substitute `{0}`, `{1}`, ... in `template` with `args`.
///
/// Placeholders without a matching argument are removed.
pub fn render(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if after[..close].chars().all(|c| c.is_ascii_digit()) && close > 0 => {
                if let Some(arg) = after[..close].parse::<usize>().ok().and_then(|i| args.get(i)) {
                    out.push_str(arg);
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render `event` for display. Untranslated keys render as the key itself.
pub fn render_event(
    translator: &dyn Translator,
    event: &FeedbackEvent,
    locale: Option<Locale>,
) -> String {
    match event {
        FeedbackEvent::Verbatim { text } => text.clone(),
        FeedbackEvent::Translatable { key, args } => {
            let locale = Locale::or_baseline(locale);
            match translator.translate(key, &locale) {
                Some(template) => render(&template, args),
                None => key.clone(),
            }
        }
    }
}
