//! Turns an attempt result into user feedback

use std::sync::Arc;

use super::AttemptResult;
use crate::messages::{self, FeedbackEvent, Translator, CONNECTED, CONNECTING_SERVER_ERROR};
use crate::registry::Target;
use crate::session::Locale;

/// Maps each [`AttemptResult`] to at most one [`FeedbackEvent`].
///
/// | Result                    | Feedback                                      |
/// |---------------------------|-----------------------------------------------|
/// | `Successful`              | "connected" if translated, otherwise nothing  |
/// | `Rejected` with reason    | the reason, verbatim                          |
/// | `Rejected` without reason | generic connect error                         |
/// | `Failed` / `Unresolved`   | generic connect error                         |
#[derive(Clone)]
pub struct OutcomeReconciler {
    translator: Arc<dyn Translator>,
}

impl OutcomeReconciler {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    pub fn reconcile(
        &self,
        candidate: &Target,
        result: &AttemptResult,
        locale: Option<Locale>,
    ) -> Option<FeedbackEvent> {
        metrics::counter!("hub_attempts_total", "outcome" => result.label()).increment(1);

        match result {
            AttemptResult::Successful => {
                tracing::info!(server = %candidate.name, "Client sent to fallback server");
                messages::translation_exists(self.translator.as_ref(), CONNECTED, locale)
                    .then(|| FeedbackEvent::translatable(CONNECTED, [candidate.name.as_str()]))
            }
            AttemptResult::Rejected { reason } => {
                tracing::info!(
                    server = %candidate.name,
                    reason = reason.as_deref().unwrap_or("<none>"),
                    "Fallback connection rejected"
                );
                Some(match reason {
                    Some(text) => FeedbackEvent::verbatim(text.clone()),
                    None => connect_error(candidate),
                })
            }
            AttemptResult::Failed(err) => {
                tracing::warn!(
                    server = %candidate.name,
                    error = %err,
                    "Fallback connection failed"
                );
                Some(connect_error(candidate))
            }
            AttemptResult::Unresolved => {
                tracing::error!(
                    server = %candidate.name,
                    "Fallback connection ended without a result"
                );
                Some(connect_error(candidate))
            }
        }
    }
}

fn connect_error(candidate: &Target) -> FeedbackEvent {
    FeedbackEvent::translatable(CONNECTING_SERVER_ERROR, [candidate.name.as_str()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::ConnectError;
    use crate::messages::TranslationCatalog;
    use std::time::Duration;

    fn lobby() -> Target {
        Target::new("lobby", "127.0.0.1:30066")
    }

    fn reconciler(catalog: TranslationCatalog) -> OutcomeReconciler {
        OutcomeReconciler::new(Arc::new(catalog))
    }

    fn generic_error() -> FeedbackEvent {
        FeedbackEvent::translatable(CONNECTING_SERVER_ERROR, ["lobby"])
    }

    #[test]
    fn test_success_without_translation_is_silent() {
        let reconciler = reconciler(TranslationCatalog::builtin());
        assert_eq!(
            reconciler.reconcile(&lobby(), &AttemptResult::Successful, None),
            None
        );
    }

    #[test]
    fn test_success_with_translation() {
        let mut catalog = TranslationCatalog::builtin();
        catalog.insert(&Locale::baseline(), CONNECTED, "Welcome to {0}");

        let event = reconciler(catalog).reconcile(&lobby(), &AttemptResult::Successful, None);
        assert_eq!(event, Some(FeedbackEvent::translatable(CONNECTED, ["lobby"])));
    }

    #[test]
    fn test_success_translation_checked_in_client_locale() {
        let mut catalog = TranslationCatalog::new();
        catalog.insert(&Locale::new("de"), CONNECTED, "Willkommen auf {0}");
        let reconciler = reconciler(catalog);

        let german = Some(Locale::new("de_DE"));
        assert!(reconciler
            .reconcile(&lobby(), &AttemptResult::Successful, german)
            .is_some());
        // Baseline has no entry for English speakers
        assert!(reconciler
            .reconcile(&lobby(), &AttemptResult::Successful, Some(Locale::new("en_us")))
            .is_none());
    }

    #[test]
    fn test_success_empty_translation_is_silent() {
        let mut catalog = TranslationCatalog::builtin();
        catalog.insert(&Locale::baseline(), CONNECTED, "");

        let event = reconciler(catalog).reconcile(&lobby(), &AttemptResult::Successful, None);
        assert_eq!(event, None);
    }

    #[test]
    fn test_rejected_with_reason_is_verbatim() {
        let result = AttemptResult::Rejected {
            reason: Some("You are banned from lobby".to_string()),
        };
        let event = reconciler(TranslationCatalog::builtin()).reconcile(&lobby(), &result, None);
        assert_eq!(event, Some(FeedbackEvent::verbatim("You are banned from lobby")));
    }

    #[test]
    fn test_rejected_without_reason_is_generic() {
        let result = AttemptResult::Rejected { reason: None };
        let event = reconciler(TranslationCatalog::builtin()).reconcile(&lobby(), &result, None);
        assert_eq!(event, Some(generic_error()));
    }

    #[test]
    fn test_failed_is_generic() {
        let result = AttemptResult::Failed(ConnectError::Timeout {
            server: "lobby".to_string(),
            elapsed: Duration::from_secs(5),
        });
        let event = reconciler(TranslationCatalog::builtin()).reconcile(&lobby(), &result, None);
        assert_eq!(event, Some(generic_error()));
    }

    #[test]
    fn test_unresolved_is_generic() {
        let event = reconciler(TranslationCatalog::builtin()).reconcile(
            &lobby(),
            &AttemptResult::Unresolved,
            None,
        );
        assert_eq!(event, Some(generic_error()));
    }

    #[test]
    fn test_generic_error_does_not_depend_on_translation() {
        // Even with an empty catalog the user hears about the failure
        let event = reconciler(TranslationCatalog::new()).reconcile(
            &lobby(),
            &AttemptResult::Unresolved,
            None,
        );
        assert_eq!(event, Some(generic_error()));
    }
}
