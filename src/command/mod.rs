//! The `hub` command: capability gate in front of the fallback orchestrator.

use std::sync::Arc;

use crate::fallback::{FallbackOrchestrator, Invocation};
use crate::permission::{self, PermissionChecker, Principal, HUB_CAPABILITY};

/// Name the command is registered under
pub const COMMAND_NAME: &str = "hub";

/// Parameterless command that sends the invoking client home.
pub struct HubCommand {
    orchestrator: Arc<FallbackOrchestrator>,
    permissions: Arc<dyn PermissionChecker>,
}

impl HubCommand {
    pub fn new(
        orchestrator: Arc<FallbackOrchestrator>,
        permissions: Arc<dyn PermissionChecker>,
    ) -> Self {
        Self {
            orchestrator,
            permissions,
        }
    }

    /// Whether `principal` may see and run the command
    pub fn is_available_to(&self, principal: &Principal) -> bool {
        permission::allowed(self.permissions.as_ref(), principal, HUB_CAPABILITY)
    }

    /// Run the command for `principal`.
    ///
    /// Callers without the capability and non-client callers get a silent
    /// `NotHandled`.
    pub fn execute(&self, principal: &Principal) -> Invocation {
        if !self.is_available_to(principal) {
            tracing::debug!(principal = principal.name(), "Hub command denied");
            return Invocation::not_handled();
        }

        match principal {
            Principal::Client(session) => self.orchestrator.invoke(Arc::clone(session)),
            Principal::Console => {
                tracing::debug!("Hub command is only available to clients");
                Invocation::not_handled()
            }
        }
    }
}
