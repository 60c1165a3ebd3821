//! Capability gate evaluated before the hub command runs.
//!
//! The gate is a pure predicate over `(principal, capability)`; the
//! fallback core never consults it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::config::PermissionsConfig;
use crate::session::Session;

/// Capability required to invoke the hub command
pub const HUB_CAPABILITY: &str = "proxy.command.hub";

/// Three-valued permission result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tristate {
    True,
    False,
    /// No explicit grant; treated as denied
    #[default]
    Undefined,
}

impl From<bool> for Tristate {
    fn from(value: bool) -> Self {
        if value {
            Tristate::True
        } else {
            Tristate::False
        }
    }
}

/// Whoever invoked a command.
#[derive(Clone)]
pub enum Principal {
    /// A live client session
    Client(Arc<dyn Session>),
    /// The proxy console
    Console,
}

impl Principal {
    pub fn name(&self) -> &str {
        match self {
            Principal::Client(session) => session.username(),
            Principal::Console => "CONSOLE",
        }
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principal::Client(session) => f
                .debug_struct("Client")
                .field("id", &session.id())
                .field("username", &session.username())
                .finish(),
            Principal::Console => f.write_str("Console"),
        }
    }
}

/// Source of permission values
pub trait PermissionChecker: Send + Sync {
    fn permission_value(&self, principal: &Principal, capability: &str) -> Tristate;
}

/// Whether `principal` holds `capability`. Only an explicit `True` allows.
pub fn allowed(checker: &dyn PermissionChecker, principal: &Principal, capability: &str) -> bool {
    checker.permission_value(principal, capability) == Tristate::True
}

/// Permission values from the `[permissions]` config section.
///
/// The console holds every capability. Clients hold the hub capability
/// according to their grant, or the configured default.
pub struct ConfigPermissions {
    config: PermissionsConfig,
}

impl ConfigPermissions {
    pub fn new(config: PermissionsConfig) -> Self {
        Self { config }
    }
}

impl PermissionChecker for ConfigPermissions {
    fn permission_value(&self, principal: &Principal, capability: &str) -> Tristate {
        let session = match principal {
            Principal::Console => return Tristate::True,
            Principal::Client(session) => session,
        };

        if capability != HUB_CAPABILITY {
            return Tristate::Undefined;
        }

        self.config
            .grants
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(session.username()))
            .map(|(_, value)| *value)
            .unwrap_or(self.config.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackConfig;
    use crate::registry::Registry;
    use crate::session::ConnectedClient;

    fn client(name: &str) -> Principal {
        Principal::Client(Arc::new(ConnectedClient::new(
            name,
            Arc::new(Registry::new()),
            Arc::new(FallbackConfig::default()),
        )))
    }

    fn checker(default: Tristate, grants: &[(&str, Tristate)]) -> ConfigPermissions {
        ConfigPermissions::new(PermissionsConfig {
            default,
            grants: grants
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        })
    }

    #[test]
    fn test_tristate_serde() {
        let json = serde_json::to_string(&Tristate::Undefined).unwrap();
        assert_eq!(json, r#""undefined""#);
        assert_eq!(Tristate::from(true), Tristate::True);
    }

    #[test]
    fn test_default_applies_without_grant() {
        let checker = checker(Tristate::True, &[]);
        assert!(allowed(&checker, &client("alice"), HUB_CAPABILITY));
    }

    #[test]
    fn test_undefined_denies() {
        let checker = checker(Tristate::Undefined, &[]);
        assert!(!allowed(&checker, &client("alice"), HUB_CAPABILITY));
    }

    #[test]
    fn test_grant_overrides_default_case_insensitive() {
        let checker = checker(Tristate::True, &[("Mallory", Tristate::False)]);
        assert!(!allowed(&checker, &client("mallory"), HUB_CAPABILITY));
        assert!(allowed(&checker, &client("alice"), HUB_CAPABILITY));
    }

    #[test]
    fn test_other_capabilities_undefined_for_clients() {
        let checker = checker(Tristate::True, &[]);
        assert_eq!(
            checker.permission_value(&client("alice"), "proxy.command.shutdown"),
            Tristate::Undefined
        );
    }

    #[test]
    fn test_console_holds_everything() {
        let checker = checker(Tristate::False, &[]);
        assert!(allowed(&checker, &Principal::Console, HUB_CAPABILITY));
        assert_eq!(Principal::Console.name(), "CONSOLE");
    }
}
