/// Errors that can occur during registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("server already registered: {0}")]
    DuplicateServer(String),

    #[error("server not found: {0}")]
    ServerNotFound(String),

    #[error("server name cannot be empty")]
    EmptyName,
}
