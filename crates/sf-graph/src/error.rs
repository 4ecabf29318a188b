use thiserror::Error;

/// Graph configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unsupported graph style '{0}'")]
    UnsupportedStyle(String),
}
