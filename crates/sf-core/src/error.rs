use thiserror::Error;

/// Errors from parsing a textual gain expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("Unknown symbol '{name}' in expression '{input}'")]
    UnknownSymbol { name: String, input: String },

    #[error("Malformed expression '{input}': {reason}")]
    Malformed { input: String, reason: String },
}
