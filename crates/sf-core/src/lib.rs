//! sf-core: stable foundation for sigflow.
//!
//! Contains:
//! - expr (small symbolic expression tree: parse, simplify, evaluate, render)
//! - numeric (significant-figure formatting for numeric gains)
//! - error (shared error types)

pub mod error;
pub mod expr;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::ExprError;
pub use expr::Expr;
pub use numeric::format_sig;
