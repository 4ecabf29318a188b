//! sf-model: state-space model file format, parsing, and validation.

pub mod model;
pub mod parse;
pub mod schema;

pub use model::StateSpaceModel;
pub use parse::parse_model;
pub use schema::{RawModel, ScalarDef, VectorEntryDef};

use std::path::Path;

use sf_core::ExprError;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("Matrix A must contain at least one row")]
    EmptyMatrix,

    #[error("Matrix A must be square: {rows} rows, but row {row} has {cols} columns")]
    NotSquare { rows: usize, row: usize, cols: usize },

    #[error("Vector {field} must have length {expected}, got {got}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{field} entry {index} must be a scalar or single-element list")]
    BadVectorEntry { field: &'static str, index: usize },

    #[error("Failed to parse expression '{text}' in {field}: {source}")]
    Expr {
        text: String,
        field: &'static str,
        source: ExprError,
    },

    #[error("Unsupported input extension '{extension}'")]
    UnsupportedExtension { extension: String },

    #[error("Input file '{path}' is empty")]
    EmptyInput { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load and validate a model from a YAML or JSON file.
///
/// The input format is picked by file extension (`.yaml`/`.yml`/`.json`).
pub fn load_model(path: &Path) -> ModelResult<StateSpaceModel> {
    let raw = load_raw(path)?;
    parse_model(raw)
}

fn load_raw(path: &Path) -> ModelResult<RawModel> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(ModelError::EmptyInput {
            path: path.display().to_string(),
        });
    }
    match extension.as_str() {
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        "json" => Ok(serde_json::from_str(&content)?),
        other => Err(ModelError::UnsupportedExtension {
            extension: format!(".{other}"),
        }),
    }
}
