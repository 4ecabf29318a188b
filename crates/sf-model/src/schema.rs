//! Raw model file schema.
//!
//! This is the shape of the YAML/JSON input before expression parsing.
//! Unknown top-level fields are rejected by serde, so malformed input never
//! reaches the model constructor.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawModel {
    #[serde(default)]
    pub name: Option<String>,

    /// State matrix rows; must form a non-empty square matrix.
    #[serde(rename = "A")]
    pub a: Vec<Vec<ScalarDef>>,

    /// Input vector; scalars or single-element rows (column form).
    pub b: Vec<VectorEntryDef>,

    /// Output vector; scalars or single-element rows (row form).
    pub c: Vec<VectorEntryDef>,

    /// Feed-through gain; defaults to zero.
    #[serde(default)]
    pub d: Option<ScalarDef>,

    /// Symbol names that expression entries may reference.
    #[serde(default)]
    pub variables: Vec<String>,
}

/// A matrix/vector entry: a plain number or a symbolic expression string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScalarDef {
    Number(f64),
    Text(String),
}

/// A `b`/`c` entry: a scalar, or a one-element row as written in column form.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum VectorEntryDef {
    Scalar(ScalarDef),
    Row(Vec<ScalarDef>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_scalar_and_row_entries() {
        let raw: RawModel = serde_yaml::from_str(
            "A:\n  - [0, 1]\n  - [\"-a0\", \"-a1\"]\nb:\n  - [0]\n  - [1]\nc: [1, 0]\nvariables: [a0, a1]\n",
        )
        .unwrap();
        assert_eq!(raw.a.len(), 2);
        assert_eq!(raw.b[0], VectorEntryDef::Row(vec![ScalarDef::Number(0.0)]));
        assert_eq!(raw.c[1], VectorEntryDef::Scalar(ScalarDef::Number(0.0)));
        assert_eq!(raw.variables, vec!["a0", "a1"]);
        assert!(raw.name.is_none());
        assert!(raw.d.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_yaml::from_str::<RawModel>("A: [[0]]\nb: [1]\nc: [1]\nextra: 1\n")
            .unwrap_err();
        assert!(err.to_string().contains("extra"));
    }
}
