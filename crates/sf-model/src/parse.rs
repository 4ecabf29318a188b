//! Raw schema -> validated model.

use sf_core::Expr;

use crate::model::{DEFAULT_MODEL_NAME, StateSpaceModel};
use crate::schema::{RawModel, ScalarDef, VectorEntryDef};
use crate::{ModelError, ModelResult};

/// Parse every entry of a raw model into expressions and construct the
/// validated [`StateSpaceModel`].
///
/// Expression strings may only reference the declared `variables`; anything
/// else fails with a field-tagged parse error. Dimension checks live in the
/// model constructor.
pub fn parse_model(raw: RawModel) -> ModelResult<StateSpaceModel> {
    let name = raw
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());
    let variables = raw.variables;

    let mut a = Vec::with_capacity(raw.a.len());
    for row in &raw.a {
        let mut entries = Vec::with_capacity(row.len());
        for def in row {
            entries.push(parse_scalar(def, "A", &variables)?);
        }
        a.push(entries);
    }

    let b = parse_vector(&raw.b, "b", &variables)?;
    let c = parse_vector(&raw.c, "c", &variables)?;
    let d = match &raw.d {
        Some(def) => parse_scalar(def, "d", &variables)?,
        None => Expr::zero(),
    };

    StateSpaceModel::new(name, a, b, c, d, variables)
}

fn parse_scalar(def: &ScalarDef, field: &'static str, variables: &[String]) -> ModelResult<Expr> {
    match def {
        ScalarDef::Number(value) => Ok(Expr::num(*value)),
        ScalarDef::Text(text) => {
            Expr::parse(text, variables).map_err(|source| ModelError::Expr {
                text: text.clone(),
                field,
                source,
            })
        }
    }
}

/// Flatten scalar-or-single-row entries, then parse each.
///
/// A vector written as one bracketed row (`c: [[1, 0]]`) flattens to that
/// row, so both row and column forms are accepted.
fn parse_vector(
    entries: &[VectorEntryDef],
    field: &'static str,
    variables: &[String],
) -> ModelResult<Vec<Expr>> {
    if let [VectorEntryDef::Row(row)] = entries {
        if row.len() > 1 {
            return row
                .iter()
                .map(|def| parse_scalar(def, field, variables))
                .collect();
        }
    }
    let mut parsed = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let def = match entry {
            VectorEntryDef::Scalar(def) => def,
            VectorEntryDef::Row(row) if row.len() == 1 => &row[0],
            VectorEntryDef::Row(_) => {
                return Err(ModelError::BadVectorEntry { field, index });
            }
        };
        parsed.push(parse_scalar(def, field, variables)?);
    }
    Ok(parsed)
}
