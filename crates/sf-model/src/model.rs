//! Validated state-space model.

use sf_core::Expr;

use crate::{ModelError, ModelResult};

pub const DEFAULT_MODEL_NAME: &str = "state-space-model";

/// An immutable linear state-space realisation
/// (ẋ = A·x + b·u, y = c·x + d·u).
///
/// Dimension invariants are enforced by [`StateSpaceModel::new`]; once
/// constructed the model cannot be mutated, so downstream consumers never
/// re-validate.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpaceModel {
    name: String,
    a: Vec<Vec<Expr>>,
    b: Vec<Expr>,
    c: Vec<Expr>,
    d: Expr,
    variables: Vec<String>,
}

impl StateSpaceModel {
    /// Validate dimensions and construct the model.
    ///
    /// A must be non-empty and square; b and c must each have exactly
    /// `order` entries.
    pub fn new(
        name: impl Into<String>,
        a: Vec<Vec<Expr>>,
        b: Vec<Expr>,
        c: Vec<Expr>,
        d: Expr,
        variables: Vec<String>,
    ) -> ModelResult<Self> {
        let n = a.len();
        if n == 0 {
            return Err(ModelError::EmptyMatrix);
        }
        for (row, entries) in a.iter().enumerate() {
            if entries.len() != n {
                return Err(ModelError::NotSquare {
                    rows: n,
                    row,
                    cols: entries.len(),
                });
            }
        }
        if b.len() != n {
            return Err(ModelError::WrongLength {
                field: "b",
                expected: n,
                got: b.len(),
            });
        }
        if c.len() != n {
            return Err(ModelError::WrongLength {
                field: "c",
                expected: n,
                got: c.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            a,
            b,
            c,
            d,
            variables,
        })
    }

    /// Model order n (the number of states).
    pub fn order(&self) -> usize {
        self.a.len()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry A[row][col].
    pub fn a(&self, row: usize, col: usize) -> &Expr {
        &self.a[row][col]
    }

    /// Entry b[row].
    pub fn b(&self, row: usize) -> &Expr {
        &self.b[row]
    }

    /// Entry c[col].
    pub fn c(&self, col: usize) -> &Expr {
        &self.c[col]
    }

    /// Feed-through gain d.
    pub fn d(&self) -> &Expr {
        &self.d
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Display name for the given zero-based state index.
    pub fn state_name(&self, index: usize) -> String {
        format!("x{}", index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exprs(values: &[f64]) -> Vec<Expr> {
        values.iter().map(|v| Expr::num(*v)).collect()
    }

    #[test]
    fn construction_enforces_square_a() {
        let err = StateSpaceModel::new(
            "bad",
            vec![vec![Expr::zero(), Expr::one()]],
            exprs(&[1.0]),
            exprs(&[1.0]),
            Expr::zero(),
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::NotSquare { rows: 1, row: 0, cols: 2 }));
    }

    #[test]
    fn construction_enforces_vector_lengths() {
        let err = StateSpaceModel::new(
            "bad",
            vec![vec![Expr::zero()]],
            exprs(&[1.0, 2.0]),
            exprs(&[1.0]),
            Expr::zero(),
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ModelError::WrongLength {
                field: "b",
                expected: 1,
                got: 2
            }
        ));
    }

    #[test]
    fn order_and_state_names() {
        let model = StateSpaceModel::new(
            "demo",
            vec![
                vec![Expr::zero(), Expr::one()],
                vec![Expr::num(-2.0), Expr::num(-3.0)],
            ],
            exprs(&[0.0, 1.0]),
            exprs(&[1.0, 0.0]),
            Expr::zero(),
            vec![],
        )
        .unwrap();
        assert_eq!(model.order(), 2);
        assert_eq!(model.state_name(0), "x1");
        assert_eq!(model.state_name(1), "x2");
        assert_eq!(model.a(1, 0), &Expr::num(-2.0));
    }
}
