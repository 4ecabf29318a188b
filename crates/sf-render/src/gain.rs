//! Edge gain display formatting.

use sf_core::{Expr, format_sig};

/// Render a gain expression for an edge label.
///
/// With `simplify`, the expression is normalized before display. With
/// `float_precision = Some(n)` a purely numeric expression is evaluated and
/// rendered to n significant figures; a non-numeric expression (or one that
/// does not evaluate to a finite value) falls back to its default string
/// form rather than failing.
///
/// Pure and stateless: identical inputs always produce identical strings.
pub fn format_gain(gain: &Expr, simplify: bool, float_precision: Option<usize>) -> String {
    let expr = if simplify { gain.simplify() } else { gain.clone() };
    if let Some(digits) = float_precision {
        if let Some(value) = expr.eval() {
            return format_sig(value, digits);
        }
    }
    expr.to_string()
}
