//! Symbolic gain expressions.
//!
//! A small tagged-variant arithmetic tree: enough algebra for gain labels
//! (parse, simplify, zero test, numeric evaluation, infix rendering) without
//! pulling in a computer-algebra engine.

use core::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::ExprError;

/// A symbolic arithmetic expression.
///
/// Expressions are immutable value trees; all operations return new trees.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Sym(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Numeric constant.
    pub fn num(value: f64) -> Self {
        Expr::Num(value)
    }

    /// Named symbol.
    pub fn sym(name: impl Into<String>) -> Self {
        Expr::Sym(name.into())
    }

    /// The additive identity.
    pub fn zero() -> Self {
        Expr::Num(0.0)
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        Expr::Num(1.0)
    }

    fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Parse an infix expression over `+ - * / ^ ( )`, numbers, and the
    /// given symbol names. Identifiers outside `symbols` are rejected.
    pub fn parse(input: &str, symbols: &[String]) -> Result<Expr, ExprError> {
        let mut parser = Parser {
            input,
            symbols,
            chars: input.chars().peekable(),
        };
        let expr = parser.expr()?;
        parser.skip_ws();
        if let Some(ch) = parser.chars.peek() {
            return Err(ExprError::Malformed {
                input: input.to_string(),
                reason: format!("unexpected character '{ch}'"),
            });
        }
        Ok(expr)
    }

    /// True if the simplified expression is the additive identity.
    ///
    /// This normalizes first, so a gain that is expression-equal to zero
    /// (e.g. `a - a`) is detected, not just the literal `0`.
    pub fn is_zero(&self) -> bool {
        matches!(self.simplify(), Expr::Num(n) if n == 0.0)
    }

    /// True if the simplified expression is the multiplicative identity.
    pub fn is_one(&self) -> bool {
        matches!(self.simplify(), Expr::Num(n) if n == 1.0)
    }

    /// Evaluate to a finite number, or `None` if the tree holds symbols
    /// (or the arithmetic does not produce a finite value).
    pub fn eval(&self) -> Option<f64> {
        let value = match self {
            Expr::Num(n) => *n,
            Expr::Sym(_) => return None,
            Expr::Neg(e) => -e.eval()?,
            Expr::Add(l, r) => l.eval()? + r.eval()?,
            Expr::Sub(l, r) => l.eval()? - r.eval()?,
            Expr::Mul(l, r) => l.eval()? * r.eval()?,
            Expr::Div(l, r) => l.eval()? / r.eval()?,
            Expr::Pow(l, r) => l.eval()?.powf(r.eval()?),
        };
        value.is_finite().then_some(value)
    }

    /// Value-preserving normalization: constant folding plus the usual
    /// identity rules (x±0, x·0, x·1, x/1, 0/x, x−x, x^0, x^1, −(−x)).
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Num(_) | Expr::Sym(_) => self.clone(),
            Expr::Neg(e) => match e.simplify() {
                Expr::Num(n) => Expr::Num(-n),
                Expr::Neg(inner) => *inner,
                other => Expr::Neg(other.boxed()),
            },
            Expr::Add(l, r) => {
                let (l, r) = (l.simplify(), r.simplify());
                match (&l, &r) {
                    (Expr::Num(a), Expr::Num(b)) => Expr::Num(a + b),
                    (Expr::Num(z), _) if *z == 0.0 => r,
                    (_, Expr::Num(z)) if *z == 0.0 => l,
                    _ => Expr::Add(l.boxed(), r.boxed()),
                }
            }
            Expr::Sub(l, r) => {
                let (l, r) = (l.simplify(), r.simplify());
                if l == r {
                    return Expr::zero();
                }
                match (&l, &r) {
                    (Expr::Num(a), Expr::Num(b)) => Expr::Num(a - b),
                    (_, Expr::Num(z)) if *z == 0.0 => l,
                    (Expr::Num(z), _) if *z == 0.0 => Expr::Neg(r.boxed()).simplify(),
                    _ => Expr::Sub(l.boxed(), r.boxed()),
                }
            }
            Expr::Mul(l, r) => {
                let (l, r) = (l.simplify(), r.simplify());
                match (&l, &r) {
                    (Expr::Num(a), Expr::Num(b)) => Expr::Num(a * b),
                    (Expr::Num(z), _) | (_, Expr::Num(z)) if *z == 0.0 => Expr::zero(),
                    (Expr::Num(o), _) if *o == 1.0 => r,
                    (_, Expr::Num(o)) if *o == 1.0 => l,
                    _ => Expr::Mul(l.boxed(), r.boxed()),
                }
            }
            Expr::Div(l, r) => {
                let (l, r) = (l.simplify(), r.simplify());
                match (&l, &r) {
                    (Expr::Num(a), Expr::Num(b)) if *b != 0.0 => Expr::Num(a / b),
                    (Expr::Num(z), _) if *z == 0.0 => Expr::zero(),
                    (_, Expr::Num(o)) if *o == 1.0 => l,
                    _ => Expr::Div(l.boxed(), r.boxed()),
                }
            }
            Expr::Pow(l, r) => {
                let (l, r) = (l.simplify(), r.simplify());
                match (&l, &r) {
                    (Expr::Num(a), Expr::Num(b)) => Expr::Num(a.powf(*b)),
                    (_, Expr::Num(z)) if *z == 0.0 => Expr::one(),
                    (_, Expr::Num(o)) if *o == 1.0 => l,
                    (Expr::Num(o), _) if *o == 1.0 => Expr::one(),
                    _ => Expr::Pow(l.boxed(), r.boxed()),
                }
            }
        }
    }

    /// Binding strength for infix rendering.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Neg(_) => 3,
            Expr::Pow(..) => 4,
            Expr::Num(_) | Expr::Sym(_) => 5,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn operand(f: &mut fmt::Formatter<'_>, e: &Expr, min_prec: u8) -> fmt::Result {
            if e.precedence() < min_prec {
                write!(f, "(")?;
                write!(f, "{e}")?;
                write!(f, ")")
            } else {
                write!(f, "{e}")
            }
        }

        match self {
            Expr::Num(n) => {
                // Integral constants print without a decimal point, so the
                // unit gain renders as the literal "1".
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Expr::Sym(name) => write!(f, "{name}"),
            Expr::Neg(e) => {
                write!(f, "-")?;
                operand(f, e, 3)
            }
            Expr::Add(l, r) => {
                operand(f, l, 1)?;
                write!(f, " + ")?;
                operand(f, r, 2)
            }
            Expr::Sub(l, r) => {
                operand(f, l, 1)?;
                write!(f, " - ")?;
                operand(f, r, 2)
            }
            Expr::Mul(l, r) => {
                operand(f, l, 2)?;
                write!(f, "*")?;
                operand(f, r, 3)
            }
            Expr::Div(l, r) => {
                operand(f, l, 2)?;
                write!(f, "/")?;
                operand(f, r, 3)
            }
            Expr::Pow(l, r) => {
                operand(f, l, 5)?;
                write!(f, "^")?;
                operand(f, r, 4)
            }
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Neg(self.boxed())
    }
}

/// Recursive-descent parser.
///
/// Grammar:
///   expr  := term (('+'|'-') term)*
///   term  := unary (('*'|'/') unary)*
///   unary := '-' unary | power
///   power := atom ('^' unary)?      (right-associative)
///   atom  := number | ident | '(' expr ')'
struct Parser<'a> {
    input: &'a str,
    symbols: &'a [String],
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn expr(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.term()?;
        loop {
            self.skip_ws();
            match self.chars.peek() {
                Some('+') => {
                    self.chars.next();
                    lhs = Expr::Add(lhs.boxed(), self.term()?.boxed());
                }
                Some('-') => {
                    self.chars.next();
                    lhs = Expr::Sub(lhs.boxed(), self.term()?.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            self.skip_ws();
            match self.chars.peek() {
                Some('*') => {
                    self.chars.next();
                    lhs = Expr::Mul(lhs.boxed(), self.unary()?.boxed());
                }
                Some('/') => {
                    self.chars.next();
                    lhs = Expr::Div(lhs.boxed(), self.unary()?.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        self.skip_ws();
        if self.chars.peek() == Some(&'-') {
            self.chars.next();
            return Ok(Expr::Neg(self.unary()?.boxed()));
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.atom()?;
        self.skip_ws();
        if self.chars.peek() == Some(&'^') {
            self.chars.next();
            let exponent = self.unary()?;
            return Ok(Expr::Pow(base.boxed(), exponent.boxed()));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ExprError> {
        self.skip_ws();
        match self.chars.peek() {
            Some('(') => {
                self.chars.next();
                let inner = self.expr()?;
                self.skip_ws();
                if self.chars.next() != Some(')') {
                    return Err(self.malformed("missing closing parenthesis"));
                }
                Ok(inner)
            }
            Some(ch) if ch.is_ascii_digit() || *ch == '.' => self.number(),
            Some(ch) if ch.is_ascii_alphabetic() || *ch == '_' => self.ident(),
            Some(ch) => {
                let reason = format!("unexpected character '{ch}'");
                Err(self.malformed(&reason))
            }
            None => Err(self.malformed("unexpected end of input")),
        }
    }

    fn number(&mut self) -> Result<Expr, ExprError> {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                text.push(ch);
                self.chars.next();
            } else if ch == 'e' || ch == 'E' {
                // Exponent suffix, optionally signed.
                let mut lookahead = self.chars.clone();
                lookahead.next();
                match lookahead.peek() {
                    Some(next) if next.is_ascii_digit() || *next == '+' || *next == '-' => {
                        text.push(ch);
                        self.chars.next();
                        if let Some(&sign) = self.chars.peek().filter(|c| **c == '+' || **c == '-') {
                            text.push(sign);
                            self.chars.next();
                        }
                    }
                    _ => break,
                }
            } else {
                break;
            }
        }
        text.parse::<f64>()
            .map(Expr::Num)
            .map_err(|_| self.malformed(&format!("invalid number '{text}'")))
    }

    fn ident(&mut self) -> Result<Expr, ExprError> {
        let mut name = String::new();
        while let Some(ch) = self.chars.peek() {
            if ch.is_ascii_alphanumeric() || *ch == '_' {
                name.push(*ch);
                self.chars.next();
            } else {
                break;
            }
        }
        if self.symbols.iter().any(|s| s == &name) {
            Ok(Expr::Sym(name))
        } else {
            Err(ExprError::UnknownSymbol {
                name,
                input: self.input.to_string(),
            })
        }
    }

    fn skip_ws(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn malformed(&self, reason: &str) -> ExprError {
        ExprError::Malformed {
            input: self.input.to_string(),
            reason: reason.to_string(),
        }
    }
}
