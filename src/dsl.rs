use std::fmt;

use crate::error::EvalError;
use crate::inputs::Inputs;
use crate::variable::Variables;

/// An antecedent condition.
///
/// Leaves name a variable and one of its terms; they are resolved against the
/// engine's variable table, never owned. `And` takes the minimum of its
/// operands, `Or` the maximum and `Not` the complement.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Is { variable: String, term: String },
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
}

/// `variable IS term`
pub fn is(variable: impl Into<String>, term: impl Into<String>) -> Expr {
    Expr::Is {
        variable: variable.into(),
        term: term.into(),
    }
}

impl Expr {
    /// Appends to an existing `And` instead of nesting one.
    pub fn and(self, rhs: Expr) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            },
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    /// Appends to an existing `Or` instead of nesting one.
    pub fn or(self, rhs: Expr) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs);
                Expr::Or(exprs)
            },
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    pub fn all(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::And(exprs.into_iter().collect())
    }

    pub fn any(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Or(exprs.into_iter().collect())
    }

    /// Every `(variable, term)` leaf, left to right.
    pub fn propositions(&self) -> Vec<(&str, &str)> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<(&'p str, &'p str)>) {
            match expr {
                Expr::Is { variable, term } => out.push((variable.as_str(), term.as_str())),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }

    /// True if some `And`/`Or` in the tree has no operands.
    pub fn has_empty_combinator(&self) -> bool {
        match self {
            Expr::Is { .. } => false,
            Expr::And(exprs) | Expr::Or(exprs) => exprs.is_empty() || exprs.iter().any(Expr::has_empty_combinator),
            Expr::Not(expr) => expr.has_empty_combinator(),
        }
    }

    /// Degree in `[0, 1]` to which the condition holds for `inputs`.
    ///
    /// A NaN or infinite crisp input fails the whole condition.
    pub fn evaluate(&self, vars: &Variables, inputs: &Inputs) -> Result<f64, EvalError> {
        match self {
            Expr::Is { variable, term } => {
                let var = vars
                    .by_name(variable)
                    .ok_or_else(|| EvalError::UnknownVariable(variable.clone()))?;
                let value = inputs
                    .get(variable)
                    .ok_or_else(|| EvalError::MissingInput(variable.clone()))?;

                if !value.is_finite() {
                    return Err(EvalError::NonFiniteInput {
                        variable: variable.clone(),
                        value,
                    });
                }

                var.fuzzify(term, value)
            },
            Expr::And(exprs) => exprs.iter().try_fold(1., |acc: f64, expr| -> Result<f64, EvalError> {
                Ok(acc.min(expr.evaluate(vars, inputs)?))
            }),
            Expr::Or(exprs) => exprs.iter().try_fold(0., |acc: f64, expr| -> Result<f64, EvalError> {
                Ok(acc.max(expr.evaluate(vars, inputs)?))
            }),
            Expr::Not(expr) => Ok(1. - expr.evaluate(vars, inputs)?),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, exprs: &[Expr], op: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, expr) in exprs.iter().enumerate() {
                if i > 0 {
                    write!(f, " {op} ")?;
                }
                write!(f, "{expr}")?;
            }
            f.write_str(")")
        }

        match self {
            Expr::Is { variable, term } => write!(f, "{variable}[{term}]"),
            Expr::And(exprs) => join(f, exprs, "AND"),
            Expr::Or(exprs) => join(f, exprs, "OR"),
            Expr::Not(expr) => write!(f, "NOT {expr}"),
        }
    }
}
