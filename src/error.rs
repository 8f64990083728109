use thiserror::Error;

/// Problems found while building an [`InferenceEngine`](crate::InferenceEngine).
///
/// Any of these aborts construction; no partially validated engine is returned.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("variable `{0}` is defined more than once")]
    DuplicateVariable(String),
    #[error("term `{term}` is defined more than once for variable `{variable}`")]
    DuplicateTerm { variable: String, term: String },
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
    #[error("variable `{variable}` has no term `{term}`")]
    UnknownTerm { variable: String, term: String },
    #[error("variable `{variable}` is {found} but is used as {expected}")]
    WrongVariableKind {
        variable: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid membership function: {0}")]
    InvalidMembership(String),
    #[error("invalid universe: {0}")]
    InvalidUniverse(String),
    #[error("rule {rule} has weight {weight}, expected a value in (0, 1]")]
    InvalidWeight { rule: usize, weight: f64 },
    #[error("rule {0} contains an AND/OR with no operands")]
    EmptyCombinator(usize),
}

/// Failures scoped to a single consequent variable during one evaluation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("no crisp input supplied for antecedent `{0}`")]
    MissingInput(String),
    #[error("crisp input {value} for `{variable}` is not a finite number")]
    NonFiniteInput { variable: String, value: f64 },
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
    #[error("variable `{variable}` has no term `{term}`")]
    UnknownTerm { variable: String, term: String },
    #[error("no rule produced output for `{0}`; crisp output cannot be calculated")]
    NoApplicableRule(String),
    #[error("cannot defuzzify `{variable}`: {source}")]
    Defuzzification { variable: String, source: DefuzzError },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Returned by a [`Defuzzify`](crate::Defuzzify) strategy.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DefuzzError {
    /// The aggregated set carries no mass to reduce.
    #[error("aggregated set has zero area")]
    EmptySet,
    #[error("aggregated set has {degrees} degrees for a universe of {points} points")]
    LengthMismatch { degrees: usize, points: usize },
}
