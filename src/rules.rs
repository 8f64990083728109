use std::fmt;

use crate::dsl::Expr;

/// The `(variable, term)` a rule concludes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Consequence {
    pub variable: String,
    pub term: String,
}

impl Consequence {
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            term: term.into(),
        }
    }
}

impl fmt::Display for Consequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.variable, self.term)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub(crate) premise: Expr,
    pub(crate) consequence: Consequence,
    pub(crate) weight: f64,
}

impl Rule {
    pub fn new(premise: Expr, consequence: Consequence) -> Self {
        Self::weighted(premise, consequence, 1.)
    }

    /// `weight` scales the firing strength and must lie in `(0, 1]`; this is
    /// checked when the engine is built.
    pub fn weighted(premise: Expr, consequence: Consequence, weight: f64) -> Self {
        Self {
            premise,
            consequence,
            weight,
        }
    }

    pub fn premise(&self) -> &Expr {
        &self.premise
    }

    pub fn consequence(&self) -> &Consequence {
        &self.consequence
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} THEN {}", self.premise, self.consequence)?;
        if self.weight != 1. {
            write!(f, " WITH {}", self.weight)?;
        }
        Ok(())
    }
}

/// The ordered rule base.
#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, premise: Expr, consequence: Consequence) -> &mut Self {
        self.push(Rule::new(premise, consequence))
    }

    pub fn add_weighted(&mut self, premise: Expr, consequence: Consequence, weight: f64) -> &mut Self {
        self.push(Rule::weighted(premise, consequence, weight))
    }

    pub fn push(&mut self, rule: Rule) -> &mut Self {
        self.0.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }
}
