//! Declarative construction of an [`InferenceEngine`].
//!
//! A [`SystemConfig`] lists variables with their universes and terms, and the
//! rules over them. [`SystemConfig::build`] validates everything at once and
//! either returns a ready engine or the first [`ConfigError`] found.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::defuzz::Defuzzifier;
use crate::dsl::Expr;
use crate::error::ConfigError;
use crate::inference::InferenceEngine;
use crate::membership::MembershipFunction;
use crate::rules::{Consequence, Rule, Rules};
use crate::universe::Universe;
use crate::variable::{LinguisticVariable, VariableKind, Variables};

/// Used when a variable does not set its own step.
pub const DEFAULT_STEP: f64 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Triangular(f64, f64, f64),
    Trapezoidal(f64, f64, f64, f64),
    Gaussian { mean: f64, sigma: f64 },
    Piecewise(Vec<(f64, f64)>),
}

impl Shape {
    pub fn build(&self) -> Result<MembershipFunction, ConfigError> {
        match self {
            Self::Triangular(a, b, c) => MembershipFunction::triangular(*a, *b, *c),
            Self::Trapezoidal(a, b, c, d) => MembershipFunction::trapezoidal(*a, *b, *c, *d),
            Self::Gaussian { mean, sigma } => MembershipFunction::gaussian(*mean, *sigma),
            Self::Piecewise(points) => MembershipFunction::piecewise(points.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TermConfig {
    pub name: String,
    pub shape: Shape,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableConfig {
    pub name: String,
    pub kind: VariableKind,
    pub universe_range: RangeInclusive<f64>,
    /// If the step value is not provided, it defaults to [`DEFAULT_STEP`]
    pub step: Option<f64>,
    pub terms: Vec<TermConfig>,
    /// Consequents only; `None` means centroid.
    pub defuzzifier: Option<Defuzzifier>,
}

impl VariableConfig {
    pub fn antecedent(name: impl Into<String>, universe_range: RangeInclusive<f64>) -> Self {
        Self::new(name, VariableKind::Antecedent, universe_range)
    }

    pub fn consequent(name: impl Into<String>, universe_range: RangeInclusive<f64>) -> Self {
        Self::new(name, VariableKind::Consequent, universe_range)
    }

    fn new(name: impl Into<String>, kind: VariableKind, universe_range: RangeInclusive<f64>) -> Self {
        Self {
            name: name.into(),
            kind,
            universe_range,
            step: None,
            terms: Vec::new(),
            defuzzifier: None,
        }
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn term(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.terms.push(TermConfig {
            name: name.into(),
            shape,
        });
        self
    }

    /// Shorthand for a [`Shape::Triangular`] term.
    pub fn triangle(self, name: impl Into<String>, a: f64, b: f64, c: f64) -> Self {
        self.term(name, Shape::Triangular(a, b, c))
    }

    pub fn defuzzify_with(mut self, defuzzifier: Defuzzifier) -> Self {
        self.defuzzifier = Some(defuzzifier);
        self
    }

    pub fn build(&self) -> Result<LinguisticVariable, ConfigError> {
        let universe = Universe::new(
            *self.universe_range.start(),
            *self.universe_range.end(),
            self.step.unwrap_or(DEFAULT_STEP),
        )?;
        let mut var = match self.kind {
            VariableKind::Antecedent => LinguisticVariable::antecedent(&self.name, universe),
            VariableKind::Consequent => LinguisticVariable::consequent(&self.name, universe)
                .with_defuzzifier(self.defuzzifier.unwrap_or_default()),
        };

        for term in &self.terms {
            let membership = term.shape.build().map_err(|err| match err {
                ConfigError::InvalidMembership(msg) => {
                    ConfigError::InvalidMembership(format!("{}[{}]: {msg}", self.name, term.name))
                },
                other => other,
            })?;

            var.add_term(&term.name, membership)?;
        }

        Ok(var)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RuleConfig {
    pub premise: Expr,
    pub consequence: Consequence,
    /// `None` means 1.
    pub weight: Option<f64>,
}

impl RuleConfig {
    pub fn new(premise: Expr, variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            premise,
            consequence: Consequence::new(variable, term),
            weight: None,
        }
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

impl From<RuleConfig> for Rule {
    fn from(config: RuleConfig) -> Self {
        Rule::weighted(config.premise, config.consequence, config.weight.unwrap_or(1.))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SystemConfig {
    pub variables: Vec<VariableConfig>,
    pub rules: Vec<RuleConfig>,
}

impl SystemConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(mut self, variable: VariableConfig) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn rule(mut self, rule: RuleConfig) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn build(&self) -> Result<InferenceEngine, ConfigError> {
        let mut vars = Variables::new();

        for config in &self.variables {
            let var = config.build()?;

            debug!(variable = var.name(), kind = %var.kind(), terms = config.terms.len(), "defined variable");
            vars.add(var)?;
        }

        let mut rules = Rules::with_capacity(self.rules.len());

        for rule in &self.rules {
            rules.push(rule.clone().into());
        }

        InferenceEngine::new(vars, rules)
    }
}
