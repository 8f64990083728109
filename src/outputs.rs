use indexmap::IndexMap;

use crate::error::EvalError;
use crate::rules::Consequence;

/// A fuzzy set sampled at the points of a consequent's universe.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzySet {
    points: Vec<f64>,
    degrees: Vec<f64>,
}

impl FuzzySet {
    pub(crate) fn new(points: Vec<f64>, degrees: Vec<f64>) -> Self {
        debug_assert_eq!(points.len(), degrees.len());

        Self { points, degrees }
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn degrees(&self) -> &[f64] {
        &self.degrees
    }

    /// `(x, degree)` pairs, ready for plotting.
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied().zip(self.degrees.iter().copied())
    }

    pub fn height(&self) -> f64 {
        self.degrees.iter().copied().fold(0., f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.iter().all(|degree| *degree == 0.)
    }
}

/// What one rule contributed during an evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleActivation {
    /// Position of the rule in the rule base.
    pub rule: usize,
    pub consequence: Consequence,
    pub firing_strength: f64,
    /// The consequent term clipped at `firing_strength`.
    pub implicated: FuzzySet,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConsequentOutput {
    pub value: f64,
    pub aggregated: FuzzySet,
}

/// Result of evaluating every consequent variable for one set of inputs.
///
/// Each consequent carries its own outcome; one failing does not hide the
/// others.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outputs {
    pub(crate) outcomes: IndexMap<String, Result<ConsequentOutput, EvalError>>,
    pub(crate) activations: Vec<RuleActivation>,
    pub(crate) memberships: IndexMap<String, Vec<(String, f64)>>,
}

impl Outputs {
    /// The crisp value of `variable`, if it was computed.
    pub fn get_inferred_value(&self, variable: &str) -> Option<f64> {
        match self.outcomes.get(variable) {
            Some(Ok(output)) => Some(output.value),
            _ => None,
        }
    }

    pub fn outcome(&self, variable: &str) -> Option<&Result<ConsequentOutput, EvalError>> {
        self.outcomes.get(variable)
    }

    /// Outcomes in consequent definition order.
    pub fn outcomes(&self) -> impl Iterator<Item = (&str, &Result<ConsequentOutput, EvalError>)> {
        self.outcomes.iter().map(|(name, outcome)| (name.as_str(), outcome))
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &EvalError)> {
        self.outcomes
            .iter()
            .filter_map(|(name, outcome)| outcome.as_ref().err().map(|err| (name.as_str(), err)))
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.values().all(Result::is_ok)
    }

    /// Per-rule diagnostics in rule base order. Rules whose premise could not
    /// be evaluated are absent.
    pub fn activations(&self) -> &[RuleActivation] {
        &self.activations
    }

    pub fn activation(&self, rule: usize) -> Option<&RuleActivation> {
        self.activations.iter().find(|activation| activation.rule == rule)
    }

    /// Degree of each term of an antecedent for the supplied crisp value.
    pub fn memberships(&self, variable: &str) -> Option<&[(String, f64)]> {
        self.memberships.get(variable).map(Vec::as_slice)
    }
}
