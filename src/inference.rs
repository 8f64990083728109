use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, info, trace, warn};

use crate::error::{ConfigError, EvalError};
use crate::inputs::Inputs;
use crate::membership::Membership;
use crate::outputs::{ConsequentOutput, FuzzySet, Outputs, RuleActivation};
use crate::rules::{Rule, Rules};
use crate::variable::{LinguisticVariable, VariableKind, Variables};

/// A rule's firing strength and its consequent term clipped at that strength.
#[derive(Clone, Debug, PartialEq)]
pub struct Activation {
    pub firing_strength: f64,
    /// Sampled at the consequent universe's points.
    pub implicated: Vec<f64>,
}

/// Pointwise maximum of `sets`, each `len` long. All zeros when `sets` is empty.
pub fn aggregate<'s>(len: usize, sets: impl IntoIterator<Item = &'s [f64]>) -> Vec<f64> {
    sets.into_iter().fold(vec![0.; len], |mut agg, set| {
        for (acc, degree) in agg.iter_mut().zip(set) {
            *acc = f64::max(*acc, *degree);
        }
        agg
    })
}

/// A validated, immutable Mamdani system: min AND, max OR, min implication,
/// max aggregation, and a per-consequent defuzzifier.
///
/// Evaluation holds no state, so one engine can be shared across threads.
#[derive(Clone, Debug)]
pub struct InferenceEngine {
    vars: Variables,
    rules: Rules,
    unruled: Vec<String>,
}

impl InferenceEngine {
    /// Checks every rule against `vars` and fails on the first problem.
    ///
    /// A consequent that no rule targets is not an error; it is logged and
    /// listed by [`consequents_without_rules`](Self::consequents_without_rules).
    pub fn new(vars: Variables, rules: Rules) -> Result<Self, ConfigError> {
        for (i, rule) in rules.iter().enumerate() {
            validate_rule(&vars, i, rule)?;
        }

        let unruled: Vec<String> = vars
            .consequents()
            .filter(|var| !rules.iter().any(|rule| rule.consequence.variable == var.name()))
            .map(|var| var.name().to_owned())
            .collect();

        for name in &unruled {
            warn!(variable = %name, "consequent has no rule targeting it");
        }

        debug!(variables = vars.len(), rules = rules.len(), "inference engine built");

        Ok(Self { vars, rules, unruled })
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    pub fn variable(&self, name: &str) -> Option<&LinguisticVariable> {
        self.vars.by_name(name)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn consequents_without_rules(&self) -> &[String] {
        &self.unruled
    }

    /// Fires one rule: `weight * premise`, then clips the consequent term at
    /// that strength over the consequent's universe.
    pub fn activate(&self, rule: &Rule, inputs: &Inputs) -> Result<Activation, EvalError> {
        let consequence = &rule.consequence;
        let var = self
            .vars
            .by_name(&consequence.variable)
            .ok_or_else(|| EvalError::UnknownVariable(consequence.variable.clone()))?;
        let membership = var.term(&consequence.term).ok_or_else(|| EvalError::UnknownTerm {
            variable: consequence.variable.clone(),
            term: consequence.term.clone(),
        })?;
        let firing_strength = rule.weight * rule.premise.evaluate(&self.vars, inputs)?;
        let implicated = var
            .universe()
            .iter()
            .map(|x| f64::min(firing_strength, membership.degree(x)))
            .collect();

        Ok(Activation {
            firing_strength,
            implicated,
        })
    }

    /// Evaluates every consequent variable for `inputs`.
    ///
    /// Failures are collected per consequent; this never returns early.
    pub fn evaluate(&self, inputs: &Inputs) -> Outputs {
        let memberships = self
            .vars
            .antecedents()
            .filter_map(|var| {
                let Some(value) = inputs.get(var.name()) else {
                    warn!(variable = var.name(), "no crisp input supplied");
                    return None;
                };
                let degrees = var
                    .fuzzify_all(value)
                    .into_iter()
                    .map(|(term, degree)| (term.to_owned(), degree))
                    .collect();

                Some((var.name().to_owned(), degrees))
            })
            .collect::<IndexMap<_, _>>();

        let mut activations = Vec::with_capacity(self.rules.len());
        let mut failures: HashMap<&str, EvalError> = HashMap::new();

        for (i, rule) in self.rules.iter().enumerate() {
            match self.activate(rule, inputs) {
                Ok(activation) => {
                    trace!(rule = i, strength = activation.firing_strength, "{rule}");

                    let points = self
                        .vars
                        .by_name(&rule.consequence.variable)
                        .map(|var| var.universe().points().to_vec())
                        .unwrap_or_default();

                    activations.push(RuleActivation {
                        rule: i,
                        consequence: rule.consequence.clone(),
                        firing_strength: activation.firing_strength,
                        implicated: FuzzySet::new(points, activation.implicated),
                    });
                },
                Err(err) => {
                    debug!(rule = i, error = %err, "rule could not be evaluated");
                    failures.entry(rule.consequence.variable.as_str()).or_insert(err);
                },
            }
        }

        let outcomes = self
            .vars
            .consequents()
            .map(|var| {
                let outcome = match failures.remove(var.name()) {
                    Some(err) => Err(err),
                    None => self.reduce(var, &activations),
                };

                match &outcome {
                    Ok(output) => info!(variable = var.name(), value = output.value, "crisp output"),
                    Err(err) => warn!(variable = var.name(), error = %err, "no crisp output"),
                }

                (var.name().to_owned(), outcome)
            })
            .collect();

        Outputs {
            outcomes,
            activations,
            memberships,
        }
    }

    // Aggregates the activations targeting `var` and defuzzifies the result.
    fn reduce(&self, var: &LinguisticVariable, activations: &[RuleActivation]) -> Result<ConsequentOutput, EvalError> {
        let universe = var.universe();
        let aggregated = aggregate(
            universe.len(),
            activations
                .iter()
                .filter(|activation| activation.consequence.variable == var.name())
                .map(|activation| activation.implicated.degrees()),
        );

        if aggregated.iter().all(|degree| *degree == 0.) {
            return Err(EvalError::NoApplicableRule(var.name().to_owned()));
        }

        let defuzzifier = var
            .defuzzifier()
            .ok_or_else(|| EvalError::UnknownVariable(var.name().to_owned()))?;
        let value = defuzzifier
            .reduce(&aggregated, universe)
            .map_err(|source| EvalError::Defuzzification {
                variable: var.name().to_owned(),
                source,
            })?;

        Ok(ConsequentOutput {
            value,
            aggregated: FuzzySet::new(universe.points().to_vec(), aggregated),
        })
    }
}

fn validate_rule(vars: &Variables, index: usize, rule: &Rule) -> Result<(), ConfigError> {
    if !(rule.weight > 0. && rule.weight <= 1.) {
        return Err(ConfigError::InvalidWeight {
            rule: index,
            weight: rule.weight,
        });
    }

    if rule.premise.has_empty_combinator() {
        return Err(ConfigError::EmptyCombinator(index));
    }

    for (variable, term) in rule.premise.propositions() {
        resolve(vars, variable, term, VariableKind::Antecedent)?;
    }

    let consequence = &rule.consequence;

    resolve(vars, &consequence.variable, &consequence.term, VariableKind::Consequent)?;

    debug!(rule = index, "registered {rule}");

    Ok(())
}

fn resolve(vars: &Variables, variable: &str, term: &str, expected: VariableKind) -> Result<(), ConfigError> {
    let var = vars
        .by_name(variable)
        .ok_or_else(|| ConfigError::UnknownVariable(variable.to_owned()))?;

    if var.kind() != expected {
        return Err(ConfigError::WrongVariableKind {
            variable: variable.to_owned(),
            expected: expected.as_str(),
            found: var.kind().as_str(),
        });
    }

    if !var.has_term(term) {
        return Err(ConfigError::UnknownTerm {
            variable: variable.to_owned(),
            term: term.to_owned(),
        });
    }

    Ok(())
}
