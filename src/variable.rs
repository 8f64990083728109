use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};

use crate::defuzz::{Defuzzifier, Defuzzify};
use crate::error::{ConfigError, EvalError};
use crate::membership::{Membership, MembershipFunction};
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Receives a crisp input.
    Antecedent,
    /// Receives the aggregated output of the rules targeting it.
    Consequent,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Antecedent => "an antecedent",
            Self::Consequent => "a consequent",
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named quantity described by overlapping terms over a bounded universe.
#[derive(Clone, Debug)]
pub struct LinguisticVariable {
    name: String,
    kind: VariableKind,
    universe: Universe,
    terms: IndexMap<String, MembershipFunction>,
    defuzzifier: Option<Arc<dyn Defuzzify>>,
}

impl LinguisticVariable {
    pub fn antecedent(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Antecedent,
            universe,
            terms: IndexMap::new(),
            defuzzifier: None,
        }
    }

    /// A consequent reduced with [`Defuzzifier::Centroid`] unless replaced
    /// through [`with_defuzzifier`](Self::with_defuzzifier).
    pub fn consequent(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            kind: VariableKind::Consequent,
            universe,
            terms: IndexMap::new(),
            defuzzifier: Some(Arc::new(Defuzzifier::Centroid)),
        }
    }

    /// Has no effect on antecedents.
    pub fn with_defuzzifier(mut self, defuzzifier: impl Defuzzify + 'static) -> Self {
        if self.kind == VariableKind::Consequent {
            self.defuzzifier = Some(Arc::new(defuzzifier));
        }
        self
    }

    pub fn add_term(
        &mut self,
        name: impl Into<String>,
        membership: impl Into<MembershipFunction>,
    ) -> Result<&mut Self, ConfigError> {
        let name = name.into();

        if self.terms.contains_key(&name) {
            return Err(ConfigError::DuplicateTerm {
                variable: self.name.clone(),
                term: name,
            });
        }

        self.terms.insert(name, membership.into());

        Ok(self)
    }

    pub fn with_term(
        mut self,
        name: impl Into<String>,
        membership: impl Into<MembershipFunction>,
    ) -> Result<Self, ConfigError> {
        self.add_term(name, membership)?;
        Ok(self)
    }

    /// Degree to which `crisp_value` belongs to `term`.
    pub fn fuzzify(&self, term: &str, crisp_value: f64) -> Result<f64, EvalError> {
        self.terms
            .get(term)
            .map(|membership| membership.degree(crisp_value))
            .ok_or_else(|| EvalError::UnknownTerm {
                variable: self.name.clone(),
                term: term.to_owned(),
            })
    }

    /// Degree of every term, in definition order.
    pub fn fuzzify_all(&self, crisp_value: f64) -> Vec<(&str, f64)> {
        self.terms
            .iter()
            .map(|(name, membership)| (name.as_str(), membership.degree(crisp_value)))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn term(&self, name: &str) -> Option<&MembershipFunction> {
        self.terms.get(name)
    }

    pub fn has_term(&self, name: &str) -> bool {
        self.terms.contains_key(name)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &MembershipFunction)> {
        self.terms.iter().map(|(name, membership)| (name.as_str(), membership))
    }

    /// `None` for antecedents.
    pub fn defuzzifier(&self) -> Option<&dyn Defuzzify> {
        self.defuzzifier.as_deref()
    }
}

/// All linguistic variables of a system, unique by name and kept in
/// definition order.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    slots: SlotMap<VariableKey, LinguisticVariable>,
    by_name: HashMap<String, VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, variable: LinguisticVariable) -> Result<VariableKey, ConfigError> {
        if self.by_name.contains_key(variable.name()) {
            return Err(ConfigError::DuplicateVariable(variable.name.clone()));
        }

        let name = variable.name.clone();
        let key = self.slots.insert(variable);

        self.by_name.insert(name, key);

        Ok(key)
    }

    pub fn get(&self, key: VariableKey) -> Option<&LinguisticVariable> {
        self.slots.get(key)
    }

    pub fn key(&self, name: &str) -> Option<VariableKey> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&LinguisticVariable> {
        self.key(name).and_then(|key| self.slots.get(key))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    // Slots are never removed, so slot order is insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &LinguisticVariable)> {
        self.slots.iter()
    }

    pub fn antecedents(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.of_kind(VariableKind::Antecedent)
    }

    pub fn consequents(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.of_kind(VariableKind::Consequent)
    }

    fn of_kind(&self, kind: VariableKind) -> impl Iterator<Item = &LinguisticVariable> {
        self.slots.values().filter(move |var| var.kind == kind)
    }
}
