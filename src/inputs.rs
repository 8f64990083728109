use std::collections::HashMap;

/// Crisp values for antecedent variables, by variable name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inputs(pub(crate) HashMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    /// Replaces any earlier value for `variable`.
    pub fn add(&mut self, variable: impl Into<String>, value: f64) -> &mut Self {
        self.0.insert(variable.into(), value);
        self
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.0.get(variable).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Inputs(iter.into_iter().map(|(name, value)| (name.into(), value)).collect())
    }
}
