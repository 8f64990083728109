use crate::inference::InferenceEngine;
use crate::inputs::Inputs;
use crate::outputs::Outputs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    /// Inputs may be set; nothing computed yet.
    Constructed,
    /// Diagnostics for the most recent [`Simulation::compute`] are available.
    Evaluated,
}

/// One set of crisp inputs run against a shared engine.
///
/// The engine is only borrowed; any number of simulations can use it at once.
/// Recomputing replaces the previous outputs.
#[derive(Debug)]
pub struct Simulation<'e> {
    engine: &'e InferenceEngine,
    inputs: Inputs,
    outputs: Option<Outputs>,
}

impl<'e> Simulation<'e> {
    pub fn new(engine: &'e InferenceEngine) -> Self {
        Self {
            engine,
            inputs: Inputs::new(),
            outputs: None,
        }
    }

    pub fn engine(&self) -> &'e InferenceEngine {
        self.engine
    }

    pub fn input(&mut self, variable: impl Into<String>, value: f64) -> &mut Self {
        self.inputs.add(variable, value);
        self
    }

    pub fn set_inputs(&mut self, inputs: Inputs) -> &mut Self {
        self.inputs = inputs;
        self
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Antecedents without a crisp value, in definition order.
    pub fn missing_inputs(&self) -> Vec<&'e str> {
        self.engine
            .variables()
            .antecedents()
            .map(|var| var.name())
            .filter(|name| self.inputs.get(name).is_none())
            .collect()
    }

    pub fn compute(&mut self) -> &Outputs {
        self.outputs.insert(self.engine.evaluate(&self.inputs))
    }

    pub fn state(&self) -> SimulationState {
        if self.outputs.is_some() {
            SimulationState::Evaluated
        } else {
            SimulationState::Constructed
        }
    }

    pub fn outputs(&self) -> Option<&Outputs> {
        self.outputs.as_ref()
    }

    pub fn output(&self, variable: &str) -> Option<f64> {
        self.outputs.as_ref()?.get_inferred_value(variable)
    }
}
