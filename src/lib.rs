//! Mamdani fuzzy inference.
//!
//! Build [`LinguisticVariable`]s and [`Rules`] once, validate them into an
//! immutable [`InferenceEngine`], then evaluate any number of crisp input sets
//! against it, directly or through a [`Simulation`]:
//!
//! ```
//! use fuzzy_irrigation::{is, Consequence, InferenceEngine, Inputs, LinguisticVariable, MembershipFunction, Rules, Universe, Variables};
//!
//! let mut vars = Variables::new();
//! vars.add(
//!     LinguisticVariable::antecedent("soil_moisture", Universe::new(0., 100., 1.)?)
//!         .with_term("dry", MembershipFunction::triangular(0., 0., 50.)?)?,
//! )?;
//! vars.add(
//!     LinguisticVariable::consequent("water_supply", Universe::new(0., 60., 1.)?)
//!         .with_term("high", MembershipFunction::triangular(40., 60., 60.)?)?,
//! )?;
//!
//! let mut rules = Rules::new();
//! rules.add(is("soil_moisture", "dry"), Consequence::new("water_supply", "high"));
//!
//! let engine = InferenceEngine::new(vars, rules)?;
//! let mut inputs = Inputs::new();
//! inputs.add("soil_moisture", 10.);
//!
//! let minutes = engine.evaluate(&inputs).get_inferred_value("water_supply");
//! assert!(minutes.is_some_and(|m| m > 40. && m < 60.));
//! # Ok::<(), fuzzy_irrigation::FuzzyError>(())
//! ```

pub mod config;
mod defuzz;
mod dsl;
mod error;
mod inference;
mod inputs;
pub mod irrigation;
mod math;
mod membership;
mod outputs;
mod rules;
mod simulation;
mod universe;
mod variable;

pub use defuzz::{defuzzify, Defuzzifier, Defuzzify};
pub use dsl::{is, Expr};
pub use error::{ConfigError, DefuzzError, EvalError, FuzzyError};
pub use inference::{aggregate, Activation, InferenceEngine};
pub use inputs::Inputs;
pub use membership::{Gaussian, Membership, MembershipFunction, Piecewise, Trapezoidal, Triangular};
pub use outputs::{ConsequentOutput, FuzzySet, Outputs, RuleActivation};
pub use rules::{Consequence, Rule, Rules};
pub use simulation::{Simulation, SimulationState};
pub use universe::{Universe, MAX_POINTS};
pub use variable::{LinguisticVariable, VariableKey, VariableKind, Variables};
