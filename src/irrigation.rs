//! The irrigation controller: soil moisture, temperature and weather in,
//! recommended water supply in minutes out.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::{RuleConfig, SystemConfig, VariableConfig};
use crate::defuzz::Defuzzifier;
use crate::dsl::{is, Expr};
use crate::error::{ConfigError, EvalError};
use crate::inference::InferenceEngine;
use crate::inputs::Inputs;
use crate::outputs::Outputs;

pub const SOIL_MOISTURE: &str = "soil_moisture";
pub const TEMPERATURE: &str = "temperature";
pub const WEATHER: &str = "weather";
pub const WATER_SUPPLY: &str = "water_supply";

pub const SOIL_MOISTURE_RANGE: (f64, f64) = (0., 100.);
pub const TEMPERATURE_RANGE: (f64, f64) = (0., 40.);

/// The discrete weather category, fed to the engine as its index.
///
/// The weather terms are triangles over a continuous 0..2 universe ("cloudy"
/// spans 0.5..1.5), so a non-integer crisp value such as 0.7 is partly rainy
/// and partly cloudy. This type only ever yields 0, 1 or 2, but the engine
/// itself accepts any real.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weather {
    Rainy = 0,
    Cloudy = 1,
    Sunny = 2,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Rainy, Weather::Cloudy, Weather::Sunny];

    pub fn crisp(self) -> f64 {
        self as u8 as f64
    }

    pub fn term(self) -> &'static str {
        match self {
            Weather::Rainy => "rainy",
            Weather::Cloudy => "cloudy",
            Weather::Sunny => "sunny",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.term())
    }
}

impl TryFrom<u8> for Weather {
    type Error = ReadingError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Weather::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| ReadingError::Weather(index.to_string()))
    }
}

impl FromStr for Weather {
    type Err = ReadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rainy" | "0" => Ok(Weather::Rainy),
            "cloudy" | "1" => Ok(Weather::Cloudy),
            "sunny" | "2" => Ok(Weather::Sunny),
            other => Err(ReadingError::Weather(other.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ReadingError {
    #[error("Soil Moisture should be between 0 and 100.")]
    SoilMoisture(f64),
    #[error("Temperature should be between 0 and 40.")]
    Temperature(f64),
    #[error("Weather should be Rainy, Cloudy, or Sunny.")]
    Weather(String),
}

/// A range-checked sensor reading. Building one is the front end's job; the
/// engine never rejects out-of-range values itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IrrigationReading {
    soil_moisture: f64,
    temperature: f64,
    weather: Weather,
}

impl IrrigationReading {
    pub fn new(soil_moisture: f64, temperature: f64, weather: Weather) -> Result<Self, ReadingError> {
        if !in_range(soil_moisture, SOIL_MOISTURE_RANGE) {
            return Err(ReadingError::SoilMoisture(soil_moisture));
        }
        if !in_range(temperature, TEMPERATURE_RANGE) {
            return Err(ReadingError::Temperature(temperature));
        }

        Ok(Self {
            soil_moisture,
            temperature,
            weather,
        })
    }

    pub fn soil_moisture(&self) -> f64 {
        self.soil_moisture
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn inputs(&self) -> Inputs {
        let mut inputs = Inputs::new();

        inputs
            .add(SOIL_MOISTURE, self.soil_moisture)
            .add(TEMPERATURE, self.temperature)
            .add(WEATHER, self.weather.crisp());
        inputs
    }
}

fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    (min..=max).contains(&value)
}

fn all<const N: usize>(props: [(&str, &str); N]) -> Expr {
    Expr::all(props.map(|(variable, term)| is(variable, term)))
}

/// Variables and the 13 rules of the controller, water supply reduced with
/// `defuzzifier`.
pub fn config(defuzzifier: Defuzzifier) -> SystemConfig {
    let rule = |props: Expr, supply: &str| RuleConfig::new(props, WATER_SUPPLY, supply);

    SystemConfig::new()
        .variable(
            VariableConfig::antecedent(SOIL_MOISTURE, SOIL_MOISTURE_RANGE.0..=SOIL_MOISTURE_RANGE.1)
                .triangle("dry", 0., 0., 50.)
                .triangle("moderate", 30., 50., 70.)
                .triangle("wet", 50., 100., 100.),
        )
        .variable(
            VariableConfig::antecedent(TEMPERATURE, TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1)
                .triangle("low", 0., 0., 20.)
                .triangle("medium", 15., 25., 35.)
                .triangle("high", 30., 40., 40.),
        )
        .variable(
            VariableConfig::antecedent(WEATHER, 0. ..=2.)
                .triangle("rainy", 0., 0., 1.)
                .triangle("cloudy", 0.5, 1., 1.5)
                .triangle("sunny", 1.5, 2., 2.),
        )
        .variable(
            VariableConfig::consequent(WATER_SUPPLY, 0. ..=60.)
                .triangle("none", 0., 0., 15.)
                .triangle("low", 10., 20., 30.)
                .triangle("moderate", 25., 40., 50.)
                .triangle("high", 40., 60., 60.)
                .defuzzify_with(defuzzifier),
        )
        .rule(rule(all([(SOIL_MOISTURE, "dry"), (TEMPERATURE, "high"), (WEATHER, "sunny")]), "high"))
        .rule(rule(all([(SOIL_MOISTURE, "wet"), (WEATHER, "rainy")]), "none"))
        .rule(rule(all([(SOIL_MOISTURE, "moderate"), (WEATHER, "cloudy")]), "low"))
        .rule(rule(all([(SOIL_MOISTURE, "moderate"), (TEMPERATURE, "medium"), (WEATHER, "sunny")]), "moderate"))
        .rule(rule(all([(SOIL_MOISTURE, "dry"), (TEMPERATURE, "high")]), "high"))
        .rule(rule(all([(SOIL_MOISTURE, "dry"), (WEATHER, "sunny")]), "moderate"))
        .rule(rule(all([(SOIL_MOISTURE, "wet"), (TEMPERATURE, "low")]), "none"))
        .rule(rule(all([(SOIL_MOISTURE, "wet"), (WEATHER, "cloudy")]), "low"))
        .rule(rule(all([(SOIL_MOISTURE, "moderate"), (TEMPERATURE, "high")]), "moderate"))
        .rule(rule(all([(SOIL_MOISTURE, "dry"), (TEMPERATURE, "medium"), (WEATHER, "rainy")]), "low"))
        .rule(rule(all([(SOIL_MOISTURE, "wet"), (TEMPERATURE, "high"), (WEATHER, "sunny")]), "moderate"))
        .rule(rule(all([(SOIL_MOISTURE, "moderate"), (TEMPERATURE, "high"), (WEATHER, "rainy")]), "high"))
        .rule(rule(all([(SOIL_MOISTURE, "moderate"), (TEMPERATURE, "low"), (WEATHER, "sunny")]), "low"))
}

/// The controller with centroid defuzzification.
pub fn engine() -> Result<InferenceEngine, ConfigError> {
    config(Defuzzifier::Centroid).build()
}

/// Runs `reading` and returns the recommended water supply in minutes along
/// with the full diagnostics.
pub fn recommend(engine: &InferenceEngine, reading: &IrrigationReading) -> (Result<f64, EvalError>, Outputs) {
    let outputs = engine.evaluate(&reading.inputs());
    let supply = match outputs.outcome(WATER_SUPPLY) {
        Some(Ok(output)) => Ok(output.value),
        Some(Err(err)) => Err(err.clone()),
        None => Err(EvalError::UnknownVariable(WATER_SUPPLY.to_owned())),
    };

    (supply, outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_range_checks() {
        assert!(IrrigationReading::new(0., 0., Weather::Rainy).is_ok());
        assert!(IrrigationReading::new(100., 40., Weather::Sunny).is_ok());
        assert_eq!(
            IrrigationReading::new(100.5, 20., Weather::Sunny),
            Err(ReadingError::SoilMoisture(100.5))
        );
        assert_eq!(
            IrrigationReading::new(50., -1., Weather::Sunny),
            Err(ReadingError::Temperature(-1.))
        );
        assert!(IrrigationReading::new(f64::NAN, 20., Weather::Cloudy).is_err());
        assert_eq!(
            ReadingError::Temperature(45.).to_string(),
            "Temperature should be between 0 and 40."
        );
    }

    #[test]
    fn test_weather_category() {
        assert_eq!(Weather::Rainy.crisp(), 0.);
        assert_eq!(Weather::Sunny.crisp(), 2.);
        assert_eq!(Weather::try_from(1u8), Ok(Weather::Cloudy));
        assert!(Weather::try_from(3u8).is_err());
        assert_eq!("Sunny".parse::<Weather>(), Ok(Weather::Sunny));
        assert_eq!(" 0 ".parse::<Weather>(), Ok(Weather::Rainy));
        assert!("foggy".parse::<Weather>().is_err());
    }

    #[test]
    fn test_reading_inputs() {
        let inputs = IrrigationReading::new(10., 35., Weather::Cloudy).unwrap().inputs();

        assert_eq!(inputs.get(SOIL_MOISTURE), Some(10.));
        assert_eq!(inputs.get(TEMPERATURE), Some(35.));
        assert_eq!(inputs.get(WEATHER), Some(1.));
        assert_eq!(inputs.len(), 3);
    }

    #[test]
    fn test_engine_shape() {
        let engine = engine().unwrap();

        assert_eq!(engine.rules().len(), 13);
        assert_eq!(engine.variables().antecedents().count(), 3);
        assert_eq!(engine.variable(WATER_SUPPLY).unwrap().universe().len(), 61);
        assert_eq!(engine.variable(WEATHER).unwrap().universe().points(), &[0., 1., 2.]);
    }

    #[test]
    fn test_fractional_weather_is_partial() {
        let engine = engine().unwrap();
        let weather = engine.variable(WEATHER).unwrap();

        assert_eq!(weather.fuzzify("rainy", 0.7).unwrap(), 1. - 0.7);
        assert!((weather.fuzzify("cloudy", 0.7).unwrap() - 0.4).abs() < 1e-12);
        assert_eq!(weather.fuzzify("sunny", 0.7).unwrap(), 0.);
    }
}
