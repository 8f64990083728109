use fuzzy_irrigation::irrigation::{self, IrrigationReading, Weather, SOIL_MOISTURE, TEMPERATURE, WATER_SUPPLY, WEATHER};
use fuzzy_irrigation::{Defuzzifier, EvalError, InferenceEngine, Inputs, Outputs, Simulation};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

fn run(engine: &InferenceEngine, soil_moisture: f64, temperature: f64, weather: Weather) -> (Result<f64, EvalError>, Outputs) {
    let reading = IrrigationReading::new(soil_moisture, temperature, weather).unwrap();

    irrigation::recommend(engine, &reading)
}

fn strengths(outputs: &Outputs) -> Vec<f64> {
    (0..13)
        .map(|i| outputs.activation(i).map_or(f64::NAN, |a| a.firing_strength))
        .collect()
}

#[test]
fn dry_hot_sunny_waters_heavily() {
    let engine = irrigation::engine().unwrap();
    let (supply, outputs) = run(&engine, 10., 35., Weather::Sunny);
    let strengths = strengths(&outputs);

    // dry = 0.8, high = 0.5, sunny = 1
    assert_eq!(strengths[0], 0.5);
    assert_eq!(strengths[4], 0.5);
    assert_eq!(strengths[5], 0.8);
    assert!(strengths.iter().enumerate().all(|(i, s)| [0, 4, 5].contains(&i) || *s == 0.));

    let minutes = supply.unwrap();

    // the clipped "high" mass pulls the result above the "moderate" peak
    assert_close(minutes, 43.69797421731124, 1e-6);
    assert!(minutes > 40.);
}

#[test]
fn wet_rainy_barely_waters() {
    let engine = irrigation::engine().unwrap();
    let (supply, outputs) = run(&engine, 80., 20., Weather::Rainy);

    // wet(80) = 0.6 caps the "none" rule
    assert_close(outputs.activation(1).unwrap().firing_strength, 0.6, 1e-12);
    assert_close(supply.unwrap(), 5.303030303030303, 1e-6);
}

#[test]
fn wettest_rainy_cold_day_is_near_none() {
    let engine = irrigation::engine().unwrap();
    let (supply, _) = run(&engine, 100., 0., Weather::Rainy);

    assert_close(supply.unwrap(), 4.666666666666666, 1e-6);
}

#[test]
fn moderate_medium_sunny_is_moderate() {
    let engine = irrigation::engine().unwrap();
    let (supply, outputs) = run(&engine, 50., 25., Weather::Sunny);
    let minutes = supply.unwrap();

    assert_eq!(outputs.activation(3).unwrap().firing_strength, 1.);
    assert_close(minutes, 38.333333333333336, 1e-6);
    assert!((35. ..=45.).contains(&minutes));
}

#[test]
fn zero_inputs_with_rain_have_no_applicable_rule() {
    let engine = irrigation::engine().unwrap();
    let (supply, outputs) = run(&engine, 0., 0., Weather::Rainy);

    // dry, low and rainy are all fully true, but no rule combines them
    assert_eq!(supply, Err(EvalError::NoApplicableRule(WATER_SUPPLY.into())));
    assert!(strengths(&outputs).iter().all(|s| *s == 0.));
    assert_eq!(
        outputs.memberships(SOIL_MOISTURE).unwrap()[0],
        ("dry".to_owned(), 1.)
    );
}

#[test]
fn zero_inputs_with_sun_fire_dry_sunny_rule() {
    let engine = irrigation::engine().unwrap();
    let (supply, outputs) = run(&engine, 0., 0., Weather::Sunny);
    let minutes = supply.unwrap();

    assert_eq!(outputs.activation(5).unwrap().firing_strength, 1.);
    assert!(minutes.is_finite());
    assert_close(minutes, 38.333333333333336, 1e-6);
}

#[test]
fn mixed_rules_aggregate() {
    let engine = irrigation::engine().unwrap();
    let (supply, outputs) = run(&engine, 40., 38., Weather::Rainy);
    let strengths = strengths(&outputs);

    assert_close(strengths[4], 0.2, 1e-12);
    assert_close(strengths[8], 0.5, 1e-12);
    assert_close(strengths[11], 0.5, 1e-12);
    assert_close(supply.unwrap(), 44.489224137931025, 1e-6);
}

#[test]
fn evaluation_is_repeatable() {
    let engine = irrigation::engine().unwrap();

    for weather in Weather::ALL {
        for (soil, temperature) in [(10., 35.), (45.5, 17.25), (72., 31.)] {
            let (first, first_outputs) = run(&engine, soil, temperature, weather);
            let (second, second_outputs) = run(&engine, soil, temperature, weather);

            assert_eq!(first, second);
            assert_eq!(first_outputs, second_outputs);
        }
    }
}

#[test]
fn outputs_stay_inside_universe() {
    let engine = irrigation::engine().unwrap();

    for soil in (0..=100).step_by(5) {
        for temperature in (0..=40).step_by(5) {
            for weather in Weather::ALL {
                match run(&engine, soil as f64, temperature as f64, weather).0 {
                    Ok(minutes) => assert!((0. ..=60.).contains(&minutes), "{minutes}"),
                    Err(err) => assert_eq!(err, EvalError::NoApplicableRule(WATER_SUPPLY.into())),
                }
            }
        }
    }
}

#[test]
fn fractional_weather_blends_categories() {
    let engine = irrigation::engine().unwrap();
    let mut sim = Simulation::new(&engine);

    sim.input(SOIL_MOISTURE, 50.).input(TEMPERATURE, 25.).input(WEATHER, 1.75);

    let outputs = sim.compute();

    // sunny(1.75) = 0.5 limits the moderate/medium/sunny rule
    assert_close(outputs.activation(3).unwrap().firing_strength, 0.5, 1e-12);
    // cloudy(1.75) = 0
    assert_eq!(outputs.activation(2).unwrap().firing_strength, 0.);
}

#[test]
fn defuzzifier_is_swappable() {
    let centroid = irrigation::engine().unwrap();
    let largest = irrigation::config(Defuzzifier::LargestOfMaximum).build().unwrap();
    let smallest = irrigation::config(Defuzzifier::SmallestOfMaximum).build().unwrap();

    // moderate term (25, 40, 50) fully fired: its maximum is the single point 40
    let (lom, _) = run(&largest, 50., 25., Weather::Sunny);
    let (som, _) = run(&smallest, 50., 25., Weather::Sunny);
    let (cog, _) = run(&centroid, 50., 25., Weather::Sunny);

    assert_eq!(lom, Ok(40.));
    assert_eq!(som, Ok(40.));
    assert!(cog.unwrap() < 40.);
}

#[test]
fn missing_weather_only_fails_water_supply() {
    let engine = irrigation::engine().unwrap();
    let mut inputs = Inputs::new();

    inputs.add(SOIL_MOISTURE, 10.).add(TEMPERATURE, 35.);

    let outputs = engine.evaluate(&inputs);

    assert_eq!(
        outputs.outcome(WATER_SUPPLY),
        Some(&Err(EvalError::MissingInput(WEATHER.into())))
    );
    // rules not touching weather still report their strength
    assert_eq!(outputs.activation(4).unwrap().firing_strength, 0.5);
    assert!(outputs.activation(0).is_none());
}

#[test]
fn shared_engine_across_threads() {
    let engine = irrigation::engine().unwrap();
    let cases = [(10., 35., Weather::Sunny), (80., 20., Weather::Rainy), (50., 25., Weather::Sunny)];

    std::thread::scope(|s| {
        let handles: Vec<_> = cases
            .iter()
            .map(|&(soil, temperature, weather)| {
                let engine = &engine;
                s.spawn(move || run(engine, soil, temperature, weather).0)
            })
            .collect();
        let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect();

        assert_close(results[0], 43.69797421731124, 1e-6);
        assert_close(results[1], 5.303030303030303, 1e-6);
        assert_close(results[2], 38.333333333333336, 1e-6);
    });
}
