//! Fuzzy irrigation controller
//!
//! Command-line front end: validates a sensor reading, runs it through the
//! controller and prints the recommended water supply.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use fuzzy_irrigation::irrigation::{self, IrrigationReading, Weather, WATER_SUPPLY};
use fuzzy_irrigation::{Defuzzifier, InferenceEngine, Membership, Outputs};

#[derive(Parser)]
#[command(name = "fuzzy-irrigation")]
#[command(version)]
#[command(about = "Recommends an irrigation duration from soil moisture, temperature and weather", long_about = None)]
struct Cli {
    /// Soil moisture, 0-100
    #[arg(short, long, allow_negative_numbers = true)]
    soil_moisture: f64,

    /// Temperature, 0-40
    #[arg(short, long, allow_negative_numbers = true)]
    temperature: f64,

    /// Weather category
    #[arg(short, long, value_enum)]
    weather: WeatherArg,

    /// Defuzzification method for the water supply
    #[arg(short, long, value_enum, default_value = "centroid")]
    defuzz: DefuzzArg,

    /// Print term memberships, rule firing strengths and the aggregated output set
    #[arg(long)]
    diagnostics: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum WeatherArg {
    Rainy,
    Cloudy,
    Sunny,
}

impl From<WeatherArg> for Weather {
    fn from(arg: WeatherArg) -> Self {
        match arg {
            WeatherArg::Rainy => Weather::Rainy,
            WeatherArg::Cloudy => Weather::Cloudy,
            WeatherArg::Sunny => Weather::Sunny,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DefuzzArg {
    Centroid,
    Area,
    Bisector,
    Mom,
    Som,
    Lom,
}

impl From<DefuzzArg> for Defuzzifier {
    fn from(arg: DefuzzArg) -> Self {
        match arg {
            DefuzzArg::Centroid => Defuzzifier::Centroid,
            DefuzzArg::Area => Defuzzifier::AreaCentroid,
            DefuzzArg::Bisector => Defuzzifier::Bisector,
            DefuzzArg::Mom => Defuzzifier::MeanOfMaximum,
            DefuzzArg::Som => Defuzzifier::SmallestOfMaximum,
            DefuzzArg::Lom => Defuzzifier::LargestOfMaximum,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .init();

    debug!("defining fuzzy variables and rules");
    let engine = irrigation::config(cli.defuzz.into())
        .build()
        .context("failed to build the irrigation rule base")?;

    let weather = Weather::from(cli.weather);
    info!(
        soil_moisture = cli.soil_moisture,
        temperature = cli.temperature,
        weather = %weather,
        "input values"
    );

    let reading = match IrrigationReading::new(cli.soil_moisture, cli.temperature, weather) {
        Ok(reading) => reading,
        Err(err) => {
            error!("invalid input: {err}");
            return Err(err).context("input error");
        },
    };

    let (supply, outputs) = irrigation::recommend(&engine, &reading);

    if cli.diagnostics {
        print_diagnostics(&engine, &outputs);
    }

    match supply {
        Ok(minutes) => {
            info!("simulation result: recommended water supply = {minutes:.2} minutes");
            println!("Recommended Water Supply: {minutes:.2} minutes");
            Ok(())
        },
        Err(err) => {
            error!("water supply not computed: {err}");
            println!("Recommended Water Supply: N/A");
            Err(err).context("error during simulation")
        },
    }
}

fn print_diagnostics(engine: &InferenceEngine, outputs: &Outputs) {
    for var in engine.variables().antecedents() {
        let Some(memberships) = outputs.memberships(var.name()) else {
            continue;
        };
        let terms: Vec<String> = memberships
            .iter()
            .map(|(term, degree)| format!("{term}={degree:.3}"))
            .collect();

        println!("{:<14} {}", var.name(), terms.join("  "));
    }

    println!();
    for (i, rule) in engine.rules().iter().enumerate() {
        let strength = outputs
            .activation(i)
            .map_or_else(|| "-".to_owned(), |a| format!("{:.3}", a.firing_strength));

        println!("rule {:>2}  {strength:>5}  {rule}", i + 1);
    }

    let Some(Ok(output)) = outputs.outcome(WATER_SUPPLY) else {
        return;
    };
    let Some(var) = engine.variable(WATER_SUPPLY) else {
        return;
    };

    println!();
    println!("{:>6}  {:>9}  terms", "x", "aggregate");
    for (x, degree) in output.aggregated.samples().step_by(5) {
        let terms: Vec<String> = var
            .terms()
            .map(|(name, membership)| format!("{name}={:.2}", membership.degree(x)))
            .collect();
        let bar = "#".repeat((degree * 40.).round() as usize);

        println!("{x:>6.1}  {degree:>9.3}  {:<40}  {}", bar, terms.join(" "));
    }
    println!();
}
