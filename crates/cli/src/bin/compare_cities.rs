use anyhow::{Context, Result};
use clap::Parser;
use life_cost::LifeCostCalculator;
use models::ComparisonResult;
use std::path::PathBuf;

const DEFAULT_CITIES_FILE: &str = "data/cities.json";

#[derive(Parser, Debug)]
#[command(name = "compare-cities", about = "Compare the true cost of moving between two cities.")]
struct Args {
    /// Origin city, "City" or "City, Country"
    origin: String,

    /// Destination city, "City" or "City, Country"
    destination: String,

    /// Cities JSON file; defaults to settings.cities_file, then data/cities.json
    #[arg(short, long)]
    cities: Option<PathBuf>,

    /// Optional settings.json tuning the scoring model
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = settings_loader::load_settings_or_default(args.settings.as_ref())?;

    let cities_path = args
        .cities
        .clone()
        .or_else(|| settings.cities_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CITIES_FILE));
    let store = city_store::load_cities(&cities_path)?;
    if store.is_empty() {
        tracing::warn!(path = %cities_path.display(), "cities file has no records");
    }

    let calculator = LifeCostCalculator::with_settings(store, settings);
    let result = calculator
        .calculate_comparison(&args.origin, &args.destination)
        .with_context(|| format!("comparing {} -> {}", args.origin, args.destination))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }
    Ok(())
}

fn print_report(r: &ComparisonResult) {
    println!("{} -> {}", r.origin_city, r.destination_city);
    println!("==========================================");
    println!(
        "Cost of living : {:>7.1} -> {:>7.1}  ({:+.1})",
        r.origin_cost, r.destination_cost, r.cost_delta
    );
    println!(
        "AQI            : {:>7.1} -> {:>7.1}  ({:+.1})",
        r.origin_aqi, r.destination_aqi, r.aqi_delta
    );
    println!(
        "Life expectancy: {:>7.1} -> {:>7.1}  ({:+.2})",
        r.origin_life_exp, r.destination_life_exp, r.life_expectancy_delta
    );
    println!(
        "Health-adjusted life expectancy delta: {:+.3} years ({:?})",
        r.health_adjusted_life_exp_delta, r.data_quality
    );
    match r.cost_per_life_year {
        Some(v) => println!("Cost per life year: {:.2}", v),
        None => println!("Cost per life year: n/a"),
    }
    if let Some(value) = r.value_assessment {
        println!("Value assessment: {:?}", value);
    }
    println!("Recommendation score: {:.1} / 100", r.recommendation_score);

    let d = &r.analysis_details;
    for (title, lines) in [
        ("Primary factors", &d.primary_factors),
        ("Trade-offs", &d.trade_offs),
        ("Recommendations", &d.recommendations),
        ("Risk factors", &d.risk_factors),
    ] {
        if lines.is_empty() {
            continue;
        }
        println!();
        println!("{}:", title);
        for line in lines {
            println!("  - {}", line);
        }
    }
}
