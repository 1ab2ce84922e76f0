use anyhow::{Result, anyhow};
use aqi_normalization::{
    AqiStandard, calculate_health_impact_score, calculate_pollutant_breakdown, get_aqi_category,
    normalize_existing_aqi,
};
use clap::Parser;
use models::PollutantReading;

#[derive(Parser, Debug)]
#[command(name = "aqi", about = "Standardize pollutant concentrations (µg/m³) to the EPA AQI.")]
struct Args {
    #[arg(long)]
    pm25: Option<f64>,
    #[arg(long)]
    pm10: Option<f64>,
    #[arg(long)]
    no2: Option<f64>,
    #[arg(long)]
    so2: Option<f64>,
    #[arg(long)]
    co: Option<f64>,
    #[arg(long)]
    o3: Option<f64>,

    /// Convert an existing AQI value instead of computing one
    #[arg(long, allow_negative_numbers = true)]
    convert: Option<f64>,

    /// Scale of the value passed to --convert (epa, china, india, eu)
    #[arg(long, default_value = "epa")]
    standard: String,
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

    if let Some(value) = args.convert {
        let epa = normalize_existing_aqi(value, &args.standard);
        let category = get_aqi_category(epa);
        println!(
            "{} AQI {:.1} ({:?}) = EPA AQI {:.1}: {} [{}]",
            args.standard,
            value,
            AqiStandard::parse(&args.standard),
            epa,
            category.label(),
            category.color()
        );
        return Ok(());
    }

    let reading = PollutantReading {
        pm25: args.pm25,
        pm10: args.pm10,
        no2: args.no2,
        so2: args.so2,
        co: args.co,
        o3: args.o3,
    };
    if reading.is_empty() {
        return Err(anyhow!("no pollutant given; pass at least one of --pm25 --pm10 --no2 --so2 --co --o3"));
    }

    tracing::debug!(?reading, "standardizing reading");
    let Some(breakdown) = calculate_pollutant_breakdown(&reading) else {
        tracing::warn!("every concentration was rejected");
        println!("No valid pollutant concentration; AQI unavailable");
        return Ok(());
    };

    for entry in &breakdown.individual {
        println!("  {:<5} AQI {:>6.1}", entry.pollutant, entry.aqi);
    }
    let category = get_aqi_category(breakdown.aqi);
    println!(
        "Standardized AQI {:.1} (dominant: {}) - {} [{}]",
        breakdown.aqi,
        breakdown.dominant,
        category.label(),
        category.color()
    );
    println!("{}", category.health_message());
    println!(
        "Health impact score: {:.1} / 100",
        calculate_health_impact_score(breakdown.aqi)
    );
    Ok(())
}
