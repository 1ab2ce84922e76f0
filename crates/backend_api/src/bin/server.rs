use anyhow::Context;
use backend_api::{init_tracing, run_server, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Environment overrides with sane defaults
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);
    let settings_path = env::var("SETTINGS_PATH").ok().map(PathBuf::from);

    let settings = settings_loader::load_settings_with_fallback(settings_path.as_ref())
        .context("loading settings (check SETTINGS_PATH)")?
        .unwrap_or_default();

    let cities_path = env::var("CITIES_PATH")
        .ok()
        .or_else(|| settings.cities_file.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/cities.json"));

    if !cities_path.exists() {
        anyhow::bail!(
            "cities file not found at {}; set CITIES_PATH to an existing file",
            cities_path.display()
        );
    }

    let cities = city_store::load_cities(&cities_path)
        .with_context(|| format!("loading cities from {}", cities_path.display()))?;
    if cities.is_empty() {
        tracing::warn!("cities file is empty; every comparison will 404");
    }

    tracing::info!(
        cities = cities.len(),
        path = %cities_path.display(),
        "True Cost API starting"
    );

    let state = Arc::new(AppState::new(cities, settings));
    run_server(state, &host, port).await?;

    Ok(())
}
