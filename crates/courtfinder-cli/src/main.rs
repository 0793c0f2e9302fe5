mod output;

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use courtfinder_core::{AppConfig, Coordinates, CourtType, SearchFilters};
use courtfinder_courts::CourtsClient;
use courtfinder_geocode::GeocodingClient;
use courtfinder_search::{
    LocationProvider, OrchestratorConfig, SearchOrchestrator, SearchRequest,
    StaticLocationProvider,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "courtfinder")]
#[command(about = "Find public sports courts near an address or a position")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for courts around a street address
    Search {
        /// Free-text address, e.g. "Dizengoff 100, Tel Aviv"
        address: String,
        #[command(flatten)]
        filters: FilterArgs,
        /// Print the full view state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search for courts around the current position
    Locate {
        /// Latitude of the current position
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude of the current position
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        #[command(flatten)]
        filters: FilterArgs,
        /// Print the full view state as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Court type: all, football, basketball, volleyball or multi-purpose
    #[arg(long = "type", default_value = "all")]
    court_type: CourtType,
    /// Surface text to match (e.g. "synthetic grass")
    #[arg(long, default_value = "")]
    surface: String,
    /// Only courts with lighting
    #[arg(long)]
    lighting: bool,
    /// Skip locations that mix court types
    #[arg(long)]
    exclude_mixed: bool,
    /// Number of courts to look for, 1 to 20 (defaults to COURTFINDER_DEFAULT_COUNT)
    #[arg(long)]
    count: Option<u32>,
}

impl FilterArgs {
    fn into_filters(self, default_count: u32) -> SearchFilters {
        SearchFilters {
            court_type: self.court_type,
            surface_text: self.surface,
            lighting_only: self.lighting,
            exclude_mixed_locations: self.exclude_mixed,
            desired_count: self.count.unwrap_or(default_count),
        }
        .normalized()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = courtfinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            address,
            filters,
            json,
        } => {
            let filters = filters.into_filters(config.default_count);
            let orchestrator = build_orchestrator(&config, StaticLocationProvider::unsupported())?;
            orchestrator
                .search(SearchRequest::address(address, filters))
                .await;
            output::print_state(&orchestrator.state(), json)?;
        }
        Commands::Locate {
            lat,
            lon,
            filters,
            json,
        } => {
            let position = match (lat, lon) {
                (Some(lat), Some(lon)) => {
                    Some(Coordinates::new(lat, lon).context("invalid --lat/--lon")?)
                }
                _ => None,
            };
            let filters = filters.into_filters(config.default_count);
            let orchestrator =
                build_orchestrator(&config, StaticLocationProvider::new(position))?;
            apply_filters(&orchestrator, filters).await;
            orchestrator.locate_me().await;
            output::print_state(&orchestrator.state(), json)?;
        }
    }

    Ok(())
}

fn build_orchestrator(
    config: &AppConfig,
    location: impl LocationProvider + 'static,
) -> anyhow::Result<SearchOrchestrator> {
    let geocoder =
        GeocodingClient::from_config(config).context("failed to build geocoding client")?;
    let courts = CourtsClient::from_config(config).context("failed to build courts client")?;
    tracing::debug!(
        geocoder_url = %config.geocoder_url,
        courts_api_url = %config.courts_api_url,
        "clients ready"
    );

    Ok(SearchOrchestrator::new(
        Arc::new(geocoder),
        Arc::new(location),
        Arc::new(courts),
        OrchestratorConfig::from_app_config(config),
    ))
}

/// Loads `filters` into the orchestrator's form state ahead of `locate_me`,
/// which searches with whatever the form currently holds.
async fn apply_filters(orchestrator: &SearchOrchestrator, filters: SearchFilters) {
    orchestrator.set_court_type(filters.court_type).await;
    orchestrator.set_surface_text(filters.surface_text);
    orchestrator.set_lighting_only(filters.lighting_only);
    orchestrator.set_exclude_mixed_locations(filters.exclude_mixed_locations);
    orchestrator.set_desired_count(filters.desired_count);
}

#[cfg(test)]
mod tests;
