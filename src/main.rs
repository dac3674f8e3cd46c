use anyhow::{bail, Context, Result};
use campus_route::{
    sdk::config::ResolverConfig,
    sdk::routing::{
        geocode::DEFAULT_COUNTRY, isochrone::DEFAULT_RANGES_MINUTES, Credential, GeoPoint,
        HaversineProvider, RemoteOrsProvider, RouteResolver,
    },
    sdk::util::{log::init_logging, rate_limit::ors_limiter},
};
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Route distance, duration and path between the campus hospital and a pickup point
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a route from the hospital (or --from-*) to a pickup point
    Route {
        /// Pickup longitude
        #[arg(long, allow_negative_numbers = true, requires = "lat", conflicts_with = "place")]
        lon: Option<f64>,

        /// Pickup latitude
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,

        /// Pickup by name: a campus place, or geocoded with ORS
        #[arg(long, required_unless_present = "lon")]
        place: Option<String>,

        /// Origin longitude, defaults to the hospital
        #[arg(long, allow_negative_numbers = true, requires = "from_lat")]
        from_lon: Option<f64>,

        /// Origin latitude, defaults to the hospital
        #[arg(long, allow_negative_numbers = true, requires = "from_lon")]
        from_lat: Option<f64>,

        /// [Optional] Assumed average speed for the straight-line estimate
        #[arg(long)]
        speed_kmh: Option<f64>,

        /// [Optional] Per-provider request timeout in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,

        /// Skip both network providers
        #[arg(long)]
        offline: bool,

        /// Origin -> pickup -> origin, as an ambulance trip is logged
        #[arg(long)]
        round_trip: bool,
    },

    /// Look up a place name, campus places first, then OpenRouteService
    Geocode {
        text: String,

        /// ISO 3166-1 alpha-2 country to search in
        #[arg(long, default_value = DEFAULT_COUNTRY)]
        country: String,
    },

    /// Driving-time isochrones around the hospital, as GeoJSON
    Isochrones {
        /// Ranges in minutes
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_RANGES_MINUTES)]
        ranges: Vec<u32>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let mut config = ResolverConfig::from_env().context("Failed to load configuration")?;

    match cli.command {
        Command::Route {
            lon,
            lat,
            place,
            from_lon,
            from_lat,
            speed_kmh,
            timeout_secs,
            offline,
            round_trip,
        } => {
            let pickup = match (lon, lat, place) {
                (Some(lon), Some(lat), _) => {
                    GeoPoint::new(lon, lat).context("Invalid pickup point")?
                }
                (_, _, Some(name)) => locate(&config, &name, DEFAULT_COUNTRY)?,
                _ => bail!("Either --lon/--lat or --place is required"),
            };
            let origin = match (from_lon, from_lat) {
                (Some(lon), Some(lat)) => GeoPoint::new(lon, lat).context("Invalid origin point")?,
                _ => config.hospital,
            };
            if let Some(speed) = speed_kmh {
                config.speed_kmh = speed;
            }
            if let Some(secs) = timeout_secs {
                config.timeout = Duration::from_secs(secs);
            }

            let resolver = if offline {
                RouteResolver::offline(
                    HaversineProvider::new(config.speed_kmh, config.earth_radius_km)
                        .context("Invalid fallback settings")?,
                )
            } else {
                RouteResolver::from_config(&config).context("Failed to build resolver")?
            };

            let credential = config.ors_api_key.as_ref();
            let route = if round_trip {
                resolver.resolve_via(origin, pickup, origin, credential)
            } else {
                resolver.resolve(origin, pickup, credential)
            };
            log::info!(
                "Route from {} to {} via {}: {:.2} km, {:.1} min",
                origin,
                pickup,
                route.source,
                route.distance_km,
                route.duration_minutes
            );
            println!("{}", serde_json::to_string_pretty(&route)?);
        }

        Command::Geocode { text, country } => {
            let point = locate(&config, &text, &country)?;
            println!("{}", serde_json::to_string(&point)?);
        }

        Command::Isochrones { ranges } => {
            let credential = require_key(&config)?;
            let provider = ors_provider(&config)?;

            let collection = provider.fetch_isochrones(config.hospital, &ranges, credential)?;
            println!("{}", serde_json::to_string_pretty(&collection)?);
        }
    }

    Ok(())
}

fn locate(config: &ResolverConfig, name: &str, country: &str) -> Result<GeoPoint> {
    let provider = ors_provider(config)?;
    match provider
        .locate(name, country, config.ors_api_key.as_ref())
        .with_context(|| format!("Failed to look up \"{}\"", name))?
    {
        Some(point) => Ok(point),
        None => bail!("No geocode results for \"{}\"", name),
    }
}

fn require_key(config: &ResolverConfig) -> Result<&Credential> {
    config
        .ors_api_key
        .as_ref()
        .context("ORS_API_KEY must be set for this command")
}

fn ors_provider(config: &ResolverConfig) -> Result<RemoteOrsProvider> {
    Ok(
        RemoteOrsProvider::new(config.timeout, ors_limiter(config.ors_requests_per_minute))?
            .with_base_url(config.ors_base_url.as_str()),
    )
}
