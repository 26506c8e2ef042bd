//! segwind CLI - Command-line interface for segment-wind
//!
//! Commands:
//! - scan: Match the wind forecast against every segment and report windows
//! - forecast: Print the normalized forecast
//! - segments: List segments with bearings and the gap to each record
//! - config: Print the effective configuration

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use segment_wind::adapters::{
    CsvSegmentSource, HttpForecastSource, ObservationSource, SegmentSource,
    DEFAULT_SEGMENTS_PATH,
};
use segment_wind::attempt::AttemptComparison;
use segment_wind::cache::{ttl_from_hours, CachedSource, DEFAULT_CACHE_TTL_HOURS};
use segment_wind::config::{self, Location, ScoringParams, Settings};
use segment_wind::scoring::{Weights, DEFAULT_DIRECTION_WEIGHT, DEFAULT_SPEED_WEIGHT};
use segment_wind::{pipeline, report, WindError, VERSION};

/// segwind - Find tailwind windows for segment record attempts
#[derive(Parser)]
#[command(name = "segwind")]
#[command(version = VERSION)]
#[command(about = "Match the wind forecast against segment bearings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report favorable wind windows for every segment
    Scan {
        #[command(flatten)]
        settings: SettingsArgs,

        #[command(flatten)]
        forecast: ForecastArgs,

        /// Segment list CSV
        #[arg(long, env = "SEGWIND_SEGMENTS", default_value = DEFAULT_SEGMENTS_PATH)]
        segments: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the normalized forecast
    Forecast {
        #[command(flatten)]
        settings: SettingsArgs,

        #[command(flatten)]
        forecast: ForecastArgs,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// List segments with bearings and record comparison
    Segments {
        /// Segment list CSV
        #[arg(long, env = "SEGWIND_SEGMENTS", default_value = DEFAULT_SEGMENTS_PATH)]
        segments: PathBuf,
    },

    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(Args)]
struct SettingsArgs {
    /// Minimum wind speed to consider (mph)
    #[arg(long, env = "SEGWIND_MIN_WIND_SPEED", default_value_t = config::DEFAULT_MIN_WIND_SPEED)]
    min_wind_speed: f64,

    /// Maximum degrees off a perfect tailwind
    #[arg(long, env = "SEGWIND_TOLERANCE", default_value_t = config::DEFAULT_DIRECTION_TOLERANCE)]
    tolerance: f64,

    /// Minimum favorability to report (percent)
    #[arg(long, env = "SEGWIND_QUALITY", default_value_t = config::DEFAULT_QUALITY_PERCENTAGE)]
    quality: u32,

    /// Wind speed at which the speed score saturates (mph)
    #[arg(long, env = "SEGWIND_TOP_WIND_SPEED", default_value_t = config::DEFAULT_TOP_WIND_SPEED)]
    top_wind_speed: f64,

    /// Weight of directional alignment in the overall score
    #[arg(long, env = "SEGWIND_DIRECTION_WEIGHT", default_value_t = DEFAULT_DIRECTION_WEIGHT)]
    direction_weight: f64,

    /// Weight of wind speed in the overall score
    #[arg(long, env = "SEGWIND_SPEED_WEIGHT", default_value_t = DEFAULT_SPEED_WEIGHT)]
    speed_weight: f64,

    /// Forecast latitude
    #[arg(long, env = "SEGWIND_LAT", default_value_t = config::DEFAULT_LATITUDE, allow_hyphen_values = true)]
    lat: f64,

    /// Forecast longitude
    #[arg(long, env = "SEGWIND_LON", default_value_t = config::DEFAULT_LONGITUDE, allow_hyphen_values = true)]
    lon: f64,

    /// Local timezone (IANA format, e.g., "America/New_York")
    #[arg(long, env = "SEGWIND_TIMEZONE", default_value = config::DEFAULT_TIMEZONE)]
    timezone: String,
}

impl SettingsArgs {
    fn into_settings(self) -> Result<Settings, WindError> {
        let settings = Settings {
            scoring: ScoringParams {
                min_wind_speed: self.min_wind_speed,
                direction_tolerance: self.tolerance,
                quality_percentage: self.quality,
                top_wind_speed: self.top_wind_speed,
                weights: Weights {
                    direction: self.direction_weight,
                    speed: self.speed_weight,
                },
            },
            location: Location {
                latitude: self.lat,
                longitude: self.lon,
                timezone: self.timezone,
            },
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Args)]
struct ForecastArgs {
    /// Forecast cache file
    #[arg(long, env = "SEGWIND_CACHE", default_value = ".segwind-forecast.json")]
    cache: PathBuf,

    /// Cache lifetime in hours
    #[arg(long, allow_hyphen_values = true, default_value_t = DEFAULT_CACHE_TTL_HOURS)]
    cache_ttl_hours: i64,

    /// Ignore the cache and fetch a fresh forecast
    #[arg(long)]
    refresh: bool,

    /// Skip the cache entirely
    #[arg(long)]
    no_cache: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Text,
    /// Pretty-printed JSON
    Json,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), WindError> {
    match cli.command {
        Commands::Scan {
            settings,
            forecast,
            segments,
            format,
        } => cmd_scan(settings.into_settings()?, &forecast, segments, format),

        Commands::Forecast {
            settings,
            forecast,
            format,
        } => cmd_forecast(settings.into_settings()?, &forecast, format),

        Commands::Segments { segments } => cmd_segments(segments),

        Commands::Config { settings } => {
            let settings = settings.into_settings()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}

fn observation_source(
    settings: &Settings,
    args: &ForecastArgs,
) -> Result<Box<dyn ObservationSource>, WindError> {
    let live = HttpForecastSource::from_env(settings.location.clone())?;
    if args.no_cache {
        return Ok(Box::new(live));
    }
    Ok(Box::new(
        CachedSource::new(live, &args.cache, settings.location.clone())
            .with_ttl(ttl_from_hours(args.cache_ttl_hours)?)
            .with_refresh(args.refresh),
    ))
}

fn cmd_scan(
    settings: Settings,
    forecast: &ForecastArgs,
    segments: PathBuf,
    format: OutputFormat,
) -> Result<(), WindError> {
    let source = observation_source(&settings, forecast)?;
    let reports =
        pipeline::scan_sources(&CsvSegmentSource::new(segments), source.as_ref(), &settings)?;

    match format {
        OutputFormat::Text => print!("{}", report::render_text(&reports, &settings.scoring)),
        OutputFormat::Json => println!("{}", report::render_json(&reports)?),
    }
    Ok(())
}

fn cmd_forecast(
    settings: Settings,
    forecast: &ForecastArgs,
    format: OutputFormat,
) -> Result<(), WindError> {
    let observations = observation_source(&settings, forecast)?.observations()?;

    match format {
        OutputFormat::Text => print!("{}", report::render_forecast(&observations)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&observations)?),
    }
    Ok(())
}

fn cmd_segments(path: PathBuf) -> Result<(), WindError> {
    let segments = CsvSegmentSource::new(path).segments()?;

    for segment in &segments {
        let gap = match AttemptComparison::for_segment(segment) {
            Ok(cmp) => format!(
                "record {:.1} mph, best {:.1} mph, gap {} min",
                cmp.record_speed, cmp.personal_speed, cmp.time_deficit
            ),
            Err(e) => format!("comparison unavailable: {}", e),
        };
        println!(
            "{:<32} {:>3} ({:>5.1}°) rank {:>4} | {}",
            segment.name,
            segment.direction.trim(),
            segment.bearing_degrees(),
            segment.personal_rank,
            gap
        );
    }
    Ok(())
}

// Error reporting

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<WindError> for CliError {
    fn from(e: WindError) -> Self {
        let (code, hint) = match &e {
            WindError::InvalidConfig(_) => ("INVALID_CONFIG", Some("Check thresholds and weights")),
            WindError::InvalidTimezone(_) => {
                ("INVALID_TIMEZONE", Some("Use an IANA name such as America/New_York"))
            }
            WindError::TimeParse(_) | WindError::DistanceParse(_) => {
                ("SEGMENT_DATA_ERROR", Some("Times are M:SS, distances \"<number> <unit>\""))
            }
            WindError::UnknownDirection(_) => ("UNKNOWN_DIRECTION", None),
            WindError::DateParseError(_) | WindError::JsonError(_) => {
                ("PAYLOAD_ERROR", Some("The provider response was not in the expected format"))
            }
            WindError::CsvError(_) => ("CSV_ERROR", Some("Check the segment list headers")),
            WindError::Io(_) => ("IO_ERROR", Some("Check file paths and permissions")),
            WindError::Http(_) | WindError::Upstream { .. } => {
                ("NETWORK_ERROR", Some("Check connectivity, or reuse a cached forecast"))
            }
            WindError::MissingApiKey(_) => {
                ("MISSING_API_KEY", Some("Export OPENWEATHER_API_KEY or add it to .env"))
            }
        };

        CliError {
            code: code.to_string(),
            message: e.to_string(),
            hint: hint.map(str::to_string),
        }
    }
}
