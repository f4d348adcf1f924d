use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use solar_tilt::config::{load_run_config, LocationConfig, RunConfig};
use solar_tilt::export::{CsvWorkbook, ReportWriter};
use solar_tilt::orchestrator::run_analysis;
use solar_tilt::types::PositionModel;

/// Sun-tracking panel tilt and clear-sky energy analysis
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// TOML run file with year, panel and [[locations]] entries
    #[arg(long, env = "SOLAR_TILT_CONFIG")]
    config: Option<PathBuf>,

    /// Output path; sheets are written as <stem>_<Sheet>.csv beside it
    #[arg(long, short)]
    output: PathBuf,

    /// Year to analyse (1950-2100); defaults to last year
    #[arg(long)]
    year: Option<i32>,

    /// Panel efficiency in percent (0 < value <= 100)
    #[arg(long)]
    efficiency: Option<f64>,

    /// Panel area in square meters
    #[arg(long)]
    panel_area: Option<f64>,

    /// Linke turbidity for the clear-sky model
    #[arg(long)]
    linke_turbidity: Option<f64>,

    /// Sun position model
    #[arg(long, value_parser = ["spa", "approximate"])]
    model: Option<String>,

    /// Extra location as NAME,LAT,LON,UTC_OFFSET[,ELEVATION_M]; repeatable
    #[arg(long = "location", allow_hyphen_values = true, value_parser = parse_location)]
    locations: Vec<LocationConfig>,
}

fn parse_location(s: &str) -> Result<LocationConfig, String> {
    let fields: Vec<&str> = s.split(',').map(str::trim).collect();
    if !(4..=5).contains(&fields.len()) {
        return Err(format!(
            "expected NAME,LAT,LON,UTC_OFFSET[,ELEVATION_M], got '{}'",
            s
        ));
    }
    let number = |field: &str, what: &str| -> Result<f64, String> {
        field
            .parse::<f64>()
            .map_err(|_| format!("{} '{}' is not a number", what, field))
    };
    Ok(LocationConfig {
        name: fields[0].to_string(),
        latitude: number(fields[1], "latitude")?,
        longitude: number(fields[2], "longitude")?,
        utc_offset_hours: fields[3]
            .parse()
            .map_err(|_| format!("UTC offset '{}' is not a whole number of hours", fields[3]))?,
        elevation_m: match fields.get(4) {
            Some(f) => number(*f, "elevation")?,
            None => 0.0,
        },
    })
}

fn resolve_config(args: &Args) -> anyhow::Result<RunConfig> {
    let mut cfg = match &args.config {
        Some(path) => load_run_config(path)
            .with_context(|| format!("reading run file {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(year) = args.year {
        cfg.year = year;
    }
    if let Some(efficiency) = args.efficiency {
        cfg.efficiency_percent = efficiency;
    }
    if let Some(area) = args.panel_area {
        cfg.panel_area_m2 = area;
    }
    if let Some(tl) = args.linke_turbidity {
        cfg.linke_turbidity = tl;
    }
    if let Some(model) = args.model.as_deref() {
        cfg.position_model = match model {
            "approximate" => PositionModel::Approximate,
            _ => PositionModel::Spa,
        };
    }
    cfg.locations.extend(args.locations.iter().cloned());
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = resolve_config(&args)?;
    let request = cfg.to_request().context("invalid run configuration")?;
    let oracle = cfg.oracle().context("invalid clear-sky settings")?;

    if request.locations.is_empty() {
        tracing::warn!("no locations given; the summary will be empty");
    }

    let report = run_analysis(&oracle, &request).context("analysis failed")?;
    let written = CsvWorkbook::new(&args.output)
        .write(&report)
        .context("export failed")?;

    for path in &written {
        println!("{}", path.display());
    }
    println!(
        "Values are clear-sky potentials for a {} m² sun-tracking panel.",
        request.panel.area_m2
    );
    Ok(())
}
