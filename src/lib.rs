pub mod aggregate;
pub mod angles;
pub mod clearsky;
pub mod config;
pub mod energy;
pub mod error;
pub mod export;
pub mod oracle;
pub mod orchestrator;
pub mod types;
pub mod vectors;

pub use aggregate::{analyze_location, daily_aggregates, monthly_aggregates, tilt_extremes};

pub use angles::{
    approximate_position, deg_to_rad, derive_panel_angles, equation_of_time,
    hour_angle, normalize_angle, panel_angles, rad_to_deg, solar_azimuth, solar_declination,
    solar_zenith_angle, sun_vector, DEGREES_PER_HOUR, EARTH_AXIAL_TILT,
};

pub use clearsky::{ineichen_dni, DEFAULT_LINKE_TURBIDITY};

pub use self::config::{load_run_config, validate_request, LocationConfig, RunConfig};

pub use energy::{integrate_energy, sample_energy_wh, total_energy_kwh, SAMPLE_INTERVAL_HOURS};

pub use error::{Error, OracleError, Result};

pub use export::{CsvWorkbook, ReportWriter};

pub use oracle::{AstronomicalOracle, ClearSkyOracle};

pub use orchestrator::{analyze, build_figure, merge_tables, run_analysis, summary_row};

pub use types::{
    AnalysisReport, AnalysisRequest, Figure, GlossaryEntry, Location, LocationAnalysis,
    PanelAngleSample, PanelSpec, PeriodAggregate, PositionModel, SeriesPoint, SummaryRow,
    SunAngles, SunSample, SunVector, TiltExtremes, WideRow, WideTable,
};

pub use vectors::{compute_solar_vectors, year_instants, SAMPLE_INTERVAL_MINUTES};
