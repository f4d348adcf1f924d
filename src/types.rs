use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset: FixedOffset,
    pub elevation_m: f64,
}

/// Apparent solar position for one instant, in degrees.
/// Azimuth is measured clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunAngles {
    pub zenith: f64,
    pub azimuth: f64,
}

/// Unit sun-direction vector in the local topocentric frame:
/// x toward east, y toward north, z toward the zenith.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunSample {
    pub timestamp: DateTime<FixedOffset>,
    pub zenith: f64,
    pub azimuth: f64,
    pub dni: f64,
    pub vector: SunVector,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelAngleSample {
    pub timestamp: DateTime<FixedOffset>,
    /// Positive = tilted toward east.
    pub ew_tilt: f64,
    /// Positive = tilted toward north.
    pub ns_tilt: f64,
    pub panel_tilt: f64,
    pub azimuth: f64,
    pub dni: f64,
    pub energy_wh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSpec {
    /// Conversion efficiency as a fraction in (0, 1].
    pub efficiency: f64,
    pub area_m2: f64,
}

impl Default for PanelSpec {
    fn default() -> Self {
        Self {
            efficiency: 0.20,
            area_m2: 1.0,
        }
    }
}

/// One row of the daily or monthly table. West and south hold the negated
/// minima of the signed tilts, so they read as magnitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodAggregate {
    pub label: String,
    pub max_west_tilt: f64,
    pub max_east_tilt: f64,
    pub max_south_tilt: f64,
    pub max_north_tilt: f64,
    pub min_panel_tilt: f64,
    pub max_panel_tilt: f64,
    pub energy_kwh_total: f64,
}

impl PeriodAggregate {
    pub const COLUMNS: [&'static str; 7] = [
        "max_west_tilt",
        "max_east_tilt",
        "max_south_tilt",
        "max_north_tilt",
        "min_panel_tilt",
        "max_panel_tilt",
        "energy_kwh_total",
    ];

    pub fn values(&self) -> [f64; 7] {
        [
            self.max_west_tilt,
            self.max_east_tilt,
            self.max_south_tilt,
            self.max_north_tilt,
            self.min_panel_tilt,
            self.max_panel_tilt,
            self.energy_kwh_total,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltExtremes {
    pub max_east_tilt: f64,
    pub max_west_tilt: f64,
    pub max_north_tilt: f64,
    pub max_south_tilt: f64,
    pub max_total_tilt: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationAnalysis {
    pub location: String,
    pub extremes: TiltExtremes,
    pub daily: Vec<PeriodAggregate>,
    pub monthly: Vec<PeriodAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Max East Tilt (deg)")]
    pub max_east_tilt: f64,
    #[serde(rename = "Max West Tilt (deg)")]
    pub max_west_tilt: f64,
    #[serde(rename = "Max North Tilt (deg)")]
    pub max_north_tilt: f64,
    #[serde(rename = "Max South Tilt (deg)")]
    pub max_south_tilt: f64,
    #[serde(rename = "Max Total Tilt (deg)")]
    pub max_total_tilt: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// Per-location tables merged side by side on their label index.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    pub index_name: &'static str,
    pub columns: Vec<String>,
    pub rows: Vec<WideRow>,
}

impl WideTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, label: &str, column: &str) -> Option<f64> {
        let idx = self.column_index(column)?;
        self.rows
            .iter()
            .find(|r| r.label == label)
            .and_then(|r| r.values[idx])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlossaryEntry {
    #[serde(rename = "Column")]
    pub column: &'static str,
    #[serde(rename = "Description")]
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: DateTime<FixedOffset>,
    pub value: f64,
}

/// Data behind the three-panel chart drawn for each location.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub location: String,
    pub east_west: Vec<SeriesPoint>,
    pub north_south: Vec<SeriesPoint>,
    pub daily_energy: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionModel {
    /// NREL Solar Position Algorithm with refraction.
    #[default]
    Spa,
    /// Declination and equation-of-time approximation.
    Approximate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub year: i32,
    pub panel: PanelSpec,
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub year: i32,
    pub summary: Vec<SummaryRow>,
    pub daily: WideTable,
    pub monthly: WideTable,
    pub glossary: Vec<GlossaryEntry>,
    pub figures: Vec<Figure>,
    pub analyses: Vec<LocationAnalysis>,
}
