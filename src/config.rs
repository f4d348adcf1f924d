use std::collections::HashSet;
use std::path::Path;

use chrono::{Datelike, FixedOffset, Utc};
use serde::Deserialize;

use crate::clearsky::DEFAULT_LINKE_TURBIDITY;
use crate::error::{Error, Result};
use crate::oracle::ClearSkyOracle;
use crate::types::{AnalysisRequest, Location, PanelSpec, PositionModel};

pub const MIN_YEAR: i32 = 1950;
pub const MAX_YEAR: i32 = 2100;
pub const MIN_UTC_OFFSET_HOURS: i32 = -12;
pub const MAX_UTC_OFFSET_HOURS: i32 = 14;
pub const MIN_ELEVATION_M: f64 = -500.0;
pub const MAX_ELEVATION_M: f64 = 9000.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_hours: i32,
    #[serde(default)]
    pub elevation_m: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_year")]
    pub year: i32,
    #[serde(default = "default_efficiency_percent")]
    pub efficiency_percent: f64,
    #[serde(default = "default_panel_area")]
    pub panel_area_m2: f64,
    #[serde(default = "default_linke_turbidity")]
    pub linke_turbidity: f64,
    #[serde(default)]
    pub position_model: PositionModel,
    #[serde(default)]
    pub locations: Vec<LocationConfig>,
}

fn default_year() -> i32 {
    Utc::now().year() - 1
}

fn default_efficiency_percent() -> f64 {
    20.0
}

fn default_panel_area() -> f64 {
    1.0
}

fn default_linke_turbidity() -> f64 {
    DEFAULT_LINKE_TURBIDITY
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
            efficiency_percent: default_efficiency_percent(),
            panel_area_m2: default_panel_area(),
            linke_turbidity: default_linke_turbidity(),
            position_model: PositionModel::default(),
            locations: Vec::new(),
        }
    }
}

pub fn load_run_config(path: &Path) -> Result<RunConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;

    Ok(settings.try_deserialize()?)
}

impl RunConfig {
    /// Validated request for the orchestrator. Nothing is computed when this fails.
    pub fn to_request(&self) -> Result<AnalysisRequest> {
        if !(self.efficiency_percent > 0.0 && self.efficiency_percent <= 100.0) {
            return Err(Error::InvalidInput(format!(
                "panel efficiency must be in (0, 100] percent, got {}",
                self.efficiency_percent
            )));
        }
        let locations = self
            .locations
            .iter()
            .map(|loc| -> Result<Location> {
                Ok(Location {
                    name: loc.name.trim().to_string(),
                    latitude: loc.latitude,
                    longitude: loc.longitude,
                    utc_offset: utc_offset(loc.utc_offset_hours).map_err(|e| {
                        Error::InvalidInput(format!("location '{}': {}", loc.name.trim(), e))
                    })?,
                    elevation_m: loc.elevation_m,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let request = AnalysisRequest {
            year: self.year,
            panel: PanelSpec {
                efficiency: self.efficiency_percent / 100.0,
                area_m2: self.panel_area_m2,
            },
            locations,
        };
        validate_request(&request)?;
        Ok(request)
    }

    pub fn oracle(&self) -> Result<ClearSkyOracle> {
        if !(self.linke_turbidity.is_finite() && self.linke_turbidity >= 1.0) {
            return Err(Error::InvalidInput(format!(
                "Linke turbidity must be at least 1, got {}",
                self.linke_turbidity
            )));
        }
        Ok(ClearSkyOracle::new(self.position_model, self.linke_turbidity))
    }
}

/// Fixed offset for a whole-hour UTC offset such as `+3` for GMT+3.
pub fn utc_offset(hours: i32) -> std::result::Result<FixedOffset, String> {
    if !(MIN_UTC_OFFSET_HOURS..=MAX_UTC_OFFSET_HOURS).contains(&hours) {
        return Err(format!(
            "UTC offset must be between {} and +{} hours, got {}",
            MIN_UTC_OFFSET_HOURS, MAX_UTC_OFFSET_HOURS, hours
        ));
    }
    FixedOffset::east_opt(hours * 3600).ok_or_else(|| format!("invalid UTC offset {}", hours))
}

pub fn validate_request(request: &AnalysisRequest) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&request.year) {
        return Err(Error::InvalidInput(format!(
            "year must be between {} and {}, got {}",
            MIN_YEAR, MAX_YEAR, request.year
        )));
    }
    let panel = &request.panel;
    if !(panel.efficiency > 0.0 && panel.efficiency <= 1.0) {
        return Err(Error::InvalidInput(format!(
            "panel efficiency must be a fraction in (0, 1], got {}",
            panel.efficiency
        )));
    }
    if !(panel.area_m2.is_finite() && panel.area_m2 > 0.0) {
        return Err(Error::InvalidInput(format!(
            "panel area must be positive, got {}",
            panel.area_m2
        )));
    }

    let mut seen = HashSet::new();
    for (i, loc) in request.locations.iter().enumerate() {
        if loc.name.trim().is_empty() {
            return Err(Error::InvalidInput(format!("location {} has no name", i + 1)));
        }
        // names become part of the export file names
        if loc.name.contains(['/', '\\']) {
            return Err(Error::InvalidInput(format!(
                "location name '{}' must not contain path separators",
                loc.name
            )));
        }
        if !seen.insert(loc.name.as_str()) {
            return Err(Error::InvalidInput(format!(
                "location name '{}' is used more than once",
                loc.name
            )));
        }
        if !(loc.latitude.is_finite() && (-90.0..=90.0).contains(&loc.latitude)) {
            return Err(Error::InvalidInput(format!(
                "location '{}': latitude must be between -90 and 90, got {}",
                loc.name, loc.latitude
            )));
        }
        if !(loc.longitude.is_finite() && (-180.0..=180.0).contains(&loc.longitude)) {
            return Err(Error::InvalidInput(format!(
                "location '{}': longitude must be between -180 and 180, got {}",
                loc.name, loc.longitude
            )));
        }
        if !(loc.elevation_m.is_finite()
            && (MIN_ELEVATION_M..=MAX_ELEVATION_M).contains(&loc.elevation_m))
        {
            return Err(Error::InvalidInput(format!(
                "location '{}': elevation must be between {} and {} m, got {}",
                loc.name, MIN_ELEVATION_M, MAX_ELEVATION_M, loc.elevation_m
            )));
        }
    }
    Ok(())
}
