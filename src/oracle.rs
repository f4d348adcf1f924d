use chrono::{DateTime, Datelike, Utc};
use solar_positioning::{spa, time::DeltaT, RefractionCorrection};

use crate::angles;
use crate::clearsky;
use crate::error::OracleError;
use crate::types::{Location, PositionModel, SunAngles};

/// Temperature assumed for the refraction correction (°C).
const REFRACTION_TEMPERATURE: f64 = 12.0;

/// Source of solar positions and clear-sky irradiance.
///
/// Implementations must be deterministic: the same location and instants
/// always produce the same values.
pub trait AstronomicalOracle {
    /// Apparent zenith and azimuth for every instant, in the same order.
    fn solar_position(
        &self,
        location: &Location,
        instants: &[DateTime<Utc>],
    ) -> Result<Vec<SunAngles>, OracleError>;

    /// Clear-sky DNI (W/m²) for every instant, given the positions returned
    /// by [`AstronomicalOracle::solar_position`].
    fn clear_sky_dni(
        &self,
        location: &Location,
        instants: &[DateTime<Utc>],
        positions: &[SunAngles],
    ) -> Result<Vec<f64>, OracleError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearSkyOracle {
    pub model: PositionModel,
    pub linke_turbidity: f64,
}

impl Default for ClearSkyOracle {
    fn default() -> Self {
        Self {
            model: PositionModel::Spa,
            linke_turbidity: clearsky::DEFAULT_LINKE_TURBIDITY,
        }
    }
}

impl ClearSkyOracle {
    pub fn new(model: PositionModel, linke_turbidity: f64) -> Self {
        Self {
            model,
            linke_turbidity,
        }
    }

    fn spa_positions(
        &self,
        location: &Location,
        instants: &[DateTime<Utc>],
    ) -> Result<Vec<SunAngles>, OracleError> {
        let pressure_hpa = clearsky::altitude_to_pressure(location.elevation_m) / 100.0;
        let refraction = RefractionCorrection::new(pressure_hpa, REFRACTION_TEMPERATURE)?;
        instants
            .iter()
            .map(|t| -> Result<SunAngles, OracleError> {
                let delta_t = DeltaT::estimate_from_date_like(*t)?;
                let pos = spa::solar_position(
                    *t,
                    location.latitude,
                    location.longitude,
                    location.elevation_m,
                    delta_t,
                    Some(refraction),
                )?;
                Ok(SunAngles {
                    zenith: pos.zenith_angle(),
                    azimuth: pos.azimuth(),
                })
            })
            .collect()
    }
}

impl AstronomicalOracle for ClearSkyOracle {
    fn solar_position(
        &self,
        location: &Location,
        instants: &[DateTime<Utc>],
    ) -> Result<Vec<SunAngles>, OracleError> {
        match self.model {
            PositionModel::Spa => self.spa_positions(location, instants),
            PositionModel::Approximate => Ok(instants
                .iter()
                .map(|t| angles::approximate_position(location.latitude, location.longitude, t))
                .collect()),
        }
    }

    fn clear_sky_dni(
        &self,
        location: &Location,
        instants: &[DateTime<Utc>],
        positions: &[SunAngles],
    ) -> Result<Vec<f64>, OracleError> {
        if positions.len() != instants.len() {
            return Err(OracleError::LengthMismatch {
                expected: instants.len(),
                actual: positions.len(),
            });
        }
        Ok(instants
            .iter()
            .zip(positions)
            .map(|(t, pos)| {
                clearsky::ineichen_dni(
                    pos.zenith,
                    location.elevation_m,
                    t.ordinal(),
                    self.linke_turbidity,
                )
            })
            .collect())
    }
}
