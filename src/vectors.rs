use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::angles;
use crate::error::{Error, OracleError, Result};
use crate::oracle::AstronomicalOracle;
use crate::types::{Location, SunSample};

pub const SAMPLE_INTERVAL_MINUTES: i64 = 10;

fn year_start(year: i32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| Error::InvalidInput(format!("year {} is not representable", year)))
}

/// UTC instants at the fixed sampling cadence covering `[year, year + 1)`.
pub fn year_instants(year: i32) -> Result<Vec<DateTime<Utc>>> {
    let start = year_start(year)?;
    let end = year_start(year + 1)?;
    let step = Duration::minutes(SAMPLE_INTERVAL_MINUTES);

    let capacity = ((end - start).num_minutes() / SAMPLE_INTERVAL_MINUTES) as usize;
    let mut instants = Vec::with_capacity(capacity);
    let mut t = start;
    while t < end {
        instants.push(t);
        t += step;
    }
    Ok(instants)
}

/// Daylight sun samples for `location` over `year`, ordered by time.
///
/// Instants where the oracle reports no direct irradiance are dropped.
pub fn compute_solar_vectors<O: AstronomicalOracle + ?Sized>(
    oracle: &O,
    location: &Location,
    year: i32,
) -> Result<Vec<SunSample>> {
    let instants = year_instants(year)?;
    let oracle_failure = |source: OracleError| Error::OracleFailure {
        location: location.name.clone(),
        source,
    };

    let positions = oracle
        .solar_position(location, &instants)
        .map_err(oracle_failure)?;
    if positions.len() != instants.len() {
        return Err(oracle_failure(OracleError::LengthMismatch {
            expected: instants.len(),
            actual: positions.len(),
        }));
    }
    let dni = oracle
        .clear_sky_dni(location, &instants, &positions)
        .map_err(oracle_failure)?;
    if dni.len() != instants.len() {
        return Err(oracle_failure(OracleError::LengthMismatch {
            expected: instants.len(),
            actual: dni.len(),
        }));
    }

    let samples: Vec<SunSample> = instants
        .iter()
        .zip(positions.iter().zip(dni.iter()))
        .filter(|(_, (_, dni))| **dni > 0.0)
        .map(|(t, (pos, &dni))| SunSample {
            timestamp: t.with_timezone(&location.utc_offset),
            zenith: pos.zenith,
            azimuth: pos.azimuth,
            dni,
            vector: angles::sun_vector(pos.zenith, pos.azimuth),
        })
        .collect();

    tracing::debug!(
        location = %location.name,
        instants = instants.len(),
        daylight = samples.len(),
        "computed solar vectors"
    );
    Ok(samples)
}
