//! Clear-sky direct normal irradiance
//!
//! Ineichen-Perez clear-sky model driven by the Kasten-Young air mass and the
//! Spencer extraterrestrial irradiance, evaluated on the apparent zenith.
//!
//! References:
//! - Ineichen, P. and Perez, R. (2002). "A new airmass independent formulation
//!   for the Linke turbidity coefficient"
//! - Kasten, F. and Young, A. T. (1989). "Revised optical air mass tables and
//!   approximation formula"
//! - Spencer, J. W. (1971). "Fourier series representation of the position of the sun"

use std::f64::consts::PI;

// ===================== CONSTANTS =====================

/// Solar constant in W/m²
pub const SOLAR_CONSTANT: f64 = 1366.1;

/// Linke turbidity used when no site value is configured.
/// Typical values: 2-3 for very clear, 4-6 for industrial areas
pub const DEFAULT_LINKE_TURBIDITY: f64 = 3.0;

/// Standard sea-level pressure in Pa
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;

// ===================== ATMOSPHERE =====================

/// Standard-atmosphere pressure (Pa) at `altitude_m` metres above sea level.
pub fn altitude_to_pressure(altitude_m: f64) -> f64 {
    100.0 * ((44331.514 - altitude_m) / 11880.516).powf(1.0 / 0.1902632)
}

/// Relative optical air mass (Kasten-Young 1989).
///
/// Returns `None` once the sun is at or below the horizon.
pub fn relative_air_mass(zenith_deg: f64) -> Option<f64> {
    if !(0.0..90.0).contains(&zenith_deg) {
        return None;
    }
    let zenith_rad = zenith_deg.to_radians();
    Some(1.0 / (zenith_rad.cos() + 0.50572 * (96.07995 - zenith_deg).powf(-1.6364)))
}

/// Pressure-corrected air mass.
pub fn absolute_air_mass(relative: f64, pressure_pa: f64) -> f64 {
    relative * pressure_pa / SEA_LEVEL_PRESSURE
}

/// Extraterrestrial normal irradiance corrected for Earth-Sun distance (W/m²).
pub fn extraterrestrial_irradiance(day_of_year: u32) -> f64 {
    let b = 2.0 * PI * (day_of_year as f64 - 1.0) / 365.0;

    let eccentricity_correction = 1.00011
        + 0.034221 * b.cos()
        + 0.00128 * b.sin()
        + 0.000719 * (2.0 * b).cos()
        + 0.000077 * (2.0 * b).sin();

    SOLAR_CONSTANT * eccentricity_correction
}

// ===================== INEICHEN-PEREZ =====================

/// Clear-sky DNI (W/m²) for a sun at `apparent_zenith_deg`.
///
/// # Arguments
/// * `apparent_zenith_deg` - refraction-corrected zenith angle
/// * `altitude_m` - site elevation above sea level
/// * `day_of_year` - 1-366
/// * `linke_turbidity` - atmospheric turbidity (typical 2-7)
///
/// # Returns
/// DNI in W/m²; exactly 0 when the sun is at or below the horizon.
pub fn ineichen_dni(
    apparent_zenith_deg: f64,
    altitude_m: f64,
    day_of_year: u32,
    linke_turbidity: f64,
) -> f64 {
    let Some(am_relative) = relative_air_mass(apparent_zenith_deg) else {
        return 0.0;
    };
    let am = absolute_air_mass(am_relative, altitude_to_pressure(altitude_m));
    let cos_zenith = apparent_zenith_deg.to_radians().cos().max(0.0);
    let i0 = extraterrestrial_irradiance(day_of_year);
    let tl = linke_turbidity;

    let fh1 = (-altitude_m / 8000.0).exp();
    let fh2 = (-altitude_m / 1250.0).exp();
    let cg1 = 5.09e-5 * altitude_m + 0.868;
    let cg2 = 3.92e-5 * altitude_m + 0.0387;

    let ghi = cg1 * i0 * cos_zenith * (-cg2 * am * (fh1 + fh2 * (tl - 1.0))).exp().max(0.0);

    // Beam normal clear-sky irradiance
    let b = 0.664 + 0.163 / fh1;
    let bnci = i0 * (b * (-0.09 * am * (tl - 1.0)).exp()).max(0.0);

    // Empirical cap derived from the global component
    let ratio = (1.0 - (0.1 - 0.2 * (-tl).exp()) / (0.1 + 0.882 / fh1)) / cos_zenith;
    let bnci_2 = ghi * ratio.clamp(0.0, 1e20);

    bnci.min(bnci_2)
}
