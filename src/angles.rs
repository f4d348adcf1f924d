use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::types::{PanelAngleSample, SunAngles, SunSample, SunVector};

pub const EARTH_AXIAL_TILT: f64 = 23.45;
pub const DEGREES_PER_HOUR: f64 = 15.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

// ── Approximate solar geometry ──

pub fn intermediate_angle_b(n: i32) -> f64 {
    deg_to_rad((n - 1) as f64 * (360.0 / 365.0))
}

/// Equation of time in minutes.
pub fn equation_of_time(n: i32) -> f64 {
    let b = intermediate_angle_b(n);
    229.18
        * (0.000075
            + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.040849 * (2.0 * b).sin())
}

/// Offset in hours from UTC to local solar time.
pub fn utc_lst_correction(longitude: f64, eot: f64) -> f64 {
    (4.0 * longitude + eot) / 60.0
}

pub fn hour_angle(local_solar_time: f64) -> f64 {
    DEGREES_PER_HOUR * (local_solar_time - 12.0)
}

pub fn solar_declination(n: i32) -> f64 {
    EARTH_AXIAL_TILT * deg_to_rad(360.0 * ((284 + n) as f64 / 365.0)).sin()
}

pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let cos_zenith =
        lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(cos_zenith.clamp(-1.0, 1.0).acos())
}

pub fn solar_azimuth(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_az = -dec_rad.cos() * ha_rad.sin();
    let cos_az = dec_rad.sin() * lat_rad.cos() - dec_rad.cos() * lat_rad.sin() * ha_rad.cos();
    normalize_angle(rad_to_deg(sin_az.atan2(cos_az)))
}

/// Low-precision sun position (about ±1°) from declination, equation of
/// time and hour angle. No refraction is applied.
pub fn approximate_position(latitude: f64, longitude: f64, utc: &DateTime<Utc>) -> SunAngles {
    let utc_hours =
        utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;
    let n = utc.ordinal() as i32;
    let decl = solar_declination(n);
    let correction = utc_lst_correction(longitude, equation_of_time(n));
    let lst = (utc_hours + correction).rem_euclid(24.0);
    let ha = hour_angle(lst);
    SunAngles {
        zenith: solar_zenith_angle(latitude, decl, ha),
        azimuth: solar_azimuth(latitude, decl, ha),
    }
}

// ── Sun vector and panel tilt ──

pub fn sun_vector(zenith: f64, azimuth: f64) -> SunVector {
    let zen = deg_to_rad(zenith);
    let az = deg_to_rad(azimuth);
    SunVector {
        x: zen.sin() * az.sin(),
        y: zen.sin() * az.cos(),
        z: zen.cos(),
    }
}

/// Tilts a sun-normal flat panel needs. `z == 0` is accepted and maps to ±90°.
pub fn panel_angles(sample: &SunSample) -> PanelAngleSample {
    let v = sample.vector;
    PanelAngleSample {
        timestamp: sample.timestamp,
        ew_tilt: rad_to_deg(v.x.atan2(v.z)),
        ns_tilt: rad_to_deg(v.y.atan2(v.z)),
        panel_tilt: sample.zenith,
        azimuth: sample.azimuth,
        dni: sample.dni,
        energy_wh: 0.0,
    }
}

pub fn derive_panel_angles(samples: &[SunSample]) -> Vec<PanelAngleSample> {
    samples.iter().map(panel_angles).collect()
}
