use crate::types::{PanelAngleSample, PanelSpec};
use crate::vectors::SAMPLE_INTERVAL_MINUTES;

/// Duration each sample stands for, in hours.
pub const SAMPLE_INTERVAL_HOURS: f64 = SAMPLE_INTERVAL_MINUTES as f64 / 60.0;

pub fn sample_energy_wh(dni: f64, panel: &PanelSpec, interval_hours: f64) -> f64 {
    dni * panel.efficiency * panel.area_m2 * interval_hours
}

/// Fills `energy_wh` on every sample, holding the instantaneous DNI
/// constant over the sampling interval.
pub fn integrate_energy(samples: &mut [PanelAngleSample], panel: &PanelSpec, interval_hours: f64) {
    for sample in samples.iter_mut() {
        sample.energy_wh = sample_energy_wh(sample.dni, panel, interval_hours);
    }
}

pub fn total_energy_kwh(samples: &[PanelAngleSample]) -> f64 {
    samples.iter().map(|s| s.energy_wh).sum::<f64>() / 1000.0
}
