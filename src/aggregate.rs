use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::types::{LocationAnalysis, PanelAngleSample, PeriodAggregate, TiltExtremes};

/// Running extrema and energy sum for one calendar bucket.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    ew_min: f64,
    ew_max: f64,
    ns_min: f64,
    ns_max: f64,
    tilt_min: f64,
    tilt_max: f64,
    energy_wh: f64,
}

impl Bucket {
    fn new(s: &PanelAngleSample) -> Self {
        Self {
            ew_min: s.ew_tilt,
            ew_max: s.ew_tilt,
            ns_min: s.ns_tilt,
            ns_max: s.ns_tilt,
            tilt_min: s.panel_tilt,
            tilt_max: s.panel_tilt,
            energy_wh: s.energy_wh,
        }
    }

    fn push(&mut self, s: &PanelAngleSample) {
        self.ew_min = self.ew_min.min(s.ew_tilt);
        self.ew_max = self.ew_max.max(s.ew_tilt);
        self.ns_min = self.ns_min.min(s.ns_tilt);
        self.ns_max = self.ns_max.max(s.ns_tilt);
        self.tilt_min = self.tilt_min.min(s.panel_tilt);
        self.tilt_max = self.tilt_max.max(s.panel_tilt);
        self.energy_wh += s.energy_wh;
    }

    fn into_aggregate(self, label: String) -> PeriodAggregate {
        PeriodAggregate {
            label,
            max_west_tilt: -self.ew_min,
            max_east_tilt: self.ew_max,
            max_south_tilt: -self.ns_min,
            max_north_tilt: self.ns_max,
            min_panel_tilt: self.tilt_min,
            max_panel_tilt: self.tilt_max,
            energy_kwh_total: self.energy_wh / 1000.0,
        }
    }
}

fn resample<K, F>(samples: &[PanelAngleSample], key: F) -> BTreeMap<K, Bucket>
where
    K: Ord,
    F: Fn(&PanelAngleSample) -> K,
{
    let mut buckets: BTreeMap<K, Bucket> = BTreeMap::new();
    for s in samples {
        buckets
            .entry(key(s))
            .and_modify(|b| b.push(s))
            .or_insert_with(|| Bucket::new(s));
    }
    buckets
}

/// Whole-run maxima. A location without any daylight sample yields NaN.
pub fn tilt_extremes(samples: &[PanelAngleSample]) -> TiltExtremes {
    let Some((first, rest)) = samples.split_first() else {
        return TiltExtremes {
            max_east_tilt: f64::NAN,
            max_west_tilt: f64::NAN,
            max_north_tilt: f64::NAN,
            max_south_tilt: f64::NAN,
            max_total_tilt: f64::NAN,
        };
    };
    let mut b = Bucket::new(first);
    for s in rest {
        b.push(s);
    }
    TiltExtremes {
        max_east_tilt: b.ew_max,
        max_west_tilt: -b.ew_min,
        max_north_tilt: b.ns_max,
        max_south_tilt: -b.ns_min,
        max_total_tilt: b.tilt_max,
    }
}

/// One row per local calendar day that has daylight samples, labelled `YYYY-MM-DD`.
/// Days without samples are absent, not zero-filled.
pub fn daily_aggregates(samples: &[PanelAngleSample]) -> Vec<PeriodAggregate> {
    resample(samples, |s| s.timestamp.date_naive())
        .into_iter()
        .map(|(day, b): (NaiveDate, Bucket)| b.into_aggregate(day.format("%Y-%m-%d").to_string()))
        .collect()
}

/// One row per local calendar month that has daylight samples, labelled `YYYY-MM`.
pub fn monthly_aggregates(samples: &[PanelAngleSample]) -> Vec<PeriodAggregate> {
    resample(samples, |s| (s.timestamp.year(), s.timestamp.month()))
        .into_iter()
        .map(|((year, month), b)| b.into_aggregate(format!("{:04}-{:02}", year, month)))
        .collect()
}

pub fn analyze_location(name: &str, samples: &[PanelAngleSample]) -> LocationAnalysis {
    LocationAnalysis {
        location: name.to_string(),
        extremes: tilt_extremes(samples),
        daily: daily_aggregates(samples),
        monthly: monthly_aggregates(samples),
    }
}
