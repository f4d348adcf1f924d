use std::collections::BTreeMap;

use crate::aggregate;
use crate::angles;
use crate::config;
use crate::energy::{self, SAMPLE_INTERVAL_HOURS};
use crate::error::Result;
use crate::oracle::AstronomicalOracle;
use crate::types::{
    AnalysisReport, AnalysisRequest, Figure, GlossaryEntry, Location, LocationAnalysis,
    PanelAngleSample, PanelSpec, PeriodAggregate, SeriesPoint, SummaryRow, WideRow, WideTable,
};

pub const GLOSSARY: [GlossaryEntry; 9] = [
    GlossaryEntry {
        column: "ew_tilt",
        description: "Tilt along the east-west axis (positive = east, negative = west)",
    },
    GlossaryEntry {
        column: "ns_tilt",
        description: "Tilt along the north-south axis (positive = north, negative = south)",
    },
    GlossaryEntry {
        column: "panel_tilt",
        description: "Tilt from horizontal (0° = flat, 90° = vertical)",
    },
    GlossaryEntry {
        column: "max_west_tilt",
        description: "Largest daily/monthly tilt toward west (positive degrees)",
    },
    GlossaryEntry {
        column: "max_east_tilt",
        description: "Largest daily/monthly tilt toward east (positive degrees)",
    },
    GlossaryEntry {
        column: "max_south_tilt",
        description: "Largest daily/monthly tilt toward south (positive degrees)",
    },
    GlossaryEntry {
        column: "max_north_tilt",
        description: "Largest daily/monthly tilt toward north (positive degrees)",
    },
    GlossaryEntry {
        column: "min_panel_tilt / max_panel_tilt",
        description: "Smallest and largest daily/monthly tilt from horizontal (degrees)",
    },
    GlossaryEntry {
        column: "energy_kwh_total",
        description: "Daily/monthly clear-sky energy collected by the panel (kWh)",
    },
];

/// Everything produced for one location.
struct LocationRun {
    analysis: LocationAnalysis,
    figure: Figure,
}

/// Full pipeline for one location: vectors, tilt angles, energy, aggregation.
pub fn analyze<O: AstronomicalOracle + ?Sized>(
    oracle: &O,
    location: &Location,
    year: i32,
    panel: &PanelSpec,
) -> Result<LocationAnalysis> {
    Ok(run_location(oracle, location, year, panel)?.analysis)
}

fn run_location<O: AstronomicalOracle + ?Sized>(
    oracle: &O,
    location: &Location,
    year: i32,
    panel: &PanelSpec,
) -> Result<LocationRun> {
    let vectors = crate::vectors::compute_solar_vectors(oracle, location, year)?;
    let mut samples = angles::derive_panel_angles(&vectors);
    energy::integrate_energy(&mut samples, panel, SAMPLE_INTERVAL_HOURS);

    let analysis = aggregate::analyze_location(&location.name, &samples);
    let figure = build_figure(&location.name, &samples, &analysis.daily);
    Ok(LocationRun { analysis, figure })
}

pub fn build_figure(name: &str, samples: &[PanelAngleSample], daily: &[PeriodAggregate]) -> Figure {
    Figure {
        location: name.to_string(),
        east_west: samples
            .iter()
            .map(|s| SeriesPoint {
                timestamp: s.timestamp,
                value: s.ew_tilt,
            })
            .collect(),
        north_south: samples
            .iter()
            .map(|s| SeriesPoint {
                timestamp: s.timestamp,
                value: s.ns_tilt,
            })
            .collect(),
        daily_energy: daily
            .iter()
            .map(|d| (d.label.clone(), d.energy_kwh_total))
            .collect(),
    }
}

pub fn summary_row(analysis: &LocationAnalysis) -> SummaryRow {
    let e = &analysis.extremes;
    SummaryRow {
        location: analysis.location.clone(),
        max_east_tilt: e.max_east_tilt,
        max_west_tilt: e.max_west_tilt,
        max_north_tilt: e.max_north_tilt,
        max_south_tilt: e.max_south_tilt,
        max_total_tilt: e.max_total_tilt,
    }
}

/// Puts per-location period tables side by side as `{name}_{column}`.
/// Labels missing for a location leave `None` cells.
pub fn merge_tables<'a, I>(index_name: &'static str, tables: I) -> WideTable
where
    I: IntoIterator<Item = (&'a str, &'a [PeriodAggregate])>,
{
    let width = PeriodAggregate::COLUMNS.len();
    let mut columns = Vec::new();
    let mut cells: BTreeMap<&'a str, Vec<Option<f64>>> = BTreeMap::new();

    for (offset, (name, rows)) in tables.into_iter().enumerate() {
        columns.extend(
            PeriodAggregate::COLUMNS
                .iter()
                .map(|col| format!("{}_{}", name, col)),
        );
        for row in rows {
            let entry = cells.entry(row.label.as_str()).or_default();
            for (i, value) in row.values().into_iter().enumerate() {
                let idx = offset * width + i;
                if entry.len() <= idx {
                    entry.resize(idx + 1, None);
                }
                entry[idx] = Some(value);
            }
        }
    }

    let rows = cells
        .into_iter()
        .map(|(label, mut values)| {
            values.resize(columns.len(), None);
            WideRow {
                label: label.to_string(),
                values,
            }
        })
        .collect();

    WideTable {
        index_name,
        columns,
        rows,
    }
}

/// Runs every location in order and assembles the report.
///
/// The first failing location aborts the whole run; no partial report is returned.
pub fn run_analysis<O: AstronomicalOracle + ?Sized>(
    oracle: &O,
    request: &AnalysisRequest,
) -> Result<AnalysisReport> {
    config::validate_request(request)?;

    let mut analyses = Vec::with_capacity(request.locations.len());
    let mut figures = Vec::with_capacity(request.locations.len());
    for location in &request.locations {
        tracing::info!(location = %location.name, year = request.year, "processing location");
        match run_location(oracle, location, request.year, &request.panel) {
            Ok(run) => {
                tracing::info!(
                    location = %location.name,
                    days = run.analysis.daily.len(),
                    months = run.analysis.monthly.len(),
                    "location done"
                );
                analyses.push(run.analysis);
                figures.push(run.figure);
            }
            Err(e) => {
                tracing::error!(location = %location.name, error = %e, "aborting analysis run");
                return Err(e);
            }
        }
    }

    let summary = analyses.iter().map(summary_row).collect();
    let daily = merge_tables(
        "date",
        analyses
            .iter()
            .map(|a| (a.location.as_str(), a.daily.as_slice())),
    );
    let monthly = merge_tables(
        "month",
        analyses
            .iter()
            .map(|a| (a.location.as_str(), a.monthly.as_slice())),
    );

    Ok(AnalysisReport {
        year: request.year,
        summary,
        daily,
        monthly,
        glossary: GLOSSARY.to_vec(),
        figures,
        analyses,
    })
}
