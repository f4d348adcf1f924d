use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{AnalysisReport, Figure, WideTable};

pub const SUMMARY_SHEET: &str = "Summary";
pub const DAILY_SHEET: &str = "DailyData";
pub const MONTHLY_SHEET: &str = "MonthlyData";
pub const INFO_SHEET: &str = "Info";

/// Persists a finished report.
pub trait ReportWriter {
    /// Returns the paths written, in write order.
    fn write(&self, report: &AnalysisReport) -> Result<Vec<PathBuf>>;
}

/// Writes each sheet as `{stem}_{sheet}.csv` next to the requested output
/// path, plus one `{stem}_{location}_charts.csv` per location.
#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    stem: PathBuf,
}

impl CsvWorkbook {
    pub fn new(output: impl AsRef<Path>) -> Self {
        Self {
            stem: output.as_ref().with_extension(""),
        }
    }

    pub fn sheet_path(&self, sheet: &str) -> PathBuf {
        let mut name = self.stem.file_name().unwrap_or_default().to_os_string();
        name.push(format!("_{}.csv", sheet));
        self.stem.with_file_name(name)
    }

    pub fn chart_path(&self, location: &str) -> PathBuf {
        self.sheet_path(&format!("{}_charts", location))
    }
}

fn export_failure(path: &Path) -> impl FnOnce(csv::Error) -> Error + '_ {
    move |source| Error::ExportFailure {
        path: path.to_path_buf(),
        source,
    }
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_serialized<T: serde::Serialize>(path: &Path, rows: &[T], headers: &[&str]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(export_failure(path))?;
    if rows.is_empty() {
        writer
            .write_record(headers)
            .map_err(export_failure(path))?;
    }
    for row in rows {
        writer.serialize(row).map_err(export_failure(path))?;
    }
    writer
        .flush()
        .map_err(|e| export_failure(path)(e.into()))?;
    Ok(())
}

fn write_wide_table(path: &Path, table: &WideTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(export_failure(path))?;
    let header = std::iter::once(table.index_name.to_string()).chain(table.columns.iter().cloned());
    writer
        .write_record(header)
        .map_err(export_failure(path))?;
    for row in &table.rows {
        let record = std::iter::once(row.label.clone())
            .chain(row.values.iter().map(|v| format_cell(*v)));
        writer
            .write_record(record)
            .map_err(export_failure(path))?;
    }
    writer
        .flush()
        .map_err(|e| export_failure(path)(e.into()))?;
    Ok(())
}

fn write_figure(path: &Path, figure: &Figure) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(export_failure(path))?;
    writer
        .write_record(["panel", "time", "value"])
        .map_err(export_failure(path))?;
    let tilt_rows = figure
        .east_west
        .iter()
        .map(|p| ("east_west_tilt", p))
        .chain(figure.north_south.iter().map(|p| ("north_south_tilt", p)));
    for (panel, point) in tilt_rows {
        writer
            .write_record([
                panel.to_string(),
                point.timestamp.to_rfc3339(),
                point.value.to_string(),
            ])
            .map_err(export_failure(path))?;
    }
    for (day, kwh) in &figure.daily_energy {
        writer
            .write_record(["daily_energy_kwh", day.as_str(), kwh.to_string().as_str()])
            .map_err(export_failure(path))?;
    }
    writer
        .flush()
        .map_err(|e| export_failure(path)(e.into()))?;
    Ok(())
}

impl ReportWriter for CsvWorkbook {
    fn write(&self, report: &AnalysisReport) -> Result<Vec<PathBuf>> {
        if let Some(dir) = self.stem.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| export_failure(dir)(e.into()))?;
        }

        let summary = self.sheet_path(SUMMARY_SHEET);
        write_serialized(
            &summary,
            &report.summary,
            &[
                "Location",
                "Max East Tilt (deg)",
                "Max West Tilt (deg)",
                "Max North Tilt (deg)",
                "Max South Tilt (deg)",
                "Max Total Tilt (deg)",
            ],
        )?;

        let daily = self.sheet_path(DAILY_SHEET);
        write_wide_table(&daily, &report.daily)?;
        let monthly = self.sheet_path(MONTHLY_SHEET);
        write_wide_table(&monthly, &report.monthly)?;

        let info = self.sheet_path(INFO_SHEET);
        write_serialized(&info, &report.glossary, &["Column", "Description"])?;

        let mut written = vec![summary, daily, monthly, info];
        for figure in &report.figures {
            let path = self.chart_path(&figure.location);
            write_figure(&path, figure)?;
            written.push(path);
        }

        tracing::info!(files = written.len(), stem = %self.stem.display(), "report exported");
        Ok(written)
    }
}
