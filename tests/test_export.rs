use std::fs;
use std::path::PathBuf;

use chrono::{FixedOffset, TimeZone};

use solar_tilt::error::Error;
use solar_tilt::export::{CsvWorkbook, ReportWriter};
use solar_tilt::orchestrator::{merge_tables, GLOSSARY};
use solar_tilt::types::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("solar_tilt_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn period(label: &str, kwh: f64) -> PeriodAggregate {
    PeriodAggregate {
        label: label.to_string(),
        max_west_tilt: 60.0,
        max_east_tilt: 61.0,
        max_south_tilt: 40.0,
        max_north_tilt: 10.0,
        min_panel_tilt: 20.0,
        max_panel_tilt: 85.0,
        energy_kwh_total: kwh,
    }
}

fn report() -> AnalysisReport {
    let a = vec![period("2023-01-01", 1.25), period("2023-01-02", 1.5)];
    let b = vec![period("2023-01-02", 2.0)];
    let am = vec![period("2023-01", 2.75)];
    let bm = vec![period("2023-01", 2.0)];
    let t = FixedOffset::east_opt(3 * 3600)
        .unwrap()
        .with_ymd_and_hms(2023, 1, 1, 9, 0, 0)
        .unwrap();
    AnalysisReport {
        year: 2023,
        summary: vec![SummaryRow {
            location: "Alpha".to_string(),
            max_east_tilt: 61.0,
            max_west_tilt: 60.0,
            max_north_tilt: 10.0,
            max_south_tilt: 40.0,
            max_total_tilt: 85.0,
        }],
        daily: merge_tables("date", [("Alpha", a.as_slice()), ("Beta", b.as_slice())]),
        monthly: merge_tables("month", [("Alpha", am.as_slice()), ("Beta", bm.as_slice())]),
        glossary: GLOSSARY.to_vec(),
        figures: vec![Figure {
            location: "Alpha".to_string(),
            east_west: vec![SeriesPoint {
                timestamp: t,
                value: 45.0,
            }],
            north_south: vec![SeriesPoint {
                timestamp: t,
                value: -30.0,
            }],
            daily_energy: vec![("2023-01-01".to_string(), 1.25)],
        }],
        analyses: Vec::new(),
    }
}

fn read_rows(path: &PathBuf) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

#[test]
fn test_sheet_paths_follow_output_stem() {
    let book = CsvWorkbook::new("out/results.xlsx");
    assert_eq!(book.sheet_path("Summary"), PathBuf::from("out/results_Summary.csv"));
    assert_eq!(book.chart_path("Ankara"), PathBuf::from("out/results_Ankara_charts.csv"));
}

#[test]
fn test_writes_every_sheet() {
    let dir = scratch_dir("sheets");
    let book = CsvWorkbook::new(dir.join("report.xlsx"));
    let written = book.write(&report()).unwrap();

    assert_eq!(written.len(), 5);
    for path in &written {
        assert!(path.exists(), "{} missing", path.display());
    }

    let (headers, rows) = read_rows(&book.sheet_path("Summary"));
    assert_eq!(headers[0], "Location");
    assert_eq!(headers[5], "Max Total Tilt (deg)");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "Alpha");
    let values: Vec<f64> = rows[0][1..].iter().map(|v| v.parse().unwrap()).collect();
    assert_eq!(values, vec![61.0, 60.0, 10.0, 40.0, 85.0]);

    let (headers, _) = read_rows(&book.sheet_path("Info"));
    assert_eq!(headers, vec!["Column", "Description"]);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_cells_are_blank() {
    let dir = scratch_dir("blank");
    let book = CsvWorkbook::new(dir.join("report"));
    book.write(&report()).unwrap();

    let (headers, rows) = read_rows(&book.sheet_path("DailyData"));
    assert_eq!(headers[0], "date");
    assert_eq!(headers[1], "Alpha_max_west_tilt");
    let beta_energy = headers.iter().position(|h| h == "Beta_energy_kwh_total").unwrap();

    assert_eq!(rows[0][0], "2023-01-01");
    assert_eq!(rows[0][beta_energy], "");
    assert_eq!(rows[1][beta_energy], "2");

    let (headers, rows) = read_rows(&book.sheet_path("MonthlyData"));
    assert_eq!(headers[0], "month");
    assert_eq!(rows.len(), 1);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_chart_series_file() {
    let dir = scratch_dir("charts");
    let book = CsvWorkbook::new(dir.join("report.xlsx"));
    book.write(&report()).unwrap();

    let (headers, rows) = read_rows(&book.chart_path("Alpha"));
    assert_eq!(headers, vec!["panel", "time", "value"]);
    let panels: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(panels, vec!["east_west_tilt", "north_south_tilt", "daily_energy_kwh"]);
    assert_eq!(rows[0][1], "2023-01-01T09:00:00+03:00");
    assert_eq!(rows[2][2], "1.25");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_empty_report_still_has_headers() {
    let dir = scratch_dir("empty");
    let book = CsvWorkbook::new(dir.join("empty.xlsx"));
    let mut empty = report();
    empty.summary.clear();
    empty.figures.clear();
    empty.daily = merge_tables("date", Vec::<(&str, &[PeriodAggregate])>::new());
    book.write(&empty).unwrap();

    let (headers, rows) = read_rows(&book.sheet_path("Summary"));
    assert_eq!(headers.len(), 6);
    assert!(rows.is_empty());

    let (headers, rows) = read_rows(&book.sheet_path("DailyData"));
    assert_eq!(headers, vec!["date"]);
    assert!(rows.is_empty());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_unwritable_output_directory_is_an_export_failure() {
    let dir = scratch_dir("blocked");
    fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let book = CsvWorkbook::new(blocker.join("report.xlsx"));
    match book.write(&report()) {
        Err(Error::ExportFailure { path, .. }) => assert_eq!(path, blocker),
        other => panic!("expected ExportFailure, got {:?}", other),
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_chart_write_failure_names_the_file() {
    let dir = scratch_dir("chart_fail");
    let book = CsvWorkbook::new(dir.join("out.xlsx"));
    let mut bad = report();
    bad.figures[0].location = "Ank/ara".to_string();

    match book.write(&bad) {
        Err(Error::ExportFailure { path, .. }) => {
            assert_eq!(path, book.chart_path("Ank/ara"));
            assert_eq!(path, dir.join("out_Ank").join("ara_charts.csv"));
        }
        other => panic!("expected ExportFailure, got {:?}", other),
    }
    assert!(book.sheet_path("Summary").exists());

    fs::remove_dir_all(&dir).unwrap();
}
