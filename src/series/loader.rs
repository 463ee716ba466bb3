//! Load closing prices from a CSV file with `Date` and `Close` columns

use super::{PricePoint, PriceSeries};
use crate::error::{DcaError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Date formats accepted in the `Date` column, tried in order
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Raw CSV row; other columns (Open, High, Volume...) are ignored
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: String,
}

impl CsvRow {
    fn to_point(&self, line: usize) -> std::result::Result<PricePoint, String> {
        let date = parse_date(&self.date)
            .ok_or_else(|| format!("line {}: unparseable date '{}'", line, self.date))?;
        let close: f64 = self
            .close
            .trim()
            .parse()
            .map_err(|_| format!("line {}: unparseable close '{}'", line, self.close))?;
        if !close.is_finite() || close <= 0.0 {
            return Err(format!("line {}: close must be positive, got '{}'", line, self.close));
        }

        Ok(PricePoint::new(date, close))
    }
}

/// Parse a calendar date, accepting timestamps by dropping the time part
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Load a price series from a CSV file
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let file = File::open(path).map_err(|e| DcaError::load(&display, e))?;
    let series = read_series(file, &display)?;

    log::info!(
        "Loaded {} prices from {} ({:?} to {:?})",
        series.len(),
        display,
        series.first_date(),
        series.last_date()
    );

    Ok(series)
}

/// Load a price series from any reader (e.g., string buffer, network stream)
pub fn load_series_from_reader<R: std::io::Read>(reader: R) -> Result<PriceSeries> {
    read_series(reader, "<reader>")
}

fn read_series<R: std::io::Read>(reader: R, source: &str) -> Result<PriceSeries> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DcaError::load(source, e))?
        .clone();
    for column in ["Date", "Close"] {
        if !headers.iter().any(|h| h == column) {
            return Err(DcaError::load(source, format!("missing '{}' column", column)));
        }
    }

    let mut points = Vec::new();
    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result.map_err(|e| DcaError::load(source, e))?;
        // Header is line 1
        let point = row.to_point(i + 2).map_err(|e| DcaError::load(source, e))?;
        points.push(point);
    }

    if points.is_empty() {
        return Err(DcaError::load(source, "no price rows"));
    }

    Ok(PriceSeries::new(points))
}

/// Display label for a series, taken from its file name
pub fn series_label<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "series".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2020-01-03,100,101,99,100.5,100.5,1000
2020-01-02,99,100,98,100.0,100.0,1200
2020-01-06,100,102,100,101.0,101.0,900
";

    #[test]
    fn test_load_from_reader_sorts_by_date() {
        let series = load_series_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2020, 1, 2));
        assert_eq!(series.closes().collect::<Vec<_>>(), vec![100.0, 100.5, 101.0]);
    }

    #[test]
    fn test_missing_close_column() {
        let data = "Date,Open\n2020-01-02,1.0\n";
        let err = load_series_from_reader(data.as_bytes()).unwrap_err();
        match err {
            DcaError::Load { reason, .. } => assert!(reason.contains("Close")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_bad_date_is_load_error() {
        let data = "Date,Close\n2020-01-02,1.0\nnot-a-date,2.0\n";
        let err = load_series_from_reader(data.as_bytes()).unwrap_err();
        match err {
            DcaError::Load { reason, .. } => assert!(reason.contains("line 3")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_bad_close_and_empty_table() {
        let data = "Date,Close\n2020-01-02,abc\n";
        assert!(matches!(
            load_series_from_reader(data.as_bytes()),
            Err(DcaError::Load { .. })
        ));

        let data = "Date,Close\n";
        assert!(matches!(
            load_series_from_reader(data.as_bytes()),
            Err(DcaError::Load { .. })
        ));
    }

    #[test]
    fn test_non_positive_close_rejected() {
        for bad in ["NaN", "0", "-5", "inf"] {
            let data = format!("Date,Close\n2020-01-02,100\n2020-01-03,{}\n", bad);
            match load_series_from_reader(data.as_bytes()) {
                Err(DcaError::Load { reason, .. }) => {
                    assert!(reason.contains("line 3"), "{}", reason);
                    assert!(reason.contains("positive"), "{}", reason);
                }
                other => panic!("close '{}' loaded: {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_series("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, DcaError::Load { .. }));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 7, 9);
        assert_eq!(parse_date("2021-07-09"), expected);
        assert_eq!(parse_date("07/09/2021"), expected);
        assert_eq!(parse_date("2021/07/09"), expected);
        assert_eq!(parse_date("2021-07-09 16:00:00"), expected);
        assert_eq!(parse_date("2021-07-09T16:00:00-04:00"), expected);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_series_label() {
        assert_eq!(series_label("data/VTI.csv"), "VTI");
        assert_eq!(series_label("/tmp/spy_daily.csv"), "spy_daily");
    }
}
