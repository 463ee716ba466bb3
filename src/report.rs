//! Presentation helpers: formatted totals, chart series, and exports
//!
//! Nothing here draws; a front end takes `ChartData` and renders it however it likes.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{DcaError, Result};
use crate::projection::{ProjectionPoint, ProjectionResult, ProjectionSummary};

/// Format an amount as `$1,234.56`
pub fn format_currency(amount: f64) -> String {
    let signed_cents = (amount * 100.0).round();
    let sign = if signed_cents < 0.0 { "-" } else { "" };
    let cents = signed_cents.abs();
    let whole = (cents / 100.0).trunc() as u64;
    let fraction = (cents % 100.0) as u64;

    format!("{}${}.{:02}", sign, group_thousands(whole), fraction)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a fractional rate as a percentage, e.g. `0.1234` -> `12.34%`
pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Multi-line summary of a projection
pub fn summary_text(result: &ProjectionResult) -> String {
    let mut text = format!(
        "Estimated Annual Return: {}\n",
        format_percent(result.annual_rate)
    );
    text += &format!("Total Invested: {}\n", format_currency(result.total_invested));
    text += &format!("Future Value: {}\n", format_currency(result.future_value));
    text += &format!("Profit: {}", format_currency(result.profit));
    text
}

/// One plotted sample of the growth chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub elapsed_years: f64,
    pub future_value: f64,
    pub total_invested: f64,
}

/// Everything a renderer needs to draw the growth chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Source series label, e.g. the price file name
    pub label: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartData {
    pub fn from_result(result: &ProjectionResult, label: impl Into<String>) -> Self {
        let points = result
            .points
            .iter()
            .map(|p| ChartPoint {
                elapsed_years: result.elapsed_years(p.period_index),
                future_value: p.future_value,
                total_invested: p.total_invested,
            })
            .collect();

        Self {
            label: label.into(),
            title: "DCA Investment Growth".to_string(),
            x_label: "Years".to_string(),
            y_label: "Value".to_string(),
            points,
        }
    }

    /// Tooltip text for the point under the cursor
    pub fn tooltip(&self, index: usize) -> Option<String> {
        self.points.get(index).map(|p| {
            format!(
                "Year {:.2}\nValue: {}\nInvested: {}",
                p.elapsed_years,
                format_currency(p.future_value),
                format_currency(p.total_invested)
            )
        })
    }
}

/// Row of the CSV export
#[derive(Debug, Serialize)]
struct ExportRow {
    period: u32,
    elapsed_years: f64,
    future_value: f64,
    total_invested: f64,
}

/// Write the projection table as CSV
pub fn write_csv<W: Write>(result: &ProjectionResult, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for point in &result.points {
        csv_writer
            .serialize(ExportRow {
                period: point.period_index,
                elapsed_years: result.elapsed_years(point.period_index),
                future_value: point.future_value,
                total_invested: point.total_invested,
            })
            .map_err(|e| DcaError::Export(e.to_string()))?;
    }

    csv_writer.flush().map_err(|e| DcaError::Export(e.to_string()))?;
    Ok(())
}

/// JSON report: label, summary and full point series
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    label: &'a str,
    period_unit: String,
    years: u32,
    summary: ProjectionSummary,
    points: &'a [ProjectionPoint],
}

/// Write the projection as pretty-printed JSON
pub fn write_json<W: Write>(result: &ProjectionResult, label: &str, writer: W) -> Result<()> {
    let report = JsonReport {
        label,
        period_unit: result.period_unit.to_string(),
        years: result.years,
        summary: result.summary(),
        points: &result.points,
    };

    serde_json::to_writer_pretty(writer, &report).map_err(|e| DcaError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{PeriodUnit, ProjectionEngine, ProjectionInputs};

    fn yearly_result() -> ProjectionResult {
        ProjectionEngine::new(ProjectionInputs {
            initial: 1000.0,
            periodic: 100.0,
            period_unit: PeriodUnit::Yearly,
            years: 3,
        })
        .project(0.10)
        .unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(17000.0), "$17,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(-362.5), "-$362.50");

        // Rounds to zero, so no sign
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(-0.004), "$0.00");
        assert_eq!(format_currency(-0.005), "-$0.01");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.1234), "12.34%");
        assert_eq!(format_percent(-0.05), "-5.00%");
    }

    #[test]
    fn test_summary_text() {
        let text = summary_text(&yearly_result());
        assert_eq!(
            text,
            "Estimated Annual Return: 10.00%\nTotal Invested: $1,300.00\nFuture Value: $1,662.00\nProfit: $362.00"
        );
    }

    #[test]
    fn test_chart_data() {
        let chart = ChartData::from_result(&yearly_result(), "VTI");
        assert_eq!(chart.label, "VTI");
        assert_eq!(chart.points.len(), 4);
        assert_eq!(chart.points[3].elapsed_years, 3.0);

        let tooltip = chart.tooltip(1).unwrap();
        assert!(tooltip.contains("Value: $1,200.00"));
        assert!(chart.tooltip(10).is_none());
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        write_csv(&yearly_result(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("period,elapsed_years,future_value,total_invested")
        );
        assert_eq!(lines.next(), Some("0,0.0,1000.0,1000.0"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_write_json() {
        let mut buffer = Vec::new();
        write_json(&yearly_result(), "VTI", &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["label"], "VTI");
        assert_eq!(value["period_unit"], "yearly");
        assert_eq!(value["points"].as_array().map(|a| a.len()), Some(4));
        assert_eq!(value["summary"]["total_invested"], 1300.0);
    }
}
