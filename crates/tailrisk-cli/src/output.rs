//! Output formatting utilities.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use tailrisk_engine::{AnalysisReport, RiskMetrics};
use tailrisk_risk::BacktestReport;

use crate::cli::OutputFormat;

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Formats a ratio to four decimal places.
pub fn fmt4(value: f64) -> String {
    format!("{value:.4}")
}

/// Formats a ratio as a percentage.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a ratio, to four decimal places.
    pub fn ratio(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, fmt4(value))
    }
}

/// A report line with its section, for CSV output.
#[derive(Debug, Clone, Serialize)]
struct ReportRow<'a> {
    section: &'a str,
    metric: &'a str,
    value: &'a str,
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

// =============================================================================
// ANALYSIS REPORT
// =============================================================================

fn metric_rows(metrics: &RiskMetrics, prefix: &str) -> Vec<KeyValue> {
    let confidence = metrics.var.confidence_level;
    let mut rows = vec![
        KeyValue::ratio(
            format!("{prefix}VaR ({confidence})"),
            metrics.var.var,
        ),
        match metrics.es_value() {
            Some(es) => KeyValue::ratio(format!("{prefix}Expected Shortfall"), es),
            None => KeyValue::new(format!("{prefix}Expected Shortfall"), "undefined"),
        },
        KeyValue::new("Simulations", metrics.var.num_simulations.to_string()),
        KeyValue::new("Return Observations", metrics.observations.to_string()),
        KeyValue::new("Mean Daily Return", format!("{:.6}", metrics.var.fit.mean)),
        KeyValue::new("Daily Volatility", format!("{:.6}", metrics.var.fit.std_dev)),
    ];
    if let Some(note) = &metrics.shortfall_note {
        rows.push(KeyValue::new("Note", note.clone()));
    }
    rows
}

fn backtest_rows(report: &BacktestReport) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Total Days", report.total_observations.to_string()),
        KeyValue::new(
            "VaR Days (loss exceeded VaR)",
            report.violation_count.to_string(),
        ),
        KeyValue::new(
            format!("Expected VaR Days ({})", report.confidence_level),
            report.expected_violation_count.to_string(),
        ),
        KeyValue::new("Violation Rate", format_percent(report.violation_rate)),
        KeyValue::ratio("Kupiec LR", report.kupiec.lr_statistic),
        KeyValue::ratio("Kupiec p-value", report.kupiec.p_value),
    ]
}

/// Report sections as (title, rows).
fn report_sections(report: &AnalysisReport) -> Vec<(String, Vec<KeyValue>)> {
    let mut sections = Vec::new();

    sections.push((
        "Data".to_string(),
        vec![
            KeyValue::new("Ticker", report.ticker.clone()),
            KeyValue::new(
                "Period",
                format!("{} to {}", report.first_date, report.last_date),
            ),
            KeyValue::new("Prices", report.price_count.to_string()),
            KeyValue::new("Last Price", format!("{:.4}", report.last_price)),
        ],
    ));

    sections.push(("Monte Carlo VaR".to_string(), metric_rows(&report.baseline, "")));

    if let Some(stressed) = &report.stressed {
        let mut rows: Vec<KeyValue> = stressed
            .shocks
            .iter()
            .map(|c| {
                KeyValue::new(
                    format!("Shock: {}", c.name),
                    format!("{:.2}% total", c.shock_percent()),
                )
            })
            .collect();
        rows.push(KeyValue::new("Asset Type", stressed.shocks.asset_type.to_string()));
        rows.push(KeyValue::new("Periods", stressed.periods.to_string()));
        rows.push(KeyValue::ratio("Cumulative Factor", stressed.cumulative_factor));
        rows.push(KeyValue::new(
            "Stressed Last Price",
            format!("{:.4}", stressed.stressed_last_price),
        ));
        rows.extend(metric_rows(&stressed.metrics, "Stressed "));
        sections.push(("Stress Test".to_string(), rows));
    }

    if let Some(backtest) = &report.backtest {
        sections.push(("Backtesting Results".to_string(), backtest_rows(backtest)));
    }

    sections
}

/// Prints an analysis report in the requested format.
pub fn print_report(report: &AnalysisReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            for (title, rows) in report_sections(report) {
                print_header(&title);
                print_table(&rows)?;
            }
            if let Some(backtest) = &report.backtest {
                if backtest.exceeds_expected {
                    print_warning(backtest.verdict());
                } else {
                    print_success(backtest.verdict());
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Csv => {
            let sections = report_sections(report);
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for (title, rows) in &sections {
                for row in rows {
                    wtr.serialize(ReportRow {
                        section: title,
                        metric: &row.key,
                        value: &row.value,
                    })?;
                }
            }
            if let Some(backtest) = &report.backtest {
                wtr.serialize(ReportRow {
                    section: "Backtesting Results",
                    metric: "Verdict",
                    value: backtest.verdict(),
                })?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{}", report.baseline.var.var)?;
            if let Some(stressed) = &report.stressed {
                writeln!(out, "{}", stressed.metrics.var.var)?;
            }
        }
    }
    Ok(())
}
