use std::io::IsTerminal;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Result of a completed liability exchange.
#[derive(Serialize)]
pub struct LiabilityReport<'a> {
    pub drone: &'a str,
    pub contract: &'a str,
    pub measurements: &'a Value,
    pub timestamp: String,
}

impl<'a> LiabilityReport<'a> {
    pub fn new(drone: &'a str, contract: &'a str, measurements: &'a Value) -> Self {
        Self {
            drone,
            contract,
            measurements,
            timestamp: now_unix_seconds(),
        }
    }
}

pub fn print_report(report: &LiabilityReport<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["DRONE", "CONTRACT", "MEASUREMENTS"])
                .add_row(vec![
                    report.drone.to_string(),
                    report.contract.to_string(),
                    report.measurements.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "drone={} contract={} measurements={}",
                report.drone, report.contract, report.measurements
            );
        }
        OutputFormat::Raw => {
            println!("{}", report.measurements);
        }
    }
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
