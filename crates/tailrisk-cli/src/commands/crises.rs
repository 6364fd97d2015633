//! Crises command implementation.
//!
//! Lists the crisis scenarios per asset type, numbered as they are selected.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tailrisk_config::AnalysisConfig;
use tailrisk_core::AssetType;
use tailrisk_risk::stress::ShockTable;

use crate::cli::OutputFormat;
use crate::commands::parse_asset_type;
use crate::output::print_output;

/// Arguments for the crises command.
#[derive(Args, Debug)]
pub struct CrisesArgs {
    /// Only list crises for this asset type (stock, commodity, oil)
    #[arg(short, long)]
    pub asset_type: Option<String>,
}

/// One numbered crisis.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CrisisRow {
    #[tabled(rename = "#")]
    pub number: usize,
    #[tabled(rename = "Asset Type")]
    pub asset_type: AssetType,
    #[tabled(rename = "Crisis")]
    pub crisis: String,
    #[tabled(rename = "Total Shock")]
    #[serde(skip)]
    pub shock_display: String,
    #[tabled(skip)]
    pub shock: f64,
}

/// Numbered crisis rows for the given asset types.
pub fn crisis_rows(table: &ShockTable, asset_types: &[AssetType]) -> Result<Vec<CrisisRow>> {
    let mut rows = Vec::new();
    for &asset_type in asset_types {
        for (idx, crisis) in table.crises(asset_type)?.iter().enumerate() {
            rows.push(CrisisRow {
                number: idx + 1,
                asset_type,
                crisis: crisis.name.clone(),
                shock_display: format!("{:.2}%", crisis.shock_percent()),
                shock: crisis.shock,
            });
        }
    }
    Ok(rows)
}

/// Execute the crises command.
pub fn execute(args: CrisesArgs, format: OutputFormat, config: &AnalysisConfig) -> Result<()> {
    let table = config.shock_table();
    let asset_types = match &args.asset_type {
        Some(s) => vec![parse_asset_type(s)?],
        None => table.asset_types().collect(),
    };

    let rows = crisis_rows(&table, &asset_types)?;
    match format {
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}. {}", row.number, row.crisis);
            }
            Ok(())
        }
        _ => print_output(&rows, format),
    }
}
