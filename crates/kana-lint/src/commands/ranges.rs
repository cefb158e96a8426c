//! Ranges command: list the codepoint tables.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use kana_lint_core::ranges::{CodepointRange, TableKind, format_codepoint};

/// Arguments for the `ranges` subcommand.
#[derive(Args, Debug, Default)]
pub struct RangesArgs {
    /// Only list this table.
    #[arg(long, value_enum)]
    pub table: Option<TableKind>,
}

#[derive(Serialize)]
struct RangeInfo {
    table: TableKind,
    label: &'static str,
    intervals: Vec<String>,
}

impl RangeInfo {
    fn new(table: TableKind, range: &CodepointRange) -> Self {
        Self {
            table,
            label: range.label(),
            intervals: range
                .intervals()
                .iter()
                .map(|&(low, high)| format_interval(low, high))
                .collect(),
        }
    }
}

/// Print every registered range, grouped by table.
#[instrument(name = "cmd_ranges", skip_all)]
pub fn cmd_ranges(args: RangesArgs, global_json: bool) -> anyhow::Result<()> {
    debug!(table = ?args.table, "executing ranges command");

    let tables: Vec<TableKind> = args
        .table
        .map_or_else(|| TableKind::ALL.to_vec(), |table| vec![table]);
    let infos: Vec<RangeInfo> = tables
        .iter()
        .flat_map(|&table| {
            table
                .ranges()
                .iter()
                .map(move |range| RangeInfo::new(table, range))
        })
        .collect();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    let mut current = None;
    for info in &infos {
        if current != Some(info.table) {
            if current.is_some() {
                println!();
            }
            println!("{}", info.table.as_str().bold().underline());
            current = Some(info.table);
        }
        println!("  {}: {}", info.label.cyan(), info.intervals.join(", "));
    }

    Ok(())
}

fn format_interval(low: u32, high: u32) -> String {
    if low == high {
        format_codepoint(low)
    } else {
        format!("{}..{}", format_codepoint(low), format_codepoint(high))
    }
}
