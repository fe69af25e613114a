//! Batch command - calculate every scenario in a CSV or JSON file

use crate::cmd::{read_scenarios, InputFormat};
use cgtau::input::Scenario;
use cgtau::money::{format_aud, format_fixed};
use cgtau::tax::{calculate_cgt, CgtResult, Notice};
use clap::Args;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// CSV or JSON file containing scenarios ("-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Input format (defaults to the file extension, then CSV)
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Output as CSV instead of formatted table
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

struct Calculated<'a> {
    row: usize,
    scenario: &'a Scenario,
    result: CgtResult,
    schedule_required: bool,
}

/// Row for the batch table output
#[derive(Debug, Clone, Tabled)]
struct BatchRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Entity")]
    entity: String,
    #[tabled(rename = "Gross gain/(loss)")]
    gross_gains: String,
    #[tabled(rename = "Discount")]
    discount: String,
    #[tabled(rename = "Net gain")]
    net_gains: String,
    #[tabled(rename = "Losses c/f")]
    losses_forward: String,
    #[tabled(rename = "CGT schedule")]
    schedule: String,
}

impl From<&Calculated<'_>> for BatchRow {
    fn from(c: &Calculated<'_>) -> Self {
        BatchRow {
            row: c.row,
            id: c.scenario.id.clone().unwrap_or_default(),
            entity: c.scenario.entity.to_string(),
            gross_gains: format_aud(c.result.gross_gains),
            discount: format_aud(c.result.discount),
            net_gains: format_aud(c.result.net_gains),
            losses_forward: format_aud(c.result.losses_forward),
            schedule: if c.schedule_required { "required" } else { "" }.to_string(),
        }
    }
}

/// Record for CSV and JSON output
#[derive(Debug, Serialize)]
struct BatchRecord {
    row: usize,
    id: String,
    entity: String,
    gross_gains: String,
    discount: String,
    net_gains: String,
    losses_forward: String,
    cgt_schedule_required: bool,
}

impl From<&Calculated<'_>> for BatchRecord {
    fn from(c: &Calculated<'_>) -> Self {
        BatchRecord {
            row: c.row,
            id: c.scenario.id.clone().unwrap_or_default(),
            entity: c.scenario.entity.to_string(),
            gross_gains: format_fixed(c.result.gross_gains),
            discount: format_fixed(c.result.discount),
            net_gains: format_fixed(c.result.net_gains),
            losses_forward: format_fixed(c.result.losses_forward),
            cgt_schedule_required: c.schedule_required,
        }
    }
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let scenarios = read_scenarios(&self.input, self.format)?;
        let calculated: Vec<Calculated> = scenarios
            .iter()
            .enumerate()
            .map(|(i, scenario)| Calculated {
                row: i + 1,
                scenario,
                result: calculate_cgt(scenario.entity, &scenario.inputs),
                schedule_required: !Notice::for_inputs(&scenario.inputs).is_empty(),
            })
            .collect();

        if self.json {
            let records: Vec<BatchRecord> = calculated.iter().map(BatchRecord::from).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        } else if self.csv {
            self.write_csv(&calculated)
        } else {
            self.print_table(&calculated);
            Ok(())
        }
    }

    fn print_table(&self, calculated: &[Calculated]) {
        if calculated.is_empty() {
            println!("No scenarios found");
            return;
        }

        let rows: Vec<BatchRow> = calculated.iter().map(BatchRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn write_csv(&self, calculated: &[Calculated]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for c in calculated {
            wtr.serialize(BatchRecord::from(c))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
