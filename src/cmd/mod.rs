pub mod batch;
pub mod calc;
pub mod form;
pub mod schema;

use cgtau::input::{self, Scenario};
use cgtau::money::format_aud;
use cgtau::tax::{CgtResult, EntityType};
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum EntityArg {
    /// Individual or trust (50% discount)
    #[default]
    Individual,
    /// Self-managed super fund (33.33% discount)
    Smsf,
    /// Company (no discount)
    Company,
}

impl From<EntityArg> for EntityType {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Individual => EntityType::IndividualOrTrust,
            EntityArg::Smsf => EntityType::Smsf,
            EntityArg::Company => EntityType::Company,
        }
    }
}

/// Batch file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Guess from the file extension, CSV unless it ends in `.json`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Csv,
        }
    }
}

/// Read scenarios from a file (or stdin with "-")
pub fn read_scenarios(path: &Path, format: Option<InputFormat>) -> anyhow::Result<Vec<Scenario>> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
        }
        parse_scenarios(io::Cursor::new(buffer), format)
    } else {
        let file = File::open(path)
            .map_err(|e| anyhow::anyhow!("failed to open {}: {}", path.display(), e))?;
        parse_scenarios(BufReader::new(file), format)
    }
}

fn parse_scenarios<R: Read>(reader: R, format: InputFormat) -> anyhow::Result<Vec<Scenario>> {
    match format {
        InputFormat::Csv => input::read_csv(reader),
        InputFormat::Json => input::read_json(reader),
    }
}

/// One line of the output panel
#[derive(Debug, Clone, Tabled)]
pub struct OutputRow {
    #[tabled(rename = "Output")]
    pub label: &'static str,
    #[tabled(rename = "Amount")]
    pub amount: String,
}

pub fn output_rows(result: &CgtResult) -> Vec<OutputRow> {
    vec![
        OutputRow {
            label: "Gross capital gain / (loss)",
            amount: format_aud(result.gross_gains),
        },
        OutputRow {
            label: "Capital gain discount",
            amount: format_aud(result.discount),
        },
        OutputRow {
            label: "Net capital gains",
            amount: format_aud(result.net_gains),
        },
        OutputRow {
            label: "Capital losses carried forward to future years",
            amount: format_aud(result.losses_forward),
        },
    ]
}

pub fn output_table(result: &CgtResult) -> String {
    Table::new(output_rows(result))
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}
