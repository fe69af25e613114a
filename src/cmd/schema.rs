//! Schema command - print expected batch input formats

use cgtau::input::{BatchInput, ScenarioRecord};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the batch input
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(BatchInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        let names: Vec<_> = ScenarioRecord::field_schema()
            .iter()
            .map(|field| field.name)
            .collect();
        println!("{}", names.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("CSV Input Format");
        println!("================");
        println!();
        for field in ScenarioRecord::field_schema() {
            let req = if field.required { "required" } else { "optional" };
            println!("{:20} ({:8})  {}", field.name, req, field.description);
        }
        println!();
        println!("Amounts may include $ signs and commas; unreadable, negative or oversized amounts count as 0");
        Ok(())
    }
}
