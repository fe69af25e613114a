use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser, Debug)]
#[command(name = "cgtau", version, about = "Estimate Australian Capital Gains Tax (CGT)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate one scenario from command line amounts
    Calc(cmd::calc::CalcCommand),
    /// Calculate every scenario in a CSV or JSON file
    Batch(cmd::batch::BatchCommand),
    /// Interactive form: one change per line on stdin
    Form(cmd::form::FormCommand),
    /// Print the batch input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calc(calc) => calc.exec(),
        Command::Batch(batch) => batch.exec(),
        Command::Form(form) => form.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
