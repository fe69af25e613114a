//! Calc command - one scenario from command line amounts

use crate::cmd::{output_table, EntityArg};
use cgtau::money::format_fixed;
use cgtau::input::parse_amount;
use cgtau::tax::{calculate_cgt, CgtInputs, EntityType, Notice};
use clap::Args;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct CalcCommand {
    /// Entity the gains are assessed for
    #[arg(short, long, value_enum, default_value_t = EntityArg::Individual)]
    entity: EntityArg,

    /// Unapplied capital losses from prior years (e.g. "$1,000")
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    prior_losses: String,

    /// Current year capital losses
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    current_year_losses: String,

    /// Short term capital gains
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    short_term_gains: String,

    /// Long term capital gains
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    long_term_gains: String,

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct CalcOutput {
    /// Display name, as in batch output
    entity: String,
    discount_rate_pct: String,
    gross_gains: String,
    discount: String,
    net_gains: String,
    losses_forward: String,
    notices: Vec<Notice>,
}

impl CalcCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let entity: EntityType = self.entity.into();
        let inputs = CgtInputs::new(
            parse_amount(&self.prior_losses),
            parse_amount(&self.current_year_losses),
            parse_amount(&self.short_term_gains),
            parse_amount(&self.long_term_gains),
        );
        let result = calculate_cgt(entity, &inputs);
        let notices = Notice::for_inputs(&inputs);
        let rate_pct = (entity.discount_rate() * dec!(100)).normalize();

        if self.json {
            let output = CalcOutput {
                entity: entity.to_string(),
                discount_rate_pct: rate_pct.to_string(),
                gross_gains: format_fixed(result.gross_gains),
                discount: format_fixed(result.discount),
                net_gains: format_fixed(result.net_gains),
                losses_forward: format_fixed(result.losses_forward),
                notices,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!();
            println!("CAPITAL GAINS TAX ({}, {}% discount)", entity, rate_pct);
            println!("{}", output_table(&result));
            for notice in notices {
                println!("Note: {}", notice);
            }
        }
        Ok(())
    }
}
