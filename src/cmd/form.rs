//! Form command - interactive calculator driven by lines on stdin
//!
//! Each line is one change to the form, after which the outputs are shown:
//!
//! ```text
//! long_term_gains 5,000
//! entity smsf
//! reset
//! ```

use crate::cmd::{output_table, EntityArg};
use cgtau::form::{CgtForm, Field};
use cgtau::input::InputError;
use cgtau::tax::EntityType;
use clap::Args;
use std::io::{self, BufRead};
use std::str::FromStr;

#[derive(Args, Debug)]
pub struct FormCommand {
    /// Entity selected when the form opens
    #[arg(short, long, value_enum, default_value_t = EntityArg::Individual)]
    entity: EntityArg,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormAction {
    Set(Field, String),
    Entity(EntityType),
    Reset,
    Show,
    Quit,
}

impl FromStr for FormAction {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, r)| (c, r.trim()));

        match command.to_lowercase().as_str() {
            "reset" if rest.is_empty() => Ok(FormAction::Reset),
            "show" if rest.is_empty() => Ok(FormAction::Show),
            "quit" | "exit" if rest.is_empty() => Ok(FormAction::Quit),
            "entity" => Ok(FormAction::Entity(rest.parse()?)),
            _ => match command.parse::<Field>() {
                Ok(field) => Ok(FormAction::Set(field, rest.to_string())),
                Err(_) => Err(InputError::UnknownCommand(line.to_string())),
            },
        }
    }
}

impl FormCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut form = CgtForm::new(self.entity.into());
        let stdin = io::stdin();

        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let action = match line.parse::<FormAction>() {
                Ok(action) => action,
                Err(err) => {
                    log::warn!("Ignoring form line: {}", err);
                    eprintln!("{}", err);
                    continue;
                }
            };

            match action {
                FormAction::Set(field, text) => {
                    form.focus(field);
                    form.input(field, &text);
                    form.blur(field);
                }
                FormAction::Entity(entity) => {
                    form.select_entity(entity);
                }
                FormAction::Reset => form.reset(),
                FormAction::Show => {}
                FormAction::Quit => break,
            }
            print_form(&form);
        }
        Ok(())
    }
}

fn print_form(form: &CgtForm) {
    println!();
    println!("Entity: {}", form.entity());
    for field in Field::ALL {
        let value = form.display_value(field);
        println!("  {}: {}", field.label(), if value.is_empty() { "-" } else { value });
    }
    match form.result() {
        Some(result) => println!("{}", output_table(result)),
        None => println!("(no outputs)"),
    }
    for notice in form.notices() {
        println!("Note: {}", notice);
    }
}
