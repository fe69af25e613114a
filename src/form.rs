//! Calculator form state: entered text, selected entity and derived outputs.
//!
//! Every change recomputes the outputs from scratch with the pure calculator.

use crate::input::{parse_amount, sanitize, InputError};
use crate::money::format_aud;
use crate::tax::{calculate_cgt, CgtInputs, CgtResult, EntityType, Notice};
use std::str::FromStr;

/// Editable amount fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PriorLosses,
    CurrentYearLosses,
    ShortTermGains,
    LongTermGains,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::PriorLosses,
        Field::CurrentYearLosses,
        Field::ShortTermGains,
        Field::LongTermGains,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::PriorLosses => "prior_losses",
            Field::CurrentYearLosses => "current_year_losses",
            Field::ShortTermGains => "short_term_gains",
            Field::LongTermGains => "long_term_gains",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::PriorLosses => "Unapplied capital losses from prior years",
            Field::CurrentYearLosses => "Current year capital losses",
            Field::ShortTermGains => "Short term capital gains",
            Field::LongTermGains => "Long term capital gains",
        }
    }

    fn index(&self) -> usize {
        match self {
            Field::PriorLosses => 0,
            Field::CurrentYearLosses => 1,
            Field::ShortTermGains => 2,
            Field::LongTermGains => 3,
        }
    }
}

impl FromStr for Field {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Field::ALL
            .into_iter()
            .find(|field| field.name() == key)
            .ok_or_else(|| InputError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct CgtForm {
    values: [String; 4],
    entity: EntityType,
    result: Option<CgtResult>,
}

impl CgtForm {
    pub fn new(entity: EntityType) -> Self {
        CgtForm {
            entity,
            ..Default::default()
        }
    }

    /// Store the field's new text, keeping digits and points only, and recompute
    pub fn input(&mut self, field: Field, text: &str) -> CgtResult {
        self.values[field.index()] = sanitize(text);
        self.recompute()
    }

    /// Strip display formatting so the raw amount can be edited
    pub fn focus(&mut self, field: Field) {
        let value = &mut self.values[field.index()];
        *value = sanitize(value);
    }

    /// Show the field as currency once editing finishes
    pub fn blur(&mut self, field: Field) {
        let value = &mut self.values[field.index()];
        let raw = sanitize(value);
        *value = if raw.is_empty() {
            raw
        } else {
            format_aud(parse_amount(&raw))
        };
    }

    pub fn select_entity(&mut self, entity: EntityType) -> CgtResult {
        self.entity = entity;
        self.recompute()
    }

    /// Clear all fields and outputs. The entity selection is kept.
    pub fn reset(&mut self) {
        self.values = Default::default();
        self.result = None;
    }

    pub fn entity(&self) -> EntityType {
        self.entity
    }

    pub fn display_value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn inputs(&self) -> CgtInputs {
        let amount = |field: Field| parse_amount(self.display_value(field));
        CgtInputs::new(
            amount(Field::PriorLosses),
            amount(Field::CurrentYearLosses),
            amount(Field::ShortTermGains),
            amount(Field::LongTermGains),
        )
    }

    /// Outputs of the last change, `None` before the first change or after a reset
    pub fn result(&self) -> Option<&CgtResult> {
        self.result.as_ref()
    }

    pub fn notices(&self) -> Vec<Notice> {
        match self.result {
            Some(_) => Notice::for_inputs(&self.inputs()),
            None => Vec::new(),
        }
    }

    fn recompute(&mut self) -> CgtResult {
        let result = calculate_cgt(self.entity, &self.inputs());
        self.result = Some(result);
        result
    }
}
