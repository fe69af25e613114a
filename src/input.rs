//! Text-to-amount coercion and batch scenario records.
//!
//! Nothing here ever rejects an amount: text that does not read as a
//! non-negative number becomes zero. Only entity names and form commands
//! can be invalid.

use crate::tax::{CgtInputs, EntityType};
use cgtau_derive::FieldSchema;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown entity type '{0}' (expected individual, trust, smsf or company)")]
    UnknownEntity(String),
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("unrecognised form command: {0}")]
    UnknownCommand(String),
}

/// Keystroke filter: keep ASCII digits and decimal points only
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Largest amount read from text: one quadrillion dollars
pub fn max_amount() -> Decimal {
    dec!(1000000000000000)
}

/// Read an amount from free text such as `$1,250.50`.
///
/// Formatting characters are dropped and the longest leading number is used,
/// so `1.2.3` reads as 1.2. Empty, negative and unrepresentable values are
/// zero, as are values above [`max_amount`].
pub fn parse_amount(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let number = leading_number(&cleaned);

    let negative = number.starts_with('-');
    let unsigned = number.trim_start_matches('-');
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Decimal::ZERO;
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let literal = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    };

    match Decimal::from_str(&literal) {
        Ok(_) if negative => {
            log::warn!("Negative amount '{}' treated as zero", text);
            Decimal::ZERO
        }
        Ok(amount) if amount > max_amount() => {
            log::warn!("Amount '{}' above {} treated as zero", text, max_amount());
            Decimal::ZERO
        }
        Ok(amount) => amount,
        Err(err) => {
            log::warn!("Amount '{}' treated as zero: {}", text, err);
            Decimal::ZERO
        }
    }
}

/// Optional sign, digits and at most one decimal point
fn leading_number(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let mut seen_point = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_point => {
                seen_point = true;
                end += 1;
            }
            _ => break,
        }
    }
    &s[..end]
}

/// Description of one input column, generated by `#[derive(FieldSchema)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// JSON batch input
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchInput {
    pub scenarios: Vec<ScenarioRecord>,
}

/// One scenario row as it appears in a CSV or JSON batch file
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, FieldSchema)]
pub struct ScenarioRecord {
    /// Label shown next to the scenario's results
    #[serde(default)]
    pub id: Option<String>,
    /// Entity type: individual, trust, smsf or company
    pub entity: String,
    /// Unapplied capital losses from prior years
    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(with = "Option<String>")]
    pub prior_losses: Option<String>,
    /// Current year capital losses
    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(with = "Option<String>")]
    pub current_year_losses: Option<String>,
    /// Short term capital gains (assets held under 12 months)
    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(with = "Option<String>")]
    pub short_term_gains: Option<String>,
    /// Long term capital gains eligible for the discount
    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(with = "Option<String>")]
    pub long_term_gains: Option<String>,
}

/// A scenario ready for calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub id: Option<String>,
    pub entity: EntityType,
    pub inputs: CgtInputs,
}

impl TryFrom<ScenarioRecord> for Scenario {
    type Error = InputError;

    fn try_from(record: ScenarioRecord) -> Result<Self, Self::Error> {
        let amount = |text: &Option<String>| text.as_deref().map_or(Decimal::ZERO, parse_amount);
        Ok(Scenario {
            entity: record.entity.parse()?,
            inputs: CgtInputs::new(
                amount(&record.prior_losses),
                amount(&record.current_year_losses),
                amount(&record.short_term_gains),
                amount(&record.long_term_gains),
            ),
            id: record.id.filter(|id| !id.trim().is_empty()),
        })
    }
}

/// Accepts amounts written as text (`"$1,000"`) or as plain numbers
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an amount as text or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()).filter(|s| !s.trim().is_empty()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(AmountVisitor)
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<Scenario>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut scenarios = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let record: ScenarioRecord =
            result.map_err(|e| anyhow::anyhow!("row {}: {}", i + 1, e))?;
        let scenario = Scenario::try_from(record)
            .map_err(|e| anyhow::anyhow!("row {}: {}", i + 1, e))?;
        scenarios.push(scenario);
    }
    log::info!("Read {} scenarios from csv", scenarios.len());
    Ok(scenarios)
}

pub fn read_json<R: Read>(reader: R) -> anyhow::Result<Vec<Scenario>> {
    let input: BatchInput = serde_json::from_reader(reader)?;
    let scenarios = input
        .scenarios
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            Scenario::try_from(record).map_err(|e| anyhow::anyhow!("scenario {}: {}", i + 1, e))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    log::info!("Read {} scenarios from json", scenarios.len());
    Ok(scenarios)
}
