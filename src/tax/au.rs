use crate::input::InputError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Entity the capital gains are assessed for. Determines the CGT discount rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityType {
    /// Individuals and trusts: 50% discount
    #[default]
    IndividualOrTrust,
    /// Complying superannuation funds: one third discount
    Smsf,
    /// Companies receive no discount
    Company,
}

impl EntityType {
    pub const ALL: [EntityType; 3] = [
        EntityType::IndividualOrTrust,
        EntityType::Smsf,
        EntityType::Company,
    ];

    /// Discount applied to long term gains that survive the loss offset
    pub fn discount_rate(&self) -> Decimal {
        match self {
            EntityType::IndividualOrTrust => dec!(0.5),
            EntityType::Smsf => dec!(0.3333),
            EntityType::Company => Decimal::ZERO,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            EntityType::IndividualOrTrust => "Individual / Trust",
            EntityType::Smsf => "SMSF",
            EntityType::Company => "Company",
        }
    }
}

impl FromStr for EntityType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "individual" | "trust" | "individualortrust" | "individualtrust" => {
                Ok(EntityType::IndividualOrTrust)
            }
            "smsf" | "super" | "superfund" => Ok(EntityType::Smsf),
            "company" => Ok(EntityType::Company),
            _ => Err(InputError::UnknownEntity(s.to_string())),
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Gains or losses for the year above this amount need a CGT schedule lodged
pub fn cgt_schedule_threshold() -> Decimal {
    dec!(10000)
}
