use crate::tax::au::EntityType;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Amounts entered for one year. All values are non-negative.
///
/// Fields are private so `new` is the only place amounts are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CgtInputs {
    /// Unapplied capital losses from prior years
    prior_losses: Decimal,
    current_year_losses: Decimal,
    /// Gains on assets held less than 12 months
    short_term_gains: Decimal,
    /// Gains eligible for the discount
    long_term_gains: Decimal,
}

impl CgtInputs {
    /// Build inputs, clamping negative amounts to zero
    pub fn new(
        prior_losses: Decimal,
        current_year_losses: Decimal,
        short_term_gains: Decimal,
        long_term_gains: Decimal,
    ) -> Self {
        CgtInputs {
            prior_losses: prior_losses.max(Decimal::ZERO),
            current_year_losses: current_year_losses.max(Decimal::ZERO),
            short_term_gains: short_term_gains.max(Decimal::ZERO),
            long_term_gains: long_term_gains.max(Decimal::ZERO),
        }
    }

    pub fn prior_losses(&self) -> Decimal {
        self.prior_losses
    }

    pub fn current_year_losses(&self) -> Decimal {
        self.current_year_losses
    }

    pub fn short_term_gains(&self) -> Decimal {
        self.short_term_gains
    }

    pub fn long_term_gains(&self) -> Decimal {
        self.long_term_gains
    }

    /// Saturates at `Decimal::MAX`
    pub fn total_losses(&self) -> Decimal {
        self.prior_losses.saturating_add(self.current_year_losses)
    }

    /// Saturates at `Decimal::MAX`
    pub fn total_gains(&self) -> Decimal {
        self.short_term_gains.saturating_add(self.long_term_gains)
    }
}

/// Outcome of the discount method for one set of inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CgtResult {
    /// Total gains less total losses, negative for a net loss
    pub gross_gains: Decimal,
    pub discount: Decimal,
    /// Gross gain less discount, never below zero
    pub net_gains: Decimal,
    /// Net loss available for later years, as a positive amount
    pub losses_forward: Decimal,
}

pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculate gross gain, discount, net gain and losses carried forward.
///
/// Losses are applied to short term gains first, so only the long term gains
/// left after the offset attract the entity's discount.
pub fn calculate_cgt(entity: EntityType, inputs: &CgtInputs) -> CgtResult {
    log::debug!(
        "CGT inputs ({}): prior_losses={}, current_year_losses={}, short_term_gains={}, long_term_gains={}",
        entity,
        inputs.prior_losses,
        inputs.current_year_losses,
        inputs.short_term_gains,
        inputs.long_term_gains
    );

    let total_losses = inputs.total_losses();
    let remaining_losses = (total_losses - inputs.short_term_gains).max(Decimal::ZERO);
    let long_term_after_losses = (inputs.long_term_gains - remaining_losses).max(Decimal::ZERO);
    let gross_gains = inputs.total_gains() - total_losses;

    let discount = long_term_after_losses * entity.discount_rate();
    // gross can be as low as -Decimal::MAX
    let net_gains = gross_gains.saturating_sub(discount).max(Decimal::ZERO);
    let losses_forward = if gross_gains < Decimal::ZERO {
        -gross_gains
    } else {
        Decimal::ZERO
    };

    log::debug!(
        "CGT result: gross={}, discount={}, net={}, losses_forward={}",
        gross_gains,
        discount,
        net_gains,
        losses_forward
    );

    CgtResult {
        gross_gains,
        discount,
        net_gains,
        losses_forward,
    }
}

/// Calculate from the four amounts directly
pub fn compute(
    entity: EntityType,
    prior_losses: Decimal,
    current_year_losses: Decimal,
    short_term_gains: Decimal,
    long_term_gains: Decimal,
) -> CgtResult {
    let inputs = CgtInputs::new(
        prior_losses,
        current_year_losses,
        short_term_gains,
        long_term_gains,
    );
    calculate_cgt(entity, &inputs)
}
