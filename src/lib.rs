//! Australian Capital Gains Tax estimator.
//!
//! [`tax::compute`] applies the discount method for one entity and one year.
//! [`form::CgtForm`] holds the editable form state around it.

pub mod form;
pub mod input;
pub mod money;
pub mod tax;

pub use tax::{calculate_cgt, compute, CgtInputs, CgtResult, EntityType, Notice};
