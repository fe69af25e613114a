pub mod au;
pub mod cgt;
pub mod notices;

pub use au::EntityType;
pub use cgt::{calculate_cgt, compute, CgtInputs, CgtResult};
pub use notices::Notice;
