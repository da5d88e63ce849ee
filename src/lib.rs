pub mod core;
pub use crate::core::*;

pub mod error;
pub use crate::error::*;

pub mod ledger;
pub use crate::ledger::*;

pub mod loader;

pub mod transaction;
pub use crate::transaction::*;
