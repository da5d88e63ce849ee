//! Error types for this crate.
use std::path::PathBuf;

use thiserror::Error;

use crate::{OrderRef, Sku};

/// Any kind of error that can happen when parsing a [crate::Transaction] from a feed line.
/// These are fatal to a run: the feed is malformed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
pub enum ParseError {
    #[error("empty transaction")]
    EmptyTransaction,
    #[error("unknown transaction type '{0}'")]
    UnknownTx(String),
    #[error("order reference not provided")]
    MissingOrderRef,
    #[error("assembled SKU not provided")]
    MissingSku,
    #[error("quantity not provided for SKU '{0}'")]
    MissingQuantity(Sku),
    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),
}

/// A well-formed transaction that the [crate::Ledger] could not apply. The feed can carry on
/// past these.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
pub enum LedgerError {
    #[error("order not found: {0}")]
    OrderNotFound(OrderRef),
}

/// Failure to read a feed with [crate::loader::load].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("source empty: {}", .0.display())]
    Empty(PathBuf),
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
