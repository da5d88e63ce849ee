//! Define all supported transactions, and how they are read from a feed line.
use crate::core::{OrderRef, Quantity, Sku};
use crate::error::ParseError;

/// A generic [Transaction].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Transaction {
    SetStock(SetStock),
    AddStock(AddStock),
    Order(Order),
    Cancelled(Cancelled),
    Assemble(Assemble),
}

/// A quantity of a single SKU, the argument unit shared by most transactions.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StockLine {
    pub sku: Sku,
    pub quantity: Quantity,
}

/// Overwrite the stock level of each SKU. A SKU given more than once has its quantities summed
/// before the stock level is overwritten.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetStock {
    pub lines: Vec<StockLine>,
}

/// Increase the stock level of each SKU by the quantity given, one line after the other.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AddStock {
    pub lines: Vec<StockLine>,
}

/// Fulfil an order by taking its lines out of stock. The order is remembered under its
/// reference, so that a later [Cancelled] can put the stock back.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Order {
    pub reference: OrderRef,
    pub lines: Vec<StockLine>,
}

/// Cancel a previously fulfilled [Order], returning its lines to stock. Cancelling an unknown
/// order is an error, and a no-op.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cancelled {
    pub reference: OrderRef,
}

/// Build one unit of `target` out of its components, which are taken out of stock. Unlike an
/// [Order], this cannot be cancelled.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Assemble {
    pub target: Sku,
    pub components: Vec<StockLine>,
}

impl Transaction {
    pub const SET_STOCK: &'static str = "set-stock";
    pub const ADD_STOCK: &'static str = "add-stock";
    pub const ORDER: &'static str = "order";
    pub const CANCELLED: &'static str = "cancelled";
    pub const ASSEMBLE: &'static str = "assemble";

    /// The keyword introducing this kind of transaction in a feed.
    pub fn keyword(&self) -> &'static str {
        match self {
            Transaction::SetStock(_) => Self::SET_STOCK,
            Transaction::AddStock(_) => Self::ADD_STOCK,
            Transaction::Order(_) => Self::ORDER,
            Transaction::Cancelled(_) => Self::CANCELLED,
            Transaction::Assemble(_) => Self::ASSEMBLE,
        }
    }
}

impl std::str::FromStr for Transaction {
    type Err = ParseError;

    /// Parse a feed line: a keyword followed by its arguments, all separated by whitespace.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().ok_or(ParseError::EmptyTransaction)?;

        let tx = match keyword {
            Self::SET_STOCK => Transaction::SetStock(SetStock {
                lines: parse_stock_lines(tokens)?,
            }),
            Self::ADD_STOCK => Transaction::AddStock(AddStock {
                lines: parse_stock_lines(tokens)?,
            }),
            Self::ORDER => {
                let reference = tokens.next().ok_or(ParseError::MissingOrderRef)?.into();
                Transaction::Order(Order {
                    reference,
                    lines: parse_stock_lines(tokens)?,
                })
            }
            // Anything past the reference is ignored
            Self::CANCELLED => Transaction::Cancelled(Cancelled {
                reference: tokens.next().ok_or(ParseError::MissingOrderRef)?.into(),
            }),
            Self::ASSEMBLE => {
                let target = tokens.next().ok_or(ParseError::MissingSku)?.into();
                Transaction::Assemble(Assemble {
                    target,
                    components: parse_stock_lines(tokens)?,
                })
            }
            unknown => return Err(ParseError::UnknownTx(unknown.to_owned())),
        };
        Ok(tx)
    }
}

fn parse_stock_lines<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
) -> Result<Vec<StockLine>, ParseError> {
    let mut lines = Vec::new();
    while let Some(sku) = tokens.next() {
        let sku = Sku::from(sku);
        let quantity = tokens
            .next()
            .ok_or_else(|| ParseError::MissingQuantity(sku.clone()))?;
        let quantity = quantity
            .parse()
            .map_err(|_| ParseError::InvalidQuantity(quantity.to_owned()))?;
        lines.push(StockLine { sku, quantity });
    }
    Ok(lines)
}

#[cfg(test)]
mod test {
    use super::*;

    fn line(sku: &str, quantity: i64) -> StockLine {
        StockLine {
            sku: sku.into(),
            quantity: Quantity(quantity),
        }
    }

    #[test]
    fn parse_set_stock() {
        let tx: Transaction = "set-stock AB-6 100 CD-3 -2".parse().unwrap();
        assert_eq!(
            tx,
            Transaction::SetStock(SetStock {
                lines: vec![line("AB-6", 100), line("CD-3", -2)]
            })
        );
        assert_eq!(tx.keyword(), Transaction::SET_STOCK);
    }

    #[test]
    fn parse_ignores_repeated_whitespace() {
        let tx: Transaction = "  add-stock\tCD-3   5 ".parse().unwrap();
        assert_eq!(
            tx,
            Transaction::AddStock(AddStock {
                lines: vec![line("CD-3", 5)]
            })
        );
    }

    #[test]
    fn parse_order() {
        let tx: Transaction = "order ON-234 CD-3 1 DE-1 1".parse().unwrap();
        assert_eq!(
            tx,
            Transaction::Order(Order {
                reference: "ON-234".into(),
                lines: vec![line("CD-3", 1), line("DE-1", 1)],
            })
        );
    }

    #[test]
    fn parse_cancelled() {
        let tx: Transaction = "cancelled ON-234 trailing".parse().unwrap();
        assert_eq!(
            tx,
            Transaction::Cancelled(Cancelled {
                reference: "ON-234".into()
            })
        );
    }

    #[test]
    fn parse_assemble() {
        let tx: Transaction = "assemble KIT-1 AB-6 2 CD-3 1".parse().unwrap();
        assert_eq!(
            tx,
            Transaction::Assemble(Assemble {
                target: "KIT-1".into(),
                components: vec![line("AB-6", 2), line("CD-3", 1)],
            })
        );
    }

    #[test]
    fn parse_errors() {
        let parse = |line: &str| line.parse::<Transaction>().unwrap_err();
        assert_eq!(parse(""), ParseError::EmptyTransaction);
        assert_eq!(parse("   "), ParseError::EmptyTransaction);
        assert_eq!(
            parse("remove-stock AB-6 1"),
            ParseError::UnknownTx("remove-stock".into())
        );
        assert_eq!(
            parse("set-stock AB-6 lots"),
            ParseError::InvalidQuantity("lots".into())
        );
        assert_eq!(
            parse("add-stock AB-6 1 CD-3"),
            ParseError::MissingQuantity("CD-3".into())
        );
        assert_eq!(parse("order"), ParseError::MissingOrderRef);
        assert_eq!(parse("cancelled"), ParseError::MissingOrderRef);
        assert_eq!(parse("assemble"), ParseError::MissingSku);
    }
}
