//! A ledger implementation to track stock levels and open orders.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, error, info};

use crate::{
    AddStock, Assemble, Cancelled, LedgerError, Order, OrderRef, ParseError, Quantity, SetStock,
    Sku, StockLine, Transaction,
};

/// A ledger of stock levels, which processes transactions one at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    // Ordered by SKU, so that reports are stable
    stock: BTreeMap<Sku, Quantity>,
    open_orders: HashMap<OrderRef, Vec<StockLine>>,
}

type LedgerResult<T> = Result<T, LedgerError>;

impl Ledger {
    pub fn new() -> Self {
        Default::default()
    }

    /// Current stock levels, ordered by SKU. Levels can be negative.
    pub fn stock(&self) -> &BTreeMap<Sku, Quantity> {
        &self.stock
    }

    /// The lines taken out of stock by an order, if it is still open.
    pub fn order(&self, reference: &OrderRef) -> Option<&[StockLine]> {
        self.open_orders.get(reference).map(Vec::as_slice)
    }

    /// Serialize the stock levels as space-separated `SKU quantity` records, one per line.
    pub fn dump<W: std::io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);
        for record in self.stock.iter() {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Parse and apply a single feed line.
    ///
    /// A malformed line is returned as an error, and should stop processing of the feed. A
    /// well-formed transaction which cannot be applied is only logged.
    pub fn process_line(&mut self, line: &str) -> Result<(), ParseError> {
        let tx: Transaction = line.parse()?;
        debug!(kind = tx.keyword(), "processing transaction");
        if self.process(tx).is_err() {
            info!("Could not process transaction: {}", line);
        }
        Ok(())
    }

    pub fn process(&mut self, tx: Transaction) -> LedgerResult<()> {
        match tx {
            Transaction::SetStock(SetStock { lines }) => self.set(lines),
            Transaction::AddStock(AddStock { lines }) => self.add(&lines),
            Transaction::Order(Order { reference, lines }) => self.fulfil(reference, lines),
            Transaction::Cancelled(Cancelled { reference }) => self.cancel(&reference),
            Transaction::Assemble(Assemble { target, components }) => {
                self.assemble(target, &components)
            }
        }
    }

    fn set(&mut self, lines: Vec<StockLine>) -> LedgerResult<()> {
        // Sum repeated SKUs, keeping the order in which they first appear
        let mut grouped: Vec<StockLine> = Vec::with_capacity(lines.len());
        let mut positions: HashMap<Sku, usize> = HashMap::with_capacity(lines.len());
        for line in lines {
            match positions.get(&line.sku) {
                Some(&position) => grouped[position].quantity += line.quantity,
                None => {
                    positions.insert(line.sku.clone(), grouped.len());
                    grouped.push(line);
                }
            }
        }

        for StockLine { sku, quantity } in grouped {
            if quantity.is_negative() {
                error!("Stock level negative: {}", sku);
            }
            self.stock.insert(sku, quantity);
        }
        Ok(())
    }

    fn add(&mut self, lines: &[StockLine]) -> LedgerResult<()> {
        for line in lines {
            // Negative levels are not reported when adding stock
            self.delta(&line.sku, line.quantity);
        }
        Ok(())
    }

    fn fulfil(&mut self, reference: OrderRef, lines: Vec<StockLine>) -> LedgerResult<()> {
        self.remove(&lines);
        self.open_orders.insert(reference, lines);
        Ok(())
    }

    fn cancel(&mut self, reference: &OrderRef) -> LedgerResult<()> {
        let lines = match self.open_orders.remove(reference) {
            Some(lines) => lines,
            None => {
                info!("Order not found: {}", reference);
                return Err(LedgerError::OrderNotFound(reference.clone()));
            }
        };
        self.add(&lines)
    }

    fn assemble(&mut self, target: Sku, components: &[StockLine]) -> LedgerResult<()> {
        self.remove(components);
        self.delta(&target, Quantity::ONE);
        Ok(())
    }

    fn remove(&mut self, lines: &[StockLine]) {
        for line in lines {
            let new_level = self.delta(&line.sku, -line.quantity);
            if new_level.is_negative() {
                error!("Stock level negative: {}", line.sku);
            }
        }
    }

    /// Apply a delta to the stock level of a SKU, which starts at zero if unknown. Returns the
    /// new stock level.
    fn delta(&mut self, sku: &Sku, delta: Quantity) -> Quantity {
        let level = self.stock.entry(sku.clone()).or_default();
        *level += delta;
        *level
    }
}
