use thiserror::Error;
use tracing_subscriber::EnvFilter;

use stockfeed::{loader, Ledger, LoadError, ParseError};

/// Feed used when no path is given on the command line.
const DEFAULT_FEED: &str = "resources/stock.txt";

/// Any kind of error in the pipeline feed loading -> transaction processing -> stock output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("error while loading feed: {0}")]
    LoadError(#[from] LoadError),
    #[error("malformed transaction {index}: {source}")]
    ParseError { index: usize, source: ParseError },
    #[error("error during stock output: {0}")]
    CsvError(#[from] csv::Error),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr, stdout is reserved for the stock report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Error> {
    init_tracing();

    let path = std::env::args_os()
        // Skip argv[0]
        .nth(1)
        .unwrap_or_else(|| DEFAULT_FEED.into());

    let mut ledger = Ledger::new();
    for (line, index) in loader::load(path)?.iter().zip(1..) {
        ledger
            .process_line(line)
            .map_err(|source| Error::ParseError { index, source })?;
    }

    ledger.dump(std::io::stdout())?;

    Ok(())
}
