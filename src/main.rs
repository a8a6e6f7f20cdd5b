//! Account Ledger CLI
//!
//! Replays a CSV command script against an in-memory ledger and prints the
//! resulting accounts.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- script.csv > accounts.csv
//! cargo run -- script.csv --statements
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use account_ledger::{LedgerError, Result, ScriptRunner};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(LedgerError::MissingArgument);
    }

    let script_path = &args[1];
    let statements = args[2..].iter().any(|arg| arg == "--statements");

    let file = File::open(script_path)?;
    let reader = BufReader::new(file);

    let mut runner = ScriptRunner::new();
    runner.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    if statements {
        runner.write_statements(handle)?;
    } else {
        runner.write_output(handle)?;
    }

    Ok(())
}
