//! Demonstration driver for the hash-chained ledger. Builds the sample
//! chain, dumps it as JSON and exercises tamper detection; the ledger
//! itself lives in `hashchain-core`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use hashchain_core::chain::Ledger;
use hashchain_core::Transaction;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "hashchain-cli")]
#[command(about = "Demo driver for the append-only hash-chained ledger")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the sample ledger, print it as JSON and report validity
    Demo,
    /// Build the sample ledger, mutate a stored payload in place and show
    /// that validation catches it
    Tamper,
}

fn sample_ledger() -> Result<Ledger<Transaction>> {
    let mut ledger = Ledger::new()?;
    ledger.append(Transaction {
        from: "a".into(),
        to: "b".into(),
        amount: 1,
    })?;
    ledger.append(Transaction {
        from: "a".into(),
        to: "c".into(),
        amount: 2,
    })?;
    info!(
        height = ledger.len(),
        tip = %hex::encode(ledger.tip().hash),
        "sample ledger built"
    );
    Ok(ledger)
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo => {
            let ledger = sample_ledger()?;
            println!("{}", serde_json::to_string(&ledger)?);
            println!("valid: {}", ledger.is_valid());
        }
        Command::Tamper => {
            let mut ledger = sample_ledger()?;
            println!("before tamper: valid = {}", ledger.is_valid());

            // Rewrite a recorded amount directly, bypassing append
            ledger.blocks[1].data.amount = 2;

            println!("{}", serde_json::to_string(&ledger)?);
            println!("after tamper : valid = {}", ledger.is_valid());
            if let Err(err) = ledger.verify() {
                println!("detected     : {err}");
            }
        }
    }
    Ok(())
}
