use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use twoply_uci::UciEngine;

fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
    info!("twoply starting");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    UciEngine::new().run(stdin.lock(), &mut stdout)?;
    Ok(())
}
