//! `lifeboard` command line

mod cli;
mod run;

use anyhow::Context;
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lifeboard_core::Ledger;
use lifeboard_partition::FileStore;

/// Environment variable holding the log filter
const LOG_ENV: &str = "LIFEBOARD_LOG";

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "lifeboard_core=debug,lifeboard_partition=debug,warn"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let matches = cli::build().get_matches();
    let invocation = cli::parse(&matches)?;
    init_tracing(invocation.verbose);

    let config = run::resolve_config(&invocation)?;
    tracing::debug!(
        data_dir = %invocation.data_dir.display(),
        read_only = config.read_only,
        "opening ledger"
    );
    let mut ledger = Ledger::open(FileStore::new(&invocation.data_dir), config)
        .with_context(|| format!("failed to open {}", invocation.data_dir.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run::execute(&mut ledger, invocation.action, &mut out)?;
    out.flush()?;
    Ok(())
}
