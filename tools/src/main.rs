//! This tool generates the node keys and validator keys of a local testnet.
//! For every node it writes `node_key.json` and `priv_validator_key.json` to
//! `<testnet_dir>/node<i>/.volnix/config/` and prints the node ID and the
//! validator address.
use clap::Parser;
use std::{io::IsTerminal as _, num::NonZeroUsize, path::PathBuf};
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;
use volnix_testnet_tools::{
    check_os_entropy, generate, verify, Config, FsPersister, KeyGenerator, DEFAULT_NUM_NODES,
    DEFAULT_TESTNET_DIR,
};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "generate-validator-keys")]
struct Args {
    /// Directory in which the node directories are created.
    #[arg(default_value = DEFAULT_TESTNET_DIR)]
    testnet_dir: PathBuf,
    /// Number of nodes to generate keys for.
    #[arg(default_value_t = DEFAULT_NUM_NODES)]
    num_nodes: NonZeroUsize,
    /// Check the existing key files instead of generating new ones.
    #[arg(long)]
    verify: bool,
}

impl Args {
    /// Extracts the testnet configuration from these args.
    fn config(&self) -> Config {
        Config {
            testnet_dir: self.testnet_dir.clone(),
            num_nodes: self.num_nodes,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr, the report goes to stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::env::var("NO_COLOR").is_err() && std::io::stderr().is_terminal())
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
    tracing::trace!(?args, "Starting");

    let cfg = args.config();
    let out = &mut std::io::stdout().lock();
    if args.verify {
        verify(&cfg, &FsPersister, out)?;
        return Ok(());
    }

    check_os_entropy()?;
    generate(&cfg, &mut KeyGenerator::os(), &mut FsPersister, out)?;
    Ok(())
}
