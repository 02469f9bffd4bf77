//! gpgseed — recover a seed-backed OpenPGP identity.
//!
//! Thin wrapper around [`gpgseed_recovery`]: parses the two flags,
//! initialises logging, runs the interactive session on the standard
//! streams, and maps failure to exit code 1 with `ERROR: <message>` on
//! stderr. SIGINT and SIGTERM keep their default disposition, so the
//! process terminates immediately without emitting a partial key.

use clap::Parser;
use gpgseed_recovery::{Recovery, RecoveryOptions};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Recover a GPG identity from a recovery seed.
#[derive(Parser)]
#[command(name = "gpgseed", version, about)]
struct Cli {
    /// Number of words in the recovery seed (12, 18 or 24).
    #[arg(long, default_value_t = 24)]
    words: usize,

    /// Prompt for a BIP-39 passphrase.
    #[arg(long)]
    passphrase: bool,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = RecoveryOptions {
        seed_length: cli.words,
        use_passphrase: cli.passphrase,
    };

    if let Err(e) = Recovery::new(options).run() {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}
