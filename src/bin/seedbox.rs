//! Seedbox CLI - password-based recovery phrase encryption
//!
//! Command-line interface for encrypting recovery phrases into, and
//! recovering them from, the envelope format shared with the desktop and
//! mobile clients.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use seedbox::file_ops;
use seedbox::passphrase::{PassphraseReader, ReaderPassphraseReader, TerminalPassphraseReader};
use seedbox::strength;

#[derive(Parser)]
#[command(name = "seedbox")]
#[command(version)]
#[command(about = "Password-based recovery phrase encryption.", long_about = None)]
struct Cli {
    /// Read password from stdin instead of from terminal
    #[arg(long, global = true)]
    passphrase_stdin: bool,

    /// Log progress to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a recovery phrase
    #[command(alias = "e")]
    Encrypt {
        /// Path to the file containing the phrase to encrypt
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the envelope to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Encrypt even if the input is not a 12, 15, 18, 21 or 24 word phrase
        #[arg(long)]
        allow_nonstandard: bool,
    },

    /// Decrypt an envelope back into the recovery phrase
    #[command(alias = "d")]
    Decrypt {
        /// Path to the file containing the envelope
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the phrase to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Check whether a file holds a phrase of standard shape
    Check {
        /// Path to the file containing the phrase
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },

    /// Rate the strength of a password (advisory only)
    Strength,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Encrypt {
            input,
            output,
            allow_nonstandard,
        } => {
            let mut reader = get_passphrase_reader(cli.passphrase_stdin);
            file_ops::encrypt_file(&input, &output, &mut *reader, allow_nonstandard)
        }
        Commands::Decrypt { input, output } => {
            let mut reader = get_passphrase_reader(cli.passphrase_stdin);
            file_ops::decrypt_file(&input, &output, &mut *reader)
        }
        Commands::Check { input } => file_ops::check_file(&input).map(|valid| {
            if valid {
                println!("{}: standard recovery phrase format", input.display());
            } else {
                println!("{}: not a standard recovery phrase format", input.display());
                process::exit(1);
            }
        }),
        Commands::Strength => {
            let mut reader = get_passphrase_reader(cli.passphrase_stdin);
            reader.read_passphrase().map(|password| {
                let report = strength::check(&password);
                println!("Strength: {}", report.strength);
                println!("Score: {}/6", report.score);
                println!("Entropy: {:.1} bits", report.entropy_bits);
                for recommendation in &report.recommendations {
                    println!("- {}", recommendation);
                }
            })
        }
    };

    if let Err(e) = result {
        let mut message = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(&format!(": {}", cause));
            source = cause.source();
        }
        eprintln!("Error: {}", message);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Unable to set global default subscriber");
    }
}

fn get_passphrase_reader(use_stdin: bool) -> Box<dyn PassphraseReader> {
    if use_stdin {
        Box::new(ReaderPassphraseReader::new(Box::new(std::io::stdin())))
    } else {
        Box::new(TerminalPassphraseReader)
    }
}
