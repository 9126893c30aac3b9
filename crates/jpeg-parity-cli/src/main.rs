//! jpeg-parity CLI - JPEG decoder drop-in validation tool

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jpeg_parity::Implementation;

mod commands;

/// Fixture decoded by the whole-program parity check.
const DEFAULT_FIXTURE: &str = "testdata/600x239_35kb.jpg";

/// Validate a candidate JPEG decoder against the reference.
#[derive(Parser)]
#[command(name = "jpeg-parity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the JPEG files a corpus directory yields
    Corpus {
        /// Corpus directory
        path: PathBuf,
    },

    /// Decode every corpus entry with both decoders and compare re-encodings
    Check {
        /// Corpus directory
        #[arg(default_value = "testdata")]
        path: PathBuf,

        /// Write the full report as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write a CSV summary
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Decode every corpus entry twice with one decoder and compare
    Determinism {
        /// Corpus directory
        #[arg(default_value = "testdata")]
        path: PathBuf,

        /// Decoder to check (std or opt)
        #[arg(long, env = "BENCH_FN", default_value = "std")]
        decoder: Implementation,
    },

    /// Decode one file and print its dimensions as WIDTHxHEIGHT
    Dims {
        /// JPEG file to decode
        #[arg(default_value = DEFAULT_FIXTURE)]
        fixture: PathBuf,

        /// Decoder to use (std or opt)
        #[arg(long, env = "BENCH_FN", default_value = "std")]
        decoder: Implementation,
    },

    /// Run `dims` once per decoder and require identical output
    Parity {
        /// JPEG file both programs decode
        #[arg(default_value = DEFAULT_FIXTURE)]
        fixture: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    match cli.command {
        Commands::Corpus { path } => commands::corpus::run(&path),
        Commands::Check { path, json, csv } => {
            commands::check::run(&path, json.as_deref(), csv.as_deref())
        }
        Commands::Determinism { path, decoder } => commands::check::determinism(&path, decoder),
        Commands::Dims { fixture, decoder } => commands::dims::run(&fixture, decoder),
        Commands::Parity { fixture } => commands::parity::run(&fixture),
    }
}
