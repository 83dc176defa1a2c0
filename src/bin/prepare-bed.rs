//! A binary to standardize loosely formatted genomic coordinates into a BED
//! file.
//!
//! ```shell
//! cargo run --release --bin=prepare-bed --features=binaries -- -i positions.txt
//! ```
//!
//! Each line of the input is searched for a chromosome and one or two
//! one-based positions (e.g., `chr6:160585140`, `6 160585140-160585170`).
//! Lines without a recognizable coordinate are skipped.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// Standardizes genomic coordinates into a BED file.
#[derive(Parser)]
struct Args {
    /// The input file (optionally gzipped).
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the BED file.
    #[arg(short, long, default_value = "prepared.bed")]
    output: PathBuf,

    #[command(flatten)]
    verbose: Verbosity,
}

fn throw(args: &Args) -> Result<()> {
    println!("Standardizing formats in {}...", args.input.display());

    let reader = bedlift::file::open(&args.input)
        .with_context(|| format!("opening input file `{}`", args.input.display()))?;

    let writer = File::create(&args.output)
        .map(BufWriter::new)
        .with_context(|| format!("creating output file `{}`", args.output.display()))?;

    let n = bedlift::normalize::normalize_lines(reader, writer).with_context(|| {
        format!(
            "standardizing `{}` into `{}`",
            args.input.display(),
            args.output.display()
        )
    })?;

    info!("wrote {n} records to {}", args.output.display());
    println!(
        "Created {} with {n} BED regions.",
        args.output.display()
    );

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    throw(&args)
}
