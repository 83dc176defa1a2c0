//! A binary to lift the intervals in a BED file from one genome build to the
//! other.
//!
//! ```shell
//! cargo run --release --bin=liftover-bed --features=binaries -- \
//!     -d hg19tohg38 -i prepared.bed -o lifted.bed
//! ```
//!
//! Unless a chain file is provided with `--chain`, the UCSC chain file for the
//! requested direction is downloaded into a cache directory (and reused on
//! subsequent runs).

use std::fs::File;
use std::ops::Deref;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use bedlift::Direction;
use bedlift::bed;
use bedlift::liftover;
use bedlift::liftover::ChainService;
use bedlift::liftover::chain;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// The name of the default cache directory within the system's temporary
/// directory.
const CACHE_DIR_NAME: &str = "bedlift";

////////////////////////////////////////////////////////////////////////////////////////
// Cache directory
////////////////////////////////////////////////////////////////////////////////////////

/// A directory where downloaded chain files are kept between runs.
struct CacheDirectory(PathBuf);

impl CacheDirectory {
    /// Creates a new [`CacheDirectory`] from the provided directory, creating
    /// the directory if it does not already exist.
    fn new(directory: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&directory).with_context(|| {
            format!("creating cache directory `{}`", directory.display())
        })?;

        Ok(Self(directory))
    }

    /// Creates a new [`CacheDirectory`] within the system's temporary
    /// directory.
    fn new_default() -> Result<Self> {
        Self::new(std::env::temp_dir().join(CACHE_DIR_NAME))
    }

    /// Attempts to download the chain file for a direction.
    ///
    /// If the chain file is already present, it is reused as-is.
    fn download_chain_file(&self, direction: Direction) -> Result<PathBuf> {
        let filepath = self.0.join(direction.chain_file_name());

        if filepath.exists() {
            info!("file path already exists: {}!", filepath.display());
            info!("assuming this file is correct and eliding downloading");
            return Ok(filepath);
        }

        let url = direction.download_url();
        info!("chain file: downloading {url}");

        let resp = reqwest::blocking::get(&url).context("downloading chain file")?;

        if !resp.status().is_success() {
            bail!(
                "chain file: download of {url} failed with status `{}`",
                resp.status()
            );
        }

        let bytes = resp.bytes().context("reading chain file bytes")?;

        // Only a complete download is moved to `filepath`.
        let partial = filepath.with_extension("partial");
        let mut out = File::create(&partial).context("creating new chain file")?;
        std::io::copy(&mut bytes.as_ref(), &mut out).context("writing chain file to disk")?;
        std::fs::rename(&partial, &filepath).context("moving chain file into place")?;

        info!("chain file: download completed");
        Ok(filepath)
    }
}

impl Deref for CacheDirectory {
    type Target = PathBuf;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Helpers
////////////////////////////////////////////////////////////////////////////////////////

/// Reads every record from a (potentially gzipped) BED file.
fn read_records(path: &Path) -> Result<Vec<bed::Record>> {
    let reader = bedlift::file::open(path)
        .with_context(|| format!("opening input file `{}`", path.display()))?;

    bed::Reader::new(reader)
        .records()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("reading input file `{}`", path.display()))
}

/// Builds the chain-backed liftover service for a direction.
fn chain_service(args: &Args) -> Result<ChainService> {
    let chain_file_path = match &args.chain {
        Some(path) => path.clone(),
        None => {
            let cache_dir = match &args.cache_dir {
                Some(dir) => CacheDirectory::new(dir.clone()),
                None => CacheDirectory::new_default(),
            }
            .context("creating cache directory")?;

            info!("cache directory: {}", cache_dir.display());

            cache_dir
                .download_chain_file(args.direction)
                .with_context(|| format!("chain file: downloading {}", args.direction.chain_name()))?
        }
    };

    let reader = bedlift::file::open(&chain_file_path).with_context(|| {
        format!("opening chain file `{}`", chain_file_path.display())
    })?;

    let machine = liftover::machine::Builder
        .try_build_from(chain::Reader::new(reader))
        .with_context(|| format!("loading chain file `{}`", chain_file_path.display()))?;

    Ok(ChainService::new(args.direction, machine))
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// Lifts the intervals in a BED file between hg19 and hg38.
#[derive(Parser)]
struct Args {
    /// The direction to lift over in.
    #[arg(short, long, value_enum)]
    direction: Direction,

    /// The input BED file (optionally gzipped).
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the converted intervals.
    #[arg(short, long)]
    output: PathBuf,

    /// Where to write the intervals that could not be converted.
    #[arg(short, long, default_value = "failed_mapping.txt")]
    unmapped: PathBuf,

    /// A local chain file to use instead of downloading one.
    #[arg(short, long)]
    chain: Option<PathBuf>,

    /// The directory downloaded chain files are cached in.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity,
}

fn throw(args: &Args) -> Result<()> {
    let records = read_records(&args.input)?;
    let service = chain_service(args)?;

    println!(
        "Direction: {} -> {}",
        args.direction.source(),
        args.direction.target()
    );

    let written = liftover::convert(args.direction, records, &service)
        .write_to(&args.output, &args.unmapped)
        .with_context(|| {
            format!(
                "writing `{}` and `{}`",
                args.output.display(),
                args.unmapped.display()
            )
        })?;

    if let Some(n) = written.unmapped() {
        println!(
            "Mapping incomplete: {n} regions saved to {}",
            args.unmapped.display()
        );
    }

    println!(
        "Conversion complete: {} regions saved to {}",
        written.converted(),
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
