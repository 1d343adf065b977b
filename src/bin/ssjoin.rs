//! `ssjoin` — small CLI front-end for the self-join and query paths, reading
//! the flat-file formats described in spec.md §6 and writing the benchmark
//! CSV format. This is the out-of-core-scope "flat-file reader / CSV writer"
//! collaborator wired to the core library as a runnable tool, not a
//! replacement for embedding the library directly.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use ssjoin::io::{
    read_flattened_raw_sets, read_flattened_sorted_raw_sets,
    read_flattened_sorted_transformed_sets, read_gzipped_flattened_raw_sets,
    read_gzipped_flattened_sorted_raw_sets, read_gzipped_flattened_sorted_transformed_sets,
    write_pairs_csv,
};
use ssjoin::{all_pairs, frequency_order_transform};

#[derive(Parser, Debug)]
#[command(name = "ssjoin", about = "Prefix-filtered set-similarity self-join over a flat-file collection")]
struct Cli {
    /// Path to the input flat file.
    input: PathBuf,

    /// Where to write the `x,y,similarity` CSV output. Defaults to stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Similarity function to apply.
    #[arg(long, default_value = "jaccard")]
    function: String,

    /// Similarity threshold in [0, 1].
    #[arg(long, default_value_t = 0.8)]
    threshold: f64,

    /// Input record shape.
    #[arg(long, value_enum, default_value_t = InputFormat::Raw)]
    format: InputFormat,

    /// The input file is gzip-compressed.
    #[arg(long)]
    gzip: bool,

    /// Raw-format lines are `<token> <set-id>` instead of `<set-id> <token>`.
    #[arg(long)]
    reversed: bool,

    /// Raw-format lines may interleave set-ids instead of being grouped.
    #[arg(long)]
    unsorted: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputFormat {
    /// `<set-id> <token>` string tokens; goes through the frequency-order
    /// transform before indexing.
    Raw,
    /// `<set-id:int> <token:int>`, already transformed and sorted ascending.
    Transformed,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("ssjoin: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> ssjoin::Result<()> {
    let file = File::open(&cli.input)?;

    let sets: Vec<Vec<u32>> = match (cli.format, cli.gzip) {
        (InputFormat::Transformed, false) => {
            let (_ids, sets) = read_flattened_sorted_transformed_sets(file)?;
            sets
        }
        (InputFormat::Transformed, true) => {
            let (_ids, sets) = read_gzipped_flattened_sorted_transformed_sets(file)?;
            sets
        }
        (InputFormat::Raw, true) if cli.unsorted => {
            let (_ids, raw_sets) = read_gzipped_flattened_raw_sets(file, cli.reversed)?;
            frequency_order_transform(&raw_sets).0
        }
        (InputFormat::Raw, true) => {
            let (_ids, raw_sets) = read_gzipped_flattened_sorted_raw_sets(file)?;
            frequency_order_transform(&raw_sets).0
        }
        (InputFormat::Raw, false) if cli.unsorted => {
            let (_ids, raw_sets) = read_flattened_raw_sets(file, cli.reversed)?;
            frequency_order_transform(&raw_sets).0
        }
        (InputFormat::Raw, false) => {
            let (_ids, raw_sets) = read_flattened_sorted_raw_sets(file)?;
            frequency_order_transform(&raw_sets).0
        }
    };

    tracing::info!(sets = sets.len(), function = %cli.function, threshold = cli.threshold, "running all_pairs");
    let pairs = all_pairs(&sets, &cli.function, cli.threshold)?;

    match cli.output {
        Some(path) => write_pairs_csv(BufWriter::new(File::create(path)?), pairs)?,
        None => write_pairs_csv(io::stdout().lock(), pairs)?,
    }
    Ok(())
}
