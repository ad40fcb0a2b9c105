use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use uniqmer_lib::{
    input::load_sequence, reverse_complement, scan_unique, CoordinateSink, KmerIndexBuilder,
};

#[derive(Parser)]
#[command(name = "uniqmer")]
#[command(version)]
#[command(about = "Record the coordinates of unique k-mers in a genome", long_about = None)]
struct Cli {
    /// K-mer length
    #[arg(short, long)]
    k: usize,

    /// Input file: raw nucleotide text or single-record FASTA
    #[arg(short, long)]
    input: String,

    /// Output file (LZ4 compressed, must end in '.lz4'); omit for stats only
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> Result<()> {
    // Initialize tracing: use RUST_LOG if set, otherwise default to info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.k == 0 {
        bail!("k must be at least 1");
    }
    match &cli.output {
        Some(output) if !output.ends_with(".lz4") => {
            bail!("output file must end in '.lz4'");
        }
        Some(_) => {}
        None => info!("no output file specified, will print stats only"),
    }

    info!("reading input");
    let sequence = load_sequence(&cli.input)?;
    info!("bases: {}", sequence.len());

    info!("reverse complementing");
    let rc = reverse_complement(&sequence)?;

    info!("counting k-mers (k = {})", cli.k);
    let mut builder = KmerIndexBuilder::new(cli.k);
    builder.ingest(&sequence, &rc);
    let index = builder.finish();

    info!("scanning for unique k-mers");
    let stats = match &cli.output {
        Some(path) => {
            let mut sink = CoordinateSink::create(path)?;
            let stats = scan_unique(&sequence, &rc, &index, Some(&mut sink))?;
            sink.finish()?;
            stats
        }
        None => scan_unique(&sequence, &rc, &index, None::<&mut CoordinateSink>)?,
    };

    info!("kmers: {}", index.num_distinct());
    info!("unique: {}", stats.unique_kmers);
    info!("lines: {}", stats.lines_written);

    Ok(())
}
