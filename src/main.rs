use std::{
    fs::{write, File},
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use geonames_linker::{
    utils::open_lines, EntityResolver, Format, GazetteerIndex, Linker, NEARBY_THRESHOLD_DEGREES,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
struct Cli {
    /// GeoNames dump, e.g. allCountries.txt or allCountries.txt.zst
    #[arg(long)]
    gazetteer: PathBuf,

    /// Fact stream, `-` for stdin
    #[arg(long, default_value = "-")]
    facts: PathBuf,

    /// Where to write the links, stdout if omitted
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    format: Format,

    /// Maximum angular distance in degrees for a same-named place to match
    #[arg(long, default_value_t = NEARBY_THRESHOLD_DEGREES)]
    threshold: f64,

    /// Write run statistics as JSON
    #[arg(long)]
    stats: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();

    let index = GazetteerIndex::load(&cli.gazetteer)
        .with_context(|| format!("failed to load gazetteer {}", cli.gazetteer.display()))?;
    let resolver = EntityResolver::with_threshold(&index, cli.threshold);

    let mut output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    info!("Linking facts from {}", cli.facts.display());
    let input = open_lines(&cli.facts)
        .with_context(|| format!("failed to open facts {}", cli.facts.display()))?;
    let stats = Linker::new(&resolver)
        .run(cli.format.read(input), |link| {
            cli.format.write(&mut output, &link.fact())
        })
        .context("failed to link facts")?;
    output.flush()?;

    stats.log();
    if let Some(path) = &cli.stats {
        let mut json = serde_json::to_string_pretty(&stats)?;
        json.push('\n');
        write(path, json)?;
    }

    Ok(())
}
