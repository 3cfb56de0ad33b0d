use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use wikidict::{RelationFilter, TripleReader};

#[derive(Parser, Debug)]
#[command(
    name = "relation_filter",
    about = "Forward only the facts whose relation is allow-listed"
)]
struct Cli {
    /// Fact file to read (N-Triples-style lines)
    #[arg(long, env = "WIKIDICT_FILTER_INPUT")]
    input: PathBuf,

    /// Exactly three relation identifiers to forward
    #[arg(
        long,
        env = "WIKIDICT_FILTER_RELATIONS",
        value_delimiter = ',',
        default_value = "<occursIn>,<occursSince>,<occursUntil>"
    )]
    relations: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.input.is_file() {
        bail!("input file not found: {}", cli.input.display());
    }
    let relations: [String; 3] = cli
        .relations
        .try_into()
        .map_err(|got: Vec<String>| anyhow::anyhow!("expected exactly 3 relations, got {}", got.len()))?;
    let filter = RelationFilter::new(relations);

    let reader = TripleReader::from_path(&cli.input)
        .with_context(|| format!("opening {}", cli.input.display()))?;

    let stdout = io::stdout().lock();
    let mut out = io::BufWriter::new(stdout);
    let mut kept = 0usize;
    for fact in reader {
        let fact = fact.context("reading facts")?;
        if filter.matches(&fact) {
            writeln!(out, "{} {} {} .", fact.subject, fact.relation, fact.object)
                .context("writing to stdout")?;
            kept += 1;
        }
    }
    out.flush().context("flushing stdout")?;
    eprintln!("kept {kept} facts");
    Ok(())
}
