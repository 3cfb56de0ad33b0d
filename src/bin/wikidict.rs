use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use wikidict::{extract, JsonlSink, LanguageCatalog, TripleReader, TsvSink};

#[derive(Parser, Debug)]
#[command(
    name = "wikidict",
    about = "Extract cross-lingual dictionaries from a Wikidata-style triple dump"
)]
struct Cli {
    /// Triple dump to read (N-Triples-style lines)
    #[arg(long, env = "WIKIDICT_INPUT")]
    input: PathBuf,

    /// Language priority catalog, most preferred first; the first entry is
    /// the reference language
    #[arg(
        long,
        env = "WIKIDICT_LANGUAGES",
        value_delimiter = ',',
        default_value = "en,de,fr,nl,it,es,ro,pl,ar,fa"
    )]
    languages: Vec<String>,

    /// Directory receiving one TSV file per dictionary; emissions are
    /// printed to stdout as JSONL when omitted
    #[arg(long, env = "WIKIDICT_OUTPUT")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.input.is_file() {
        bail!("input file not found: {}", cli.input.display());
    }
    if cli.languages.is_empty() {
        bail!("at least one language is required");
    }

    let catalog = LanguageCatalog::new(cli.languages);
    let reader = TripleReader::from_path(&cli.input)
        .with_context(|| format!("opening {}", cli.input.display()))?;

    let summary = match cli.output {
        Some(dir) => {
            let mut sink =
                TsvSink::new(&dir).with_context(|| format!("preparing {}", dir.display()))?;
            let summary = extract(reader, catalog, &mut sink).context("extraction failed")?;
            sink.finish().context("flushing dictionaries")?;
            summary
        }
        None => {
            let stdout = io::stdout().lock();
            let mut sink = JsonlSink::new(stdout);
            let summary = extract(reader, catalog, &mut sink).context("extraction failed")?;
            sink.finish().context("flushing stdout")?;
            summary
        }
    };

    eprintln!(
        "read {} triples, flushed {} items, wrote {} facts",
        summary.triples_read, summary.items_flushed, summary.facts_written
    );
    Ok(())
}
