use clap::Parser;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use title_common::aggregation::{aggregate_while, Termination};
use title_common::corpus::open_dump;
use title_common::decompression::Compression;
use title_common::ranking::{rank, write_report};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "title-freq")]
#[command(about = "Frequency table of the words in the article titles of a MediaWiki dump")]
struct Cli {
    /// Dump file (e.g. enwiki-latest-pages-articles.xml.bz2), or "-" for stdin
    dump: PathBuf,
    /// Compression of the dump: none, bz2 or xz (default: from the file extension)
    #[arg(long, short)]
    compression: Option<Compression>,
    /// Stop after reading this many pages and report what was counted so far
    #[arg(long)]
    max_pages: Option<u64>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Continue signal for the aggregator: allow at most `limit` pages.
fn page_budget(limit: Option<u64>) -> impl FnMut() -> bool {
    let mut pulled = 0u64;
    move || match limit {
        Some(limit) if pulled >= limit => false,
        _ => {
            pulled += 1;
            true
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let pages = match open_dump(&cli.dump, cli.compression) {
        Ok(pages) => pages,
        Err(err) => {
            eprintln!("Error setting up parser: {err}");
            return ExitCode::FAILURE;
        }
    };

    let aggregation = aggregate_while(pages, page_budget(cli.max_pages));
    match &aggregation.termination {
        Termination::Aborted(err) => eprintln!("{err}"),
        Termination::Cancelled => {
            tracing::info!(pages = aggregation.stats.documents, "page limit reached")
        }
        Termination::Exhausted => {}
    }

    let ranked = rank(&aggregation.table);
    let stdout = io::stdout();
    match write_report(&ranked, BufWriter::new(stdout.lock())) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error writing report: {err}");
            ExitCode::FAILURE
        }
    }
}
