//! bibfolio binary
//!
//! Generates a static, browsable publications page from a BibTeX file.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;

use bibfolio_page::{classify_entries, render_page, PageOptions};

#[derive(Parser, Debug)]
#[command(
    name = "bibfolio",
    version,
    about = "Generate a publications HTML page from a BibTeX file"
)]
struct Cli {
    /// Input BibTeX file
    bib_file: PathBuf,

    /// Output HTML file
    out_html: PathBuf,

    /// Use pure CSS sibling filters instead of JavaScript
    #[arg(long)]
    no_js_filters: bool,

    /// Page title
    #[arg(long, default_value = "Publications")]
    title: String,

    /// Author name to bold in author lines ("First Last" or "Last, First")
    #[arg(long, value_name = "NAME")]
    highlight: Option<String>,

    /// Also write the retained, classified entries as pretty JSON
    #[arg(long, value_name = "PATH")]
    dump_entries: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let options = PageOptions {
        title: cli.title,
        highlight_author: cli.highlight,
        js_filters: !cli.no_js_filters,
    };

    let source = fs::read_to_string(&cli.bib_file)?;
    let entries = bibfolio_bibtex::parse(&source);
    tracing::debug!(
        entries = entries.len(),
        input = %cli.bib_file.display(),
        "parsed bibliography"
    );
    let publications = classify_entries(entries);

    if let Some(path) = &cli.dump_entries {
        fs::write(path, serde_json::to_string_pretty(&publications)?)?;
        tracing::info!(entries = publications.len(), dump = %path.display(), "dumped classified entries");
    }

    let page = render_page(&publications, &options);
    fs::write(&cli.out_html, &page.html)?;

    println!(
        "Written: {} (entries={}, years={})",
        cli.out_html.display(),
        page.entry_count,
        page.year_count
    );
    Ok(())
}
