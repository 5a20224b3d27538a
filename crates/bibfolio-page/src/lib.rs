//! Publications page generation
//!
//! Turns bibliography source text into a static, browsable HTML page:
//! parse the entries, drop preprints, classify the rest into topic
//! categories, group by year, and render one self-contained document.
//!
//! The whole pipeline is synchronous and in-memory; the only I/O is the
//! single read and single write in [`generate_file`].

mod category;
mod classify;
mod render;

pub use bibfolio_bibtex::Entry;
pub use category::Category;
pub use classify::{assign_category, classify_entries, is_preprint, Publication};
pub use render::{group_by_year, render_page, PageOptions, RenderedPage};

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure reading the bibliography or writing the page.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to read bibliography {path}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write page {path}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Generate a page from bibliography source text.
pub fn generate(source: &str, options: &PageOptions) -> RenderedPage {
    let entries = bibfolio_bibtex::parse(source);
    tracing::debug!(entries = entries.len(), "parsed bibliography source");
    let publications = classify_entries(entries);
    render_page(&publications, options)
}

/// One-shot pipeline: read the bibliography at `input`, write the rendered
/// page to `output`, and report what was written.
pub fn generate_file(
    input: &Path,
    output: &Path,
    options: &PageOptions,
) -> Result<RenderedPage, GenerateError> {
    let source = std::fs::read_to_string(input).map_err(|source| GenerateError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;
    let page = generate(&source, options);
    std::fs::write(output, &page.html).map_err(|source| GenerateError::WriteOutput {
        path: output.to_path_buf(),
        source,
    })?;
    tracing::info!(
        entries = page.entry_count,
        years = page.year_count,
        output = %output.display(),
        "wrote publications page"
    );
    Ok(page)
}
