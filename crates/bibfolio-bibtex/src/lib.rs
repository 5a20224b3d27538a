//! Tolerant BibTeX parsing
//!
//! This crate turns bibliography source text into an ordered sequence of
//! [`Entry`] records. It is deliberately not a grammar-based parser: entry
//! blocks are located by scanning for `@TYPE{` markers, and field values are
//! pulled out of each block with per-field patterns, so irregular spacing or
//! a malformed tail never aborts the scan.
//!
//! Features:
//! - Marker-to-marker block scanning with graceful termination
//! - Per-field `name = value` extraction for the recognized field set
//! - LaTeX accent and escaped-punctuation decoding
//! - Year normalization to a 4-digit token or the `Unknown` sentinel

mod entry;
mod latex_decoder;
mod parser;

pub use entry::{Entry, UNKNOWN_YEAR};
pub use latex_decoder::decode_latex;
pub use parser::parse;
