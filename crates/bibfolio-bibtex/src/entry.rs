//! Bibliography entry data structures

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel used when no 4-digit publication year can be recovered.
pub const UNKNOWN_YEAR: &str = "Unknown";

/// A parsed bibliography entry.
///
/// `fields` holds only the fields actually found in the source block, so an
/// absent field means "unknown", not "blank". `year` is always present:
/// either a 4-digit token in 1900–2099 or [`UNKNOWN_YEAR`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Lower-cased record type tag (`article`, `inproceedings`, ...).
    /// Free-form: unknown tags are kept as-is rather than canonicalized.
    pub entry_type: String,
    /// Citation key; empty when the source block is malformed.
    pub key: String,
    /// The untouched source block, preserved verbatim for display.
    pub raw_bibtex: String,
    /// Decoded field values keyed by lower-case field name.
    pub fields: BTreeMap<String, String>,
    /// Normalized publication year.
    pub year: String,
}

impl Entry {
    /// Get a decoded field value by name.
    pub fn get_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field value, or the empty string when the field is absent.
    pub fn field_or_empty(&self, name: &str) -> &str {
        self.get_field(name).unwrap_or("")
    }

    /// Get the title field
    pub fn title(&self) -> Option<&str> {
        self.get_field("title")
    }

    /// Get the author field
    pub fn author(&self) -> Option<&str> {
        self.get_field("author")
    }

    /// Get the journal field
    pub fn journal(&self) -> Option<&str> {
        self.get_field("journal")
    }

    /// Get the booktitle field
    pub fn booktitle(&self) -> Option<&str> {
        self.get_field("booktitle")
    }

    /// Get the institution field
    pub fn institution(&self) -> Option<&str> {
        self.get_field("institution")
    }

    /// Get the publisher field
    pub fn publisher(&self) -> Option<&str> {
        self.get_field("publisher")
    }

    /// Get the organization field
    pub fn organization(&self) -> Option<&str> {
        self.get_field("organization")
    }

    /// Get the keywords field
    pub fn keywords(&self) -> Option<&str> {
        self.get_field("keywords")
    }

    /// Get the volume field
    pub fn volume(&self) -> Option<&str> {
        self.get_field("volume")
    }

    /// Get the number field
    pub fn number(&self) -> Option<&str> {
        self.get_field("number")
    }

    /// Get the pages field
    pub fn pages(&self) -> Option<&str> {
        self.get_field("pages")
    }
}
