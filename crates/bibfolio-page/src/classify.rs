//! Preprint filtering and topic classification
//!
//! Bibliographic metadata carries no structured topic field, so retained
//! entries are categorized with ordered keyword rules over their free-text
//! fields, with a venue fallback and a catch-all default. Classification is
//! a pure function of an entry's fields: absent fields read as empty
//! strings and every non-preprint entry receives exactly one category.

use bibfolio_bibtex::Entry;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A retained entry together with its assigned topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(flatten)]
    pub entry: Entry,
    pub category: Category,
}

lazy_static! {
    /// Topic rules, evaluated in declaration order. Declaration order is
    /// not the tie-break order; see [`Category::priority`].
    static ref TOPIC_RULES: Vec<(Category, Regex)> = vec![
        (
            Category::Quantum,
            rule(r"quantum|qubit|neutral\s+atom|hpcqc|mqss|qpi|qdmi|pulse\s+level|fidelity|superconducting"),
        ),
        (
            Category::ProgrammingModel,
            rule(r"\bmpi\b|message\s+passing|collective|mpit|mpi_t|pmix|sessions|openmp|ompd|ompt|malleability|runtime\s+system"),
        ),
        (
            Category::EdgeIot,
            rule(r"edge|dds|middleware|real\-time|sensor|stream|kubernetes|iot"),
        ),
        (
            Category::Ai,
            rule(r"machine\s+learning|neural|inference|benchmark.*ml|dataset\s+distillation|classification|deep\s+learning|artificial\s+intelligence"),
        ),
        (
            Category::Architecture,
            rule(r"architecture|gpu|fpga|memory|cache|numa|vector\s+extension|cxl|network\s+topolog|hardware|hotplug|gate\s+drive|coherent\s+mesh"),
        ),
        (
            Category::Applications,
            rule(r"synthetic\s+aperture\s+radar|sar|earth\s+observation|ocean|fusion|reactor|fluid|cfd|medical|imaging|lung|dielectric|workflows|visualization'96|graphics|vrml|crashworthiness|automotive"),
        ),
        (
            Category::Hpc,
            rule(r"high\s+performance\s+computing|supercomput|hpc\b|sc\d{2}|ipdps|euro\-?mpi|cluster\b|parallel\s+comput|exascale|performance\s+analysis|power\s+management|overprovision|dvfs|resilien|fault\s+tolerance"),
        ),
    ];

    /// Venue abbreviations that imply an HPC publication when no topic
    /// rule hits. Matched against lower-cased booktitle + journal.
    static ref HPC_VENUES: Regex =
        Regex::new(r"sc\d{2}|ipdps|euro\-?mpi|cluster|hpcs|hpdc|ics|isc").unwrap();
}

fn rule(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).unwrap()
}

/// Whether the entry is an unrefereed archive submission.
///
/// Preprints are excluded from the page entirely: they contribute to no
/// category and appear in no year section.
pub fn is_preprint(entry: &Entry) -> bool {
    let venues = [
        entry.field_or_empty("journal"),
        entry.field_or_empty("booktitle"),
        entry.field_or_empty("publisher"),
        entry.field_or_empty("organization"),
    ]
    .join(" ")
    .to_lowercase();
    venues.contains("arxiv") || venues.contains("preprint")
}

/// Assign exactly one topic to an entry.
///
/// Among the rules that hit, the category with the lowest
/// [`Category::priority`] rank wins. With no hit, an HPC venue match
/// decides; failing that, Applications is the catch-all, so an entry with
/// entirely empty fields still classifies.
pub fn assign_category(entry: &Entry) -> Category {
    let text = [
        entry.field_or_empty("title"),
        entry.field_or_empty("journal"),
        entry.field_or_empty("booktitle"),
        entry.field_or_empty("institution"),
        entry.field_or_empty("publisher"),
        entry.field_or_empty("organization"),
        entry.field_or_empty("keywords"),
    ]
    .join(" ");

    let winner = TOPIC_RULES
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&text))
        .map(|(category, _)| *category)
        .min_by_key(|category| category.priority());
    if let Some(category) = winner {
        return category;
    }

    let venue = format!(
        "{} {}",
        entry.field_or_empty("booktitle"),
        entry.field_or_empty("journal")
    )
    .to_lowercase();
    if HPC_VENUES.is_match(&venue) {
        return Category::Hpc;
    }

    Category::Applications
}

/// Drop preprints and tag every retained entry with its topic.
pub fn classify_entries(entries: Vec<Entry>) -> Vec<Publication> {
    let total = entries.len();
    let publications: Vec<Publication> = entries
        .into_iter()
        .filter(|entry| !is_preprint(entry))
        .map(|entry| {
            let category = assign_category(&entry);
            Publication { entry, category }
        })
        .collect();
    tracing::debug!(
        total,
        retained = publications.len(),
        "classified bibliography entries"
    );
    publications
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn entry_with(fields: &[(&str, &str)]) -> Entry {
        let fields: BTreeMap<String, String> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Entry {
            entry_type: "article".to_string(),
            key: "Test".to_string(),
            raw_bibtex: String::new(),
            fields,
            year: "2024".to_string(),
        }
    }

    #[test]
    fn test_preprint_detection() {
        assert!(is_preprint(&entry_with(&[(
            "journal",
            "arXiv e-prints"
        )])));
        assert!(is_preprint(&entry_with(&[(
            "booktitle",
            "arXiv preprint"
        )])));
        assert!(is_preprint(&entry_with(&[(
            "publisher",
            "Preprint Server"
        )])));
        assert!(!is_preprint(&entry_with(&[("journal", "Nature")])));
        assert!(!is_preprint(&entry_with(&[])));
    }

    #[test]
    fn test_title_fields_do_not_mark_preprints() {
        // Only venue-like fields participate in the preprint test.
        assert!(!is_preprint(&entry_with(&[(
            "title",
            "Lessons from arXiv Usage"
        )])));
    }

    #[test]
    fn test_each_rule_hits_its_category() {
        let cases = [
            ("Qubit Fidelity Studies", Category::Quantum),
            ("OpenMP Runtime System Design", Category::ProgrammingModel),
            ("Kubernetes at the Sensor Edge", Category::EdgeIot),
            ("Deep Learning for Text", Category::Ai),
            ("NUMA Cache Behavior", Category::Architecture),
            ("Ocean Current Simulation", Category::Applications),
            ("Exascale Fault Tolerance", Category::Hpc),
        ];
        for (title, expected) in cases {
            assert_eq!(
                assign_category(&entry_with(&[("title", title)])),
                expected,
                "title {:?}",
                title
            );
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            assign_category(&entry_with(&[("title", "QUANTUM COMPUTING")])),
            Category::Quantum
        );
    }

    #[test]
    fn test_priority_tie_break_prefers_quantum_over_ai() {
        let entry = entry_with(&[(
            "title",
            "Quantum Circuits for Machine Learning",
        )]);
        assert_eq!(assign_category(&entry), Category::Quantum);
    }

    #[test]
    fn test_priority_is_not_rule_declaration_order() {
        // Hits both the Architecture and HPC rules; Architecture outranks
        // HPC even though neither leads the rule list.
        let entry = entry_with(&[("title", "GPU Cluster Deployment")]);
        assert_eq!(assign_category(&entry), Category::Architecture);
    }

    #[test]
    fn test_keywords_participate_in_classification() {
        let entry = entry_with(&[
            ("title", "An Unremarkable Title"),
            ("keywords", "message passing, collectives"),
        ]);
        assert_eq!(assign_category(&entry), Category::ProgrammingModel);
    }

    #[test]
    fn test_venue_fallback_assigns_hpc() {
        // "HPDC" is only known to the venue fallback, not the keyword rules.
        let entry = entry_with(&[
            ("title", "On Some Problems"),
            ("booktitle", "HPDC '23"),
        ]);
        assert_eq!(assign_category(&entry), Category::Hpc);
    }

    #[test]
    fn test_ipdps_booktitle_classifies_as_hpc() {
        let entry = entry_with(&[("booktitle", "IPDPS '24")]);
        assert_eq!(assign_category(&entry), Category::Hpc);
    }

    #[test]
    fn test_default_is_applications() {
        assert_eq!(
            assign_category(&entry_with(&[])),
            Category::Applications
        );
        assert_eq!(
            assign_category(&entry_with(&[("title", "Untitled Thoughts")])),
            Category::Applications
        );
    }

    #[test]
    fn test_classify_entries_drops_preprints_and_tags_the_rest() {
        let entries = vec![
            entry_with(&[("title", "Qubit Readout")]),
            entry_with(&[("booktitle", "arXiv preprint")]),
            entry_with(&[("title", "Plain Report")]),
        ];
        let publications = classify_entries(entries);
        assert_eq!(publications.len(), 2);
        assert_eq!(publications[0].category, Category::Quantum);
        assert_eq!(publications[1].category, Category::Applications);
    }
}
