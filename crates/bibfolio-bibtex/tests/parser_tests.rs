//! Parser integration tests over a realistic bibliography

use bibfolio_bibtex::{parse, UNKNOWN_YEAR};

const BIBLIOGRAPHY: &str = r#"@article{Mueller2023,
  author = {M\"uller, Anna and Garc\'ia, Luis},
  title = {Power Management for Overprovisioned Clusters},
  journal = {Journal of Parallel Computing},
  volume = {118},
  number = {3},
  pages = {1--17},
  year = {2023},
}

@inproceedings{Huber2021,
  author = {Huber, Eva},
  title = {Pulse Level Control of Superconducting Qubits},
  booktitle = {Proceedings of the Quantum Week},
  year = {2021},
  organization = {IEEE},
}

@techreport{Lang2019,
  author = {Lang, Peter},
  title  = {Sensor Streams at the Edge},
  institution = {Technical University},
  number = {TR-2019-07},
  year = 2019,
}

@misc{NoDate,
  author = {Anonymous},
  title = {Undated Notes},
  note = {circulated draft},
}
"#;

#[test]
fn test_one_entry_per_marker_in_source_order() {
    let entries = parse(BIBLIOGRAPHY);
    assert_eq!(entries.len(), 4);
    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, ["Mueller2023", "Huber2021", "Lang2019", "NoDate"]);
}

#[test]
fn test_raw_blocks_round_trip_key_and_type() {
    for entry in parse(BIBLIOGRAPHY) {
        assert!(entry.raw_bibtex.contains(&entry.key));
        assert!(entry
            .raw_bibtex
            .to_lowercase()
            .contains(&entry.entry_type));
    }
}

#[test]
fn test_years_are_normalized_or_unknown() {
    let year_shape = regex::Regex::new(r"^(19|20)\d{2}$").unwrap();
    for entry in parse(BIBLIOGRAPHY) {
        assert!(
            year_shape.is_match(&entry.year) || entry.year == UNKNOWN_YEAR,
            "unexpected year {:?} for {}",
            entry.year,
            entry.key
        );
    }
    assert_eq!(parse(BIBLIOGRAPHY)[3].year, UNKNOWN_YEAR);
}

#[test]
fn test_accents_are_decoded() {
    let entries = parse(BIBLIOGRAPHY);
    assert_eq!(
        entries[0].author(),
        Some("Müller, Anna and García, Luis")
    );
}

#[test]
fn test_unrecognized_fields_are_skipped() {
    let entries = parse(BIBLIOGRAPHY);
    // `note` is not part of the recognized field set.
    assert!(!entries[3].fields.contains_key("note"));
}

#[test]
fn test_numeric_and_braced_values() {
    let entries = parse(BIBLIOGRAPHY);
    assert_eq!(entries[2].year, "2019");
    assert_eq!(entries[2].number(), Some("TR-2019-07"));
    assert_eq!(entries[0].pages(), Some("1--17"));
}

#[test]
fn test_parse_twice_yields_identical_sequences() {
    assert_eq!(parse(BIBLIOGRAPHY), parse(BIBLIOGRAPHY));
}
