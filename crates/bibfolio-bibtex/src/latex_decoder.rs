//! LaTeX character decoding
//!
//! Decodes the fixed table of escaped accent sequences and escaped
//! punctuation that appear in bibliography field values to plain Unicode.

use lazy_static::lazy_static;

lazy_static! {
    /// Replacement table applied in declaration order. The patterns are
    /// disjoint, so ordering only matters for readability.
    static ref REPLACEMENTS: Vec<(&'static str, &'static str)> = vec![
        // Umlaut (diaeresis)
        ("\\\"a", "ä"), ("\\\"o", "ö"), ("\\\"u", "ü"),
        ("\\\"A", "Ä"), ("\\\"O", "Ö"), ("\\\"U", "Ü"),

        // Acute accent
        ("\\'a", "á"), ("\\'e", "é"), ("\\'i", "í"), ("\\'o", "ó"), ("\\'u", "ú"),

        // Grave accent
        ("\\`a", "à"), ("\\`e", "è"), ("\\`i", "ì"), ("\\`o", "ò"), ("\\`u", "ù"),

        // Tilde and circumflex
        ("\\~n", "ñ"),
        ("\\^a", "â"), ("\\^e", "ê"), ("\\^i", "î"), ("\\^o", "ô"), ("\\^u", "û"),

        // Ligature and escaped punctuation
        ("\\ss", "ß"),
        ("\\&", "&"), ("\\_", "_"), ("\\%", "%"), ("\\$", "$"),
    ];
}

/// Decode the fixed table of LaTeX escape sequences in `input`.
///
/// Sequences outside the table are left untouched.
pub fn decode_latex(input: &str) -> String {
    let mut result = input.to_string();
    for (pattern, replacement) in REPLACEMENTS.iter() {
        result = result.replace(pattern, replacement);
    }
    result
}
