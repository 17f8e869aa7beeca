//! Cross-check of decoded identity fields against the registration form

use crate::models::{Field, ParsedIdentityRecord, UserSuppliedRecord, ValidationResult};
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

/// Unicode combining marks left behind by NFD decomposition
const fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

/// Strip diacritics, uppercase, and collapse non `[A-Z0-9]` runs to one space
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_uppercase)
    {
        if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }
    out
}

/// Normalized, order-insensitive token set
pub fn tokens(text: &str) -> BTreeSet<String> {
    normalize_text(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Either token set contains the other
///
/// A blank side is the empty set and therefore always matches.
pub fn names_match(decoded: &str, user: &str) -> bool {
    let decoded = tokens(decoded);
    let user = tokens(user);
    user.is_subset(&decoded) || decoded.is_subset(&user)
}

fn digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Digit-only equality
pub fn document_numbers_match(decoded: &str, user: &str) -> bool {
    digits(decoded) == digits(user)
}

/// First character, case-insensitive
pub fn sex_matches(decoded: &str, user: &str) -> bool {
    let first = |s: &str| s.trim().chars().next().map(|c| c.to_lowercase().collect::<String>());
    first(decoded) == first(user)
}

/// Compare every field and collect mismatches in reporting order
pub fn validate(parsed: &ParsedIdentityRecord, user: &UserSuppliedRecord) -> ValidationResult {
    let mismatches: Vec<Field> = Field::ORDER
        .into_iter()
        .filter(|field| {
            let matched = match field {
                Field::FirstNames => names_match(parsed.first_names(), &user.first_names),
                Field::LastNames => names_match(parsed.last_names(), &user.last_names),
                Field::DocumentNumber => {
                    document_numbers_match(parsed.document_number(), &user.document_number)
                }
                Field::Sex => sex_matches(parsed.sex(), &user.sex),
                Field::BirthDate => parsed.birth_date_iso() == user.birth_date_iso.trim(),
            };
            !matched
        })
        .collect();

    ValidationResult::from_fields(&mismatches)
}
