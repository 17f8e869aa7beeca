//! Barcode payload parsing
//!
//! The DNI barcode encodes its fields as '@'-separated text:
//!
//! ```text
//! 00123456789@PEREZ@JUAN CARLOS@M@12345678@A@01/02/1990@15/06/2015@200
//! ```
//!
//! Segment 1 holds the surnames, 2 the given names, 3 the sex, 4 the document
//! number and 6 the birth date as `D/M/Y`.

use crate::error::PayloadError;
use crate::models::ParsedIdentityRecord;
use chrono::NaiveDate;

/// Minimum number of segments in a DNI payload
pub const MIN_SEGMENTS: usize = 9;

const LAST_NAMES: usize = 1;
const FIRST_NAMES: usize = 2;
const SEX: usize = 3;
const DOCUMENT_NUMBER: usize = 4;
const BIRTH_DATE: usize = 6;

/// Normalize raw decoder output and split it into segments
///
/// Line breaks become '@', characters that are neither printable ASCII nor
/// alphanumeric are dropped and runs of '@' collapse into one. Accented
/// letters survive so that names like MUÑOZ still compare equal later.
pub fn split_segments(raw: &str) -> Vec<String> {
    let unified = raw.replace("\r\n", "@").replace(['\r', '\n'], "@");

    let mut cleaned = String::with_capacity(unified.len());
    for ch in unified.chars() {
        if !(' '..='~').contains(&ch) && !ch.is_alphanumeric() {
            continue;
        }
        if ch == '@' && cleaned.ends_with('@') {
            continue;
        }
        cleaned.push(ch);
    }

    cleaned.split('@').map(str::to_string).collect()
}

fn clean_field(segment: &str) -> String {
    segment.replace(['"', '\''], "").trim().to_string()
}

/// Convert `D/M/Y` into zero-padded `YYYY-MM-DD`
pub fn birth_date_to_iso(raw: &str) -> Result<String, PayloadError> {
    let invalid = || PayloadError::InvalidDate {
        raw: raw.to_string(),
    };

    let parts: Vec<&str> = raw.split('/').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(invalid());
    };
    let day: u32 = day.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Parse decoded barcode text into an identity record
pub fn parse_payload(raw: &str) -> Result<ParsedIdentityRecord, PayloadError> {
    let segments = split_segments(raw);
    if segments.len() < MIN_SEGMENTS {
        return Err(PayloadError::Malformed {
            segments: segments.len(),
        });
    }

    let birth_date = clean_field(&segments[BIRTH_DATE]);
    let birth_date_iso = birth_date_to_iso(&birth_date)?;

    Ok(ParsedIdentityRecord::new(
        clean_field(&segments[LAST_NAMES]),
        clean_field(&segments[FIRST_NAMES]),
        clean_field(&segments[SEX]),
        clean_field(&segments[DOCUMENT_NUMBER]),
        birth_date_iso,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_canonical_payload() {
        let record = parse_payload("X@LAST@FIRST@M@12345678@X@01/02/1990@X@X").unwrap();
        assert_eq!(record.last_names(), "LAST");
        assert_eq!(record.first_names(), "FIRST");
        assert_eq!(record.sex(), "M");
        assert_eq!(record.document_number(), "12345678");
        assert_eq!(record.birth_date_iso(), "1990-02-01");
    }

    #[test]
    fn test_eight_segments_is_malformed() {
        let err = parse_payload("X@LAST@FIRST@M@12345678@X@01/02/1990@X").unwrap_err();
        assert_eq!(err, PayloadError::Malformed { segments: 8 });
    }

    #[test]
    fn test_empty_is_malformed() {
        assert_eq!(
            parse_payload("").unwrap_err(),
            PayloadError::Malformed { segments: 1 }
        );
    }

    #[test]
    fn test_line_breaks_and_repeated_separators() {
        let raw = "X\r\nLAST@@FIRST\nM@12345678\r@X@@@01/02/1990@X@X";
        let record = parse_payload(raw).unwrap();
        assert_eq!(record.last_names(), "LAST");
        assert_eq!(record.first_names(), "FIRST");
        assert_eq!(record.document_number(), "12345678");
    }

    #[test]
    fn test_strips_control_bytes_and_quotes() {
        let raw = "\u{1d}X@\"GOMEZ\"@ANA 'MARIA'@F\u{0}@ 30111222 @X@5/3/1985@X@X\u{4}";
        let record = parse_payload(raw).unwrap();
        assert_eq!(record.last_names(), "GOMEZ");
        assert_eq!(record.first_names(), "ANA MARIA");
        assert_eq!(record.sex(), "F");
        assert_eq!(record.document_number(), "30111222");
        assert_eq!(record.birth_date_iso(), "1985-03-05");
    }

    #[test]
    fn test_keeps_accented_letters_drops_symbols() {
        let segments = split_segments("A@MUÑOZ\u{2022}@B");
        assert_eq!(segments, vec!["A", "MUÑOZ", "B"]);
    }

    #[test]
    fn test_invalid_dates() {
        for raw in [
            "X@L@F@M@1@X@1990-02-01@X@X",
            "X@L@F@M@1@X@aa/bb/cccc@X@X",
            "X@L@F@M@1@X@31/02/1990@X@X",
            "X@L@F@M@1@X@01/02@X@X",
        ] {
            assert!(
                matches!(parse_payload(raw), Err(PayloadError::InvalidDate { .. })),
                "expected InvalidDate for {raw}"
            );
        }
    }

    #[test]
    fn test_birth_date_zero_padding() {
        assert_eq!(birth_date_to_iso("1/2/1990").unwrap(), "1990-02-01");
        assert_eq!(birth_date_to_iso("15/11/2001").unwrap(), "2001-11-15");
    }
}
