use serde::{Deserialize, Serialize};

/// Identity fields read from the card's barcode
///
/// Fields are private: the only way to obtain one is
/// [`parse_payload`](crate::payload::parse_payload), so every instance comes
/// from a payload with at least 9 segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIdentityRecord {
    last_names: String,
    first_names: String,
    sex: String,
    document_number: String,
    birth_date_iso: String,
}

impl ParsedIdentityRecord {
    pub(crate) fn new(
        last_names: String,
        first_names: String,
        sex: String,
        document_number: String,
        birth_date_iso: String,
    ) -> Self {
        Self {
            last_names,
            first_names,
            sex,
            document_number,
            birth_date_iso,
        }
    }

    /// Surnames as encoded on the card
    pub fn last_names(&self) -> &str {
        &self.last_names
    }

    /// Given names as encoded on the card
    pub fn first_names(&self) -> &str {
        &self.first_names
    }

    /// Sex marker (usually `M` or `F`)
    pub fn sex(&self) -> &str {
        &self.sex
    }

    /// Document number as encoded on the card
    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    /// Birth date, `YYYY-MM-DD`
    pub fn birth_date_iso(&self) -> &str {
        &self.birth_date_iso
    }
}

/// Identity fields typed by the user into the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSuppliedRecord {
    /// Surnames
    pub last_names: String,
    /// Given names
    pub first_names: String,
    /// Sex marker
    pub sex: String,
    /// Document number, punctuation allowed
    pub document_number: String,
    /// Birth date, `YYYY-MM-DD`
    pub birth_date_iso: String,
}
