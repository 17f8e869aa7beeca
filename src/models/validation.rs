use serde::Serialize;

/// A form field checked by the validator, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    /// Given names
    FirstNames,
    /// Surnames
    LastNames,
    /// Document number
    DocumentNumber,
    /// Sex
    Sex,
    /// Birth date
    BirthDate,
}

impl Field {
    /// All fields in the order mismatches are reported
    pub const ORDER: [Field; 5] = [
        Field::FirstNames,
        Field::LastNames,
        Field::DocumentNumber,
        Field::Sex,
        Field::BirthDate,
    ];

    /// Label shown to the user
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstNames => "Nombres",
            Field::LastNames => "Apellidos",
            Field::DocumentNumber => "Número de documento",
            Field::Sex => "Sexo",
            Field::BirthDate => "Fecha de nacimiento",
        }
    }
}

/// Outcome of comparing a parsed record with the user's input
///
/// `ok` is derived from the mismatch list, so `ok == mismatches.is_empty()`
/// always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    ok: bool,
    mismatches: Vec<&'static str>,
}

impl ValidationResult {
    pub(crate) fn from_fields(fields: &[Field]) -> Self {
        let mismatches: Vec<&'static str> = fields.iter().map(|f| f.label()).collect();
        Self {
            ok: mismatches.is_empty(),
            mismatches,
        }
    }

    /// True when every field matched
    pub fn ok(&self) -> bool {
        self.ok
    }

    /// Labels of the fields that did not match, in fixed order
    pub fn mismatches(&self) -> &[&'static str] {
        &self.mismatches
    }
}
