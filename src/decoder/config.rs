use serde::Serialize;
use std::fmt;

/// Barcode symbology accepted by a decoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Symbology {
    /// Stacked linear code used on the back of the DNI
    Pdf417,
    /// QR Code
    QrCode,
    /// Data Matrix
    DataMatrix,
    /// Aztec
    Aztec,
}

/// Named decoding policy, from most specific to most permissive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DecoderConfig {
    /// PDF417 only, normal effort
    StrictPdf417,
    /// The common 2D symbologies, try harder
    PermissiveMulti,
    /// Any symbology the decoder knows, try harder, inverted images too
    AnySymbology,
}

impl DecoderConfig {
    /// Fixed search priority
    pub const PRIORITY: [DecoderConfig; 3] = [
        DecoderConfig::StrictPdf417,
        DecoderConfig::PermissiveMulti,
        DecoderConfig::AnySymbology,
    ];

    /// Stable name used in logs and reports
    pub fn name(self) -> &'static str {
        match self {
            DecoderConfig::StrictPdf417 => "strict-pdf417",
            DecoderConfig::PermissiveMulti => "permissive-multi",
            DecoderConfig::AnySymbology => "any-symbology",
        }
    }

    /// Accepted symbologies; `None` means no restriction
    pub fn symbologies(self) -> Option<&'static [Symbology]> {
        match self {
            DecoderConfig::StrictPdf417 => Some(&[Symbology::Pdf417]),
            DecoderConfig::PermissiveMulti => Some(&[
                Symbology::Pdf417,
                Symbology::QrCode,
                Symbology::DataMatrix,
                Symbology::Aztec,
            ]),
            DecoderConfig::AnySymbology => None,
        }
    }

    /// Whether the decoder should spend extra effort searching
    pub fn try_harder(self) -> bool {
        !matches!(self, DecoderConfig::StrictPdf417)
    }

    /// Whether inverted (light-on-dark) codes are also searched
    pub fn also_inverted(self) -> bool {
        matches!(self, DecoderConfig::AnySymbology)
    }
}

impl fmt::Display for DecoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_most_specific_first() {
        let widths: Vec<usize> = DecoderConfig::PRIORITY
            .iter()
            .map(|c| c.symbologies().map_or(usize::MAX, |s| s.len()))
            .collect();
        assert!(widths.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(DecoderConfig::PRIORITY[0].symbologies(), Some(&[Symbology::Pdf417][..]));
    }

    #[test]
    fn test_effort() {
        assert!(!DecoderConfig::StrictPdf417.try_harder());
        assert!(DecoderConfig::AnySymbology.try_harder());
        assert!(DecoderConfig::AnySymbology.also_inverted());
        assert_eq!(DecoderConfig::PermissiveMulti.to_string(), "permissive-multi");
    }
}
