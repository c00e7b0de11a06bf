use serde::{Deserialize, Serialize};

/// Parse leniency switches, each independently settable on a formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanAttribute {
    /// Whitespace and trailing dots between fields are skipped
    ParseAllowWhitespace,
    /// Text fields (month, weekday) also accept their numeric value
    ParseAllowNumeric,
    /// Literals and names may match by prefix
    ParsePartialMatch,
}

impl BooleanAttribute {
    pub const ALL: [Self; 3] = [
        Self::ParseAllowWhitespace,
        Self::ParseAllowNumeric,
        Self::ParsePartialMatch,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The set of enabled [`BooleanAttribute`]s. Every attribute is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BooleanAttributes(u8);

impl Default for BooleanAttributes {
    fn default() -> Self {
        Self::all()
    }
}

impl BooleanAttributes {
    pub const fn all() -> Self {
        Self(0b111)
    }

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn get(self, attribute: BooleanAttribute) -> bool {
        self.0 & attribute.bit() != 0
    }

    pub fn set(&mut self, attribute: BooleanAttribute, value: bool) {
        if value {
            self.0 |= attribute.bit();
        } else {
            self.0 &= !attribute.bit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_all_enabled() {
        let attributes = BooleanAttributes::default();
        for attribute in BooleanAttribute::ALL {
            assert!(attributes.get(attribute));
        }
    }

    #[test]
    fn test_set_is_independent() {
        let mut attributes = BooleanAttributes::default();
        attributes.set(BooleanAttribute::ParseAllowNumeric, false);
        assert!(!attributes.get(BooleanAttribute::ParseAllowNumeric));
        assert!(attributes.get(BooleanAttribute::ParseAllowWhitespace));
        assert!(attributes.get(BooleanAttribute::ParsePartialMatch));
        attributes.set(BooleanAttribute::ParseAllowNumeric, true);
        assert_eq!(attributes, BooleanAttributes::all());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&BooleanAttribute::ParsePartialMatch).unwrap();
        assert_eq!(json, r#""parse_partial_match""#);
    }
}
