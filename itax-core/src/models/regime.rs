use std::fmt;

use serde::{Deserialize, Serialize};

/// The two mutually exclusive tax regimes a taxpayer may choose between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    /// Legacy regime: four slabs, HRA exemption and investment deductions allowed.
    Old,
    /// Simplified regime: six slabs, standard deduction only.
    New,
}

impl Regime {
    pub fn all() -> &'static [Regime] {
        &[Regime::Old, Regime::New]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Old => "Old Regime",
            Self::New => "New Regime",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "old" => Some(Self::Old),
            "new" => Some(Self::New),
            _ => None,
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Regime::parse("Old"), Some(Regime::Old));
        assert_eq!(Regime::parse(" NEW "), Some(Regime::New));
        assert_eq!(Regime::parse("legacy"), None);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Regime::Old.to_string(), "Old Regime");
        assert_eq!(Regime::New.to_string(), "New Regime");
    }
}
