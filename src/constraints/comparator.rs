use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, IntoStaticStr};

/// The relation between the number of selected items and a bound.
///
/// Comparators are written verbatim in lp_solve programs, using their symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter, IntoStaticStr, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Comparator {
    /// The number of items must be greater than or equal to the bound
    #[strum(serialize = ">=")]
    AtLeast,
    /// The number of items must be lower than or equal to the bound
    #[strum(serialize = "<=")]
    AtMost,
    /// The number of items must be equal to the bound
    #[strum(serialize = "=")]
    Equal,
}

impl Comparator {
    /// Iterates over the symbols of the recognized comparators.
    pub fn iter_symbols() -> impl Iterator<Item = &'static str> {
        Comparator::iter().map(|c| c.symbol())
    }

    /// Returns the symbol used to write this comparator.
    pub fn symbol(&self) -> &'static str {
        (*self).into()
    }
}

impl TryFrom<&str> for Comparator {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Comparator::iter()
            .find(|c| c.as_ref() == value.trim())
            .ok_or_else(|| {
                anyhow!(
                    r#"undefined comparator "{}"; expected one of {}"#,
                    value,
                    Comparator::iter_symbols()
                        .map(|s| format!(r#""{}""#, s))
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            })
    }
}

impl TryFrom<String> for Comparator {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Comparator::try_from(value.as_str())
    }
}

impl From<Comparator> for String {
    fn from(c: Comparator) -> Self {
        c.symbol().to_string()
    }
}

impl Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_ok() {
        assert_eq!(Comparator::AtLeast, Comparator::try_from(">=").unwrap());
        assert_eq!(Comparator::AtMost, Comparator::try_from("<=").unwrap());
        assert_eq!(Comparator::Equal, Comparator::try_from("=").unwrap());
        assert_eq!(Comparator::AtMost, Comparator::try_from(" <= ").unwrap());
    }

    #[test]
    fn test_try_from_unknown() {
        for s in ["<", ">", "==", "=<", "", "foo"] {
            assert!(Comparator::try_from(s).is_err(), "{}", s);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(">=", Comparator::AtLeast.to_string());
        assert_eq!("<=", Comparator::AtMost.to_string());
        assert_eq!("=", Comparator::Equal.to_string());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            vec![">=", "<=", "="],
            Comparator::iter_symbols().collect::<Vec<&str>>()
        );
    }

    #[test]
    fn test_serde() {
        assert_eq!(
            Comparator::AtMost,
            serde_json::from_str::<Comparator>(r#""<=""#).unwrap()
        );
        assert!(serde_json::from_str::<Comparator>(r#""<""#).is_err());
        assert_eq!(
            r#""=""#,
            serde_json::to_string(&Comparator::Equal).unwrap()
        );
    }
}
