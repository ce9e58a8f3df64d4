use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GermdbError;

///
/// IMGT functionality class of a gene segment.
///
/// IMGT wraps a class in parentheses or brackets when the call is not fully
/// confirmed, e.g. `(F)` or `[ORF]`; those map to the same class here.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Functionality {
    Functional,
    OpenReadingFrame,
    Pseudogene,
}

impl Functionality {
    pub fn code(&self) -> &'static str {
        match self {
            Functionality::Functional => "F",
            Functionality::OpenReadingFrame => "ORF",
            Functionality::Pseudogene => "P",
        }
    }
}

impl FromStr for Functionality {
    type Err = GermdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s
            .trim()
            .trim_start_matches(['(', '['])
            .trim_end_matches([')', ']']);

        match code.to_uppercase().as_str() {
            "F" => Ok(Functionality::Functional),
            "ORF" => Ok(Functionality::OpenReadingFrame),
            "P" => Ok(Functionality::Pseudogene),
            _ => Err(GermdbError::InvalidFunctionality(s.to_string())),
        }
    }
}

impl TryFrom<String> for Functionality {
    type Error = GermdbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Functionality> for String {
    fn from(value: Functionality) -> Self {
        value.code().to_string()
    }
}

impl Display for Functionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("F", Functionality::Functional)]
    #[case("(F)", Functionality::Functional)]
    #[case("[F]", Functionality::Functional)]
    #[case("ORF", Functionality::OpenReadingFrame)]
    #[case("[ORF]", Functionality::OpenReadingFrame)]
    #[case("P", Functionality::Pseudogene)]
    #[case("(P)", Functionality::Pseudogene)]
    fn test_parse_functionality(#[case] input: &str, #[case] expected: Functionality) {
        assert_eq!(input.parse::<Functionality>().unwrap(), expected);
    }

    #[rstest]
    fn test_unknown_functionality() {
        assert!("X".parse::<Functionality>().is_err());
        assert!("".parse::<Functionality>().is_err());
    }
}
