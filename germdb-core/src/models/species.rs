use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GermdbError;

///
/// Species a germline gene was sequenced from, as named by IMGT.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Species {
    HomoSapiens,
    MusMusculus,
    MacacaMulatta,
    OryctolagusCuniculus,
    Other(String),
}

impl Species {
    pub fn binomial(&self) -> &str {
        match self {
            Species::HomoSapiens => "Homo sapiens",
            Species::MusMusculus => "Mus musculus",
            Species::MacacaMulatta => "Macaca mulatta",
            Species::OryctolagusCuniculus => "Oryctolagus cuniculus",
            Species::Other(name) => name.as_str(),
        }
    }

    ///
    /// Parse the species column of an IMGT header. IMGT appends strain
    /// information after an underscore (`Mus musculus_C57BL/6`), which is
    /// folded into the base species.
    ///
    pub fn from_imgt_field(field: &str) -> Result<Species, GermdbError> {
        let base = field.split('_').next().unwrap_or(field).trim();
        base.parse()
    }
}

impl FromStr for Species {
    type Err = GermdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(GermdbError::InvalidSpecies(s.to_string()));
        }

        match trimmed.to_lowercase().as_str() {
            "homo sapiens" | "human" => Ok(Species::HomoSapiens),
            "mus musculus" | "mouse" => Ok(Species::MusMusculus),
            "macaca mulatta" | "macaque" | "rhesus" => Ok(Species::MacacaMulatta),
            "oryctolagus cuniculus" | "rabbit" => Ok(Species::OryctolagusCuniculus),
            _ => Ok(Species::Other(trimmed.to_string())),
        }
    }
}

impl TryFrom<String> for Species {
    type Error = GermdbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Species> for String {
    fn from(value: Species) -> Self {
        value.binomial().to_string()
    }
}

impl Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binomial())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("Homo sapiens", Species::HomoSapiens)]
    #[case("human", Species::HomoSapiens)]
    #[case("Mouse", Species::MusMusculus)]
    #[case("Macaca mulatta", Species::MacacaMulatta)]
    #[case("Danio rerio", Species::Other("Danio rerio".to_string()))]
    fn test_parse_species(#[case] input: &str, #[case] expected: Species) {
        assert_eq!(input.parse::<Species>().unwrap(), expected);
    }

    #[rstest]
    fn test_strain_folds_into_species() {
        let species = Species::from_imgt_field("Mus musculus_C57BL/6").unwrap();
        assert_eq!(species, Species::MusMusculus);
    }

    #[rstest]
    fn test_empty_species_is_rejected() {
        assert!("  ".parse::<Species>().is_err());
    }
}
