use std::collections::HashMap;

use germdb_core::{GeneName, Species};

use crate::config::{DatabaseConfig, RenameRule};

///
/// Lookup table of curated renames, keyed by species and original name.
///
/// The replacement allele in a curated rename is a manual choice, so it is
/// applied as written rather than recomputed.
///
#[derive(Debug, Default, Clone)]
pub struct RenameTable {
    rules: HashMap<(Species, String), RenameRule>,
}

impl RenameTable {
    pub fn from_config(config: &DatabaseConfig) -> RenameTable {
        RenameTable::from_rules(config.renames.iter().cloned())
    }

    pub fn from_rules<I: IntoIterator<Item = RenameRule>>(rules: I) -> RenameTable {
        let rules = rules
            .into_iter()
            .map(|rule| ((rule.species.clone(), rule.from.to_string()), rule))
            .collect();
        RenameTable { rules }
    }

    pub fn lookup(&self, species: &Species, name: &GeneName) -> Option<&RenameRule> {
        self.rules.get(&(species.clone(), name.to_string()))
    }

    /// Names the table will assign.
    pub fn targets(&self) -> impl Iterator<Item = &GeneName> {
        self.rules.values().map(|rule| &rule.to)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_lookup_is_species_specific() {
        let config = DatabaseConfig::preset("vrc01mouse").unwrap().unwrap();
        let table = RenameTable::from_config(&config);
        let name: GeneName = "IGHJ2*01".parse().unwrap();

        let rule = table.lookup(&Species::HomoSapiens, &name).unwrap();
        assert_eq!(rule.to.to_string(), "IGHJ2*09");
        assert!(table.lookup(&Species::MusMusculus, &name).is_none());
        assert_eq!(table.len(), 1);
    }
}
