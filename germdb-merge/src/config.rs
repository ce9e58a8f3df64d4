use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use germdb_core::{Functionality, GeneName, Locus, Species};

use crate::consts::{DEFAULT_SOURCE, PRESETS};
use crate::errors::MergeError;

///
/// What to do when a donor record's name is already taken and no rename rule
/// covers it.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Use the smallest unused allele number above the record's own.
    #[default]
    NextAvailable,
    /// Stop the merge.
    Fail,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CollisionConfig {
    #[serde(default)]
    pub policy: CollisionPolicy,
}

///
/// Inclusion filters. A missing list means no restriction.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterConfig {
    pub functionality: Option<Vec<Functionality>>,
    pub loci: Option<Vec<Locus>>,
}

impl FilterConfig {
    pub fn allows_functionality(&self, functionality: Functionality) -> bool {
        self.functionality
            .as_ref()
            .is_none_or(|allowed| allowed.contains(&functionality))
    }

    pub fn allows_locus(&self, locus: Locus) -> bool {
        self.loci
            .as_ref()
            .is_none_or(|allowed| allowed.contains(&locus))
    }
}

///
/// A species whose genes are inserted into the host database. An empty gene
/// list takes every record of that species that passes the filters.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DonorConfig {
    pub species: Species,
    #[serde(default)]
    pub genes: Vec<GeneName>,
}

impl DonorConfig {
    pub fn includes(&self, name: &GeneName) -> bool {
        self.genes.is_empty() || self.genes.contains(name)
    }
}

///
/// A curated rename: a record of `species` named `from` is written as `to`.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RenameRule {
    pub species: Species,
    pub from: GeneName,
    pub to: GeneName,
    pub reason: Option<String>,
}

///
/// Describes how one germline database is assembled: where the sequences
/// came from, which species and records are included, and how name
/// collisions are handled.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub name: String,
    #[serde(default = "default_source")]
    pub source: String,
    pub source_url: Option<String>,
    pub snapshot: Option<NaiveDate>,
    /// None builds a single-species database where every record is native.
    pub host: Option<Species>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub donors: Vec<DonorConfig>,
    #[serde(default)]
    pub renames: Vec<RenameRule>,
    #[serde(default)]
    pub collisions: CollisionConfig,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

impl DatabaseConfig {
    ///
    /// Load a database config from a TOML file.
    ///
    /// # Arguments
    /// - path: Path to the config file (a .toml) file.
    pub fn from_path(path: &Path) -> Result<DatabaseConfig, MergeError> {
        let toml_str = read_to_string(path)?;
        DatabaseConfig::from_toml(&toml_str)
    }

    pub fn from_toml(toml_str: &str) -> Result<DatabaseConfig, MergeError> {
        let config: DatabaseConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    ///
    /// A bundled configuration, if one exists under this database name.
    ///
    pub fn preset(name: &str) -> Result<Option<DatabaseConfig>, MergeError> {
        let name = name.to_lowercase();
        PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .map(|(_, toml_str)| DatabaseConfig::from_toml(toml_str))
            .transpose()
    }

    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, _)| *name)
    }

    ///
    /// A plain database: every record in the input files is kept and treated
    /// as native, with no renames.
    ///
    pub fn plain(name: &str, host: Option<Species>) -> DatabaseConfig {
        DatabaseConfig {
            name: name.to_string(),
            source: default_source(),
            source_url: None,
            snapshot: None,
            host,
            notes: Vec::new(),
            filters: FilterConfig::default(),
            donors: Vec::new(),
            renames: Vec::new(),
            collisions: CollisionConfig::default(),
        }
    }

    pub fn donor(&self, species: &Species) -> Option<&DonorConfig> {
        self.donors.iter().find(|d| &d.species == species)
    }

    pub fn is_host(&self, species: &Species) -> bool {
        self.host.as_ref().is_none_or(|host| host == species)
    }

    /// Every species allowed in the database, host first.
    pub fn species(&self) -> Vec<Species> {
        self.host
            .iter()
            .cloned()
            .chain(self.donors.iter().map(|d| d.species.clone()))
            .collect()
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        if self.name.trim().is_empty() {
            return Err(MergeError::InvalidConfig(
                "database name must not be empty".to_string(),
            ));
        }

        if self.host.is_none() && !self.donors.is_empty() {
            return Err(MergeError::InvalidConfig(
                "donor species require a host species".to_string(),
            ));
        }

        let mut donor_species = HashSet::new();
        for donor in &self.donors {
            if self.host.as_ref() == Some(&donor.species) {
                return Err(MergeError::InvalidConfig(format!(
                    "{} is both the host and a donor species",
                    donor.species
                )));
            }
            if !donor_species.insert(&donor.species) {
                return Err(MergeError::InvalidConfig(format!(
                    "donor species {} is listed twice",
                    donor.species
                )));
            }
        }

        let mut rename_sources = HashSet::new();
        for rule in &self.renames {
            if !rule.from.same_gene(&rule.to) {
                return Err(MergeError::InvalidConfig(format!(
                    "rename {} -> {} must stay within the same gene",
                    rule.from, rule.to
                )));
            }
            if rule.from == rule.to {
                return Err(MergeError::InvalidConfig(format!(
                    "rename {} -> {} does not change the name",
                    rule.from, rule.to
                )));
            }
            if self.is_host(&rule.species) {
                return Err(MergeError::InvalidConfig(format!(
                    "rename of {} targets host species {}; only donor records are renamed",
                    rule.from, rule.species
                )));
            }
            if !rename_sources.insert((&rule.species, rule.from.to_string())) {
                return Err(MergeError::InvalidConfig(format!(
                    "{} gene {} has more than one rename rule",
                    rule.species, rule.from
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::write;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    #[fixture]
    fn minimal_toml() -> &'static str {
        r#"
        name = "mouse"
        host = "Mus musculus"
        "#
    }

    #[rstest]
    fn test_defaults(minimal_toml: &str) {
        let config = DatabaseConfig::from_toml(minimal_toml).unwrap();
        assert_eq!(config.source, "IMGT/GENE-DB");
        assert_eq!(config.collisions.policy, CollisionPolicy::NextAvailable);
        assert!(config.filters.allows_functionality(Functionality::Pseudogene));
        assert!(config.filters.allows_locus(Locus::TRB));
        assert!(config.donors.is_empty());
    }

    #[rstest]
    fn test_vrc01mouse_preset() {
        let config = DatabaseConfig::preset("VRC01mouse").unwrap().unwrap();

        assert_eq!(config.host, Some(Species::MusMusculus));
        assert_eq!(config.snapshot, NaiveDate::from_ymd_opt(2017, 1, 7));
        assert_eq!(config.collisions.policy, CollisionPolicy::Fail);
        assert!(!config.filters.allows_locus(Locus::TRA));

        let donor = config.donor(&Species::HomoSapiens).unwrap();
        assert_eq!(donor.genes.len(), 3);
        assert!(donor.includes(&"IGHV1-2*02".parse().unwrap()));
        assert!(!donor.includes(&"IGHV1-69*01".parse().unwrap()));

        assert_eq!(config.renames.len(), 1);
        assert_eq!(config.renames[0].from.to_string(), "IGHJ2*01");
        assert_eq!(config.renames[0].to.to_string(), "IGHJ2*09");
    }

    #[rstest]
    fn test_unknown_preset() {
        assert!(DatabaseConfig::preset("b12mouse").unwrap().is_none());
    }

    #[rstest]
    fn test_rename_across_genes_is_rejected() {
        let toml_str = r#"
        name = "bad"
        host = "Mus musculus"

        [[donors]]
        species = "Homo sapiens"

        [[renames]]
        species = "Homo sapiens"
        from = "IGHJ2*01"
        to = "IGHJ3*01"
        "#;
        assert!(matches!(
            DatabaseConfig::from_toml(toml_str),
            Err(MergeError::InvalidConfig(_))
        ));
    }

    #[rstest]
    fn test_rename_of_host_is_rejected() {
        let toml_str = r#"
        name = "bad"
        host = "Mus musculus"

        [[renames]]
        species = "Mus musculus"
        from = "IGHJ2*01"
        to = "IGHJ2*09"
        "#;
        assert!(matches!(
            DatabaseConfig::from_toml(toml_str),
            Err(MergeError::InvalidConfig(_))
        ));
    }

    #[rstest]
    fn test_donor_without_host_is_rejected() {
        let toml_str = r#"
        name = "bad"

        [[donors]]
        species = "Homo sapiens"
        "#;
        assert!(DatabaseConfig::from_toml(toml_str).is_err());
    }

    #[rstest]
    fn test_plain_config_treats_everything_as_host() {
        let config = DatabaseConfig::plain("human", None);
        assert!(config.is_host(&Species::HomoSapiens));
        assert!(config.is_host(&Species::MusMusculus));
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn test_from_path(minimal_toml: &str) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mouse.toml");
        write(&path, minimal_toml).unwrap();

        let config = DatabaseConfig::from_path(&path).unwrap();
        assert_eq!(config.name, "mouse");
        assert_eq!(config.host, Some(Species::MusMusculus));
    }

    #[rstest]
    fn test_from_path_bad_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        write(&path, "name = ").unwrap();

        assert!(matches!(
            DatabaseConfig::from_path(&path),
            Err(MergeError::ConfigParse(_))
        ));
    }
}
