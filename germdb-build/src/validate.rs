use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display};

use log::{info, warn};
use serde::Serialize;

use germdb_core::{
    Functionality, GeneName, GermlineRecord, Locus, Species, parse_imgt_records, read_fasta,
};
use germdb_merge::{DatabaseConfig, RenameTable};

use crate::errors::BuildError;
use crate::layout::DatabaseLayout;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    DuplicateName { name: String, count: usize },
    DuplicateIdentifier { file: String, id: String, count: usize },
    MissingDonorGene { species: Species, name: String },
    DuplicateDonorGene { species: Species, name: String, count: usize },
    RenameNotApplied { species: Species, name: String },
    RenameTargetMissing { species: Species, name: String },
    UnexpectedSpecies { name: String, species: Species },
    DisallowedFunctionality { name: String, functionality: Functionality },
    NonImmunoglobulinLocus { name: String, locus: Locus },
    DisallowedLocus { name: String, locus: Locus },
    UnexpectedDonorGene { name: String, species: Species },
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DuplicateName { name, count } => {
                write!(f, "gene name {} is used by {} records", name, count)
            }
            Violation::DuplicateIdentifier { file, id, count } => {
                write!(f, "{}: identifier {} appears {} times", file, id, count)
            }
            Violation::MissingDonorGene { species, name } => {
                write!(f, "{} gene {} is missing", species, name)
            }
            Violation::DuplicateDonorGene {
                species,
                name,
                count,
            } => write!(f, "{} gene {} appears {} times", species, name, count),
            Violation::RenameNotApplied { species, name } => {
                write!(f, "{} gene {} should have been renamed", species, name)
            }
            Violation::RenameTargetMissing { species, name } => {
                write!(f, "no {} record carries the renamed name {}", species, name)
            }
            Violation::UnexpectedSpecies { name, species } => {
                write!(f, "{} is from {}, which is not part of this database", name, species)
            }
            Violation::DisallowedFunctionality {
                name,
                functionality,
            } => write!(f, "{} has excluded functionality {}", name, functionality),
            Violation::NonImmunoglobulinLocus { name, locus } => {
                write!(f, "{} belongs to non-immunoglobulin locus {}", name, locus)
            }
            Violation::DisallowedLocus { name, locus } => {
                write!(f, "{} belongs to excluded locus {}", name, locus)
            }
            Violation::UnexpectedDonorGene { name, species } => {
                write!(f, "{} gene {} is not in the donor gene list", species, name)
            }
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub records_checked: usize,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    fn extend(&mut self, other: ValidationReport) {
        self.records_checked += other.records_checked;
        self.violations.extend(other.violations);
    }
}

///
/// Check a merged record set against the configuration it was built from.
///
pub fn validate_records(records: &[GermlineRecord], config: &DatabaseConfig) -> ValidationReport {
    let mut violations = Vec::new();
    let renames = RenameTable::from_config(config);

    let mut name_counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *name_counts.entry(record.name.to_string()).or_insert(0) += 1;
    }
    for (name, count) in &name_counts {
        if *count > 1 {
            violations.push(Violation::DuplicateName {
                name: name.clone(),
                count: *count,
            });
        }
    }

    // donor genes under the names they should have after curated renames
    let expected_donor_names: HashMap<&Species, Vec<GeneName>> = config
        .donors
        .iter()
        .filter(|d| !d.genes.is_empty())
        .map(|d| {
            let names = d
                .genes
                .iter()
                .map(|g| {
                    renames
                        .lookup(&d.species, g)
                        .map(|rule| rule.to.clone())
                        .unwrap_or_else(|| g.clone())
                })
                .collect();
            (&d.species, names)
        })
        .collect();

    for record in records {
        let name = record.name.to_string();
        let is_host = config.is_host(&record.species);

        if !is_host && config.donor(&record.species).is_none() {
            violations.push(Violation::UnexpectedSpecies {
                name: name.clone(),
                species: record.species.clone(),
            });
        }

        if !config.filters.allows_functionality(record.functionality) {
            violations.push(Violation::DisallowedFunctionality {
                name: name.clone(),
                functionality: record.functionality,
            });
        }

        if !record.locus().is_immunoglobulin() {
            violations.push(Violation::NonImmunoglobulinLocus {
                name: name.clone(),
                locus: record.locus(),
            });
        } else if !config.filters.allows_locus(record.locus()) {
            violations.push(Violation::DisallowedLocus {
                name: name.clone(),
                locus: record.locus(),
            });
        }

        if !is_host {
            if let Some(expected) = expected_donor_names.get(&record.species) {
                if !expected.contains(&record.name) {
                    violations.push(Violation::UnexpectedDonorGene {
                        name: name.clone(),
                        species: record.species.clone(),
                    });
                }
            }
        }
    }

    for (species, expected) in &expected_donor_names {
        for name in expected {
            let count = records
                .iter()
                .filter(|r| &r.species == *species && &r.name == name)
                .count();
            match count {
                0 => violations.push(Violation::MissingDonorGene {
                    species: (*species).clone(),
                    name: name.to_string(),
                }),
                1 => {}
                _ => violations.push(Violation::DuplicateDonorGene {
                    species: (*species).clone(),
                    name: name.to_string(),
                    count,
                }),
            }
        }
    }

    for rule in &config.renames {
        let has = |name: &GeneName| {
            records
                .iter()
                .any(|r| r.species == rule.species && &r.name == name)
        };
        if has(&rule.from) {
            violations.push(Violation::RenameNotApplied {
                species: rule.species.clone(),
                name: rule.from.to_string(),
            });
        }
        if !has(&rule.to) {
            violations.push(Violation::RenameTargetMissing {
                species: rule.species.clone(),
                name: rule.to.to_string(),
            });
        }
    }

    ValidationReport {
        records_checked: records.len(),
        violations,
    }
}

///
/// Check a database on disk: the gapped files are re-read and validated as
/// a whole, and each ungapped file must have unique identifiers.
///
pub fn validate_database(
    layout: &DatabaseLayout,
    config: &DatabaseConfig,
) -> Result<ValidationReport, BuildError> {
    let mut records = Vec::new();
    let mut ungapped_violations = Vec::new();

    for segment in layout.segments() {
        records.extend(parse_imgt_records(layout.gapped_fasta(segment))?);

        let ungapped = layout.ungapped_fasta(segment);
        if !ungapped.is_file() {
            continue;
        }

        let mut id_counts: BTreeMap<String, usize> = BTreeMap::new();
        for entry in read_fasta(&ungapped)? {
            *id_counts.entry(entry.id().to_string()).or_insert(0) += 1;
        }
        for (id, count) in id_counts {
            if count > 1 {
                ungapped_violations.push(Violation::DuplicateIdentifier {
                    file: ungapped.display().to_string(),
                    id,
                    count,
                });
            }
        }
    }

    let mut report = validate_records(&records, config);
    report.extend(ValidationReport {
        records_checked: 0,
        violations: ungapped_violations,
    });

    if report.is_valid() {
        info!(
            "{}: {} records passed validation",
            layout.name(),
            report.records_checked
        );
    } else {
        for violation in &report.violations {
            warn!("{}: {}", layout.name(), violation);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use germdb_core::FastaRecord;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn record(name: &str, species: &str, functionality: &str) -> GermlineRecord {
        let fasta = FastaRecord {
            header: format!("X00001|{}|{}|{}|REGION|", name, species, functionality),
            sequence: "acgt".to_string(),
        };
        GermlineRecord::from_fasta_record(&fasta).unwrap()
    }

    #[fixture]
    fn config() -> DatabaseConfig {
        DatabaseConfig::preset("vrc01mouse").unwrap().unwrap()
    }

    #[fixture]
    fn valid_records() -> Vec<GermlineRecord> {
        let mut human_j = record("IGHJ2*01", "Homo sapiens", "F");
        human_j.rename("IGHJ2*09".parse().unwrap());
        vec![
            record("IGHV1-4*01", "Mus musculus", "F"),
            record("IGKV3-2*01", "Mus musculus", "P"),
            record("IGHJ2*01", "Mus musculus", "F"),
            record("IGHV1-2*02", "Homo sapiens", "F"),
            record("IGHD5-5*01", "Homo sapiens", "F"),
            human_j,
        ]
    }

    #[rstest]
    fn test_valid_set(config: DatabaseConfig, valid_records: Vec<GermlineRecord>) {
        let report = validate_records(&valid_records, &config);
        assert_eq!(report.violations, vec![]);
        assert_eq!(report.records_checked, 6);
        assert!(report.is_valid());
    }

    #[rstest]
    fn test_unrenamed_collision(config: DatabaseConfig, mut valid_records: Vec<GermlineRecord>) {
        valid_records.pop();
        valid_records.push(record("IGHJ2*01", "Homo sapiens", "F"));

        let report = validate_records(&valid_records, &config);
        assert!(report.violations.contains(&Violation::DuplicateName {
            name: "IGHJ2*01".to_string(),
            count: 2
        }));
        assert!(report.violations.contains(&Violation::RenameNotApplied {
            species: Species::HomoSapiens,
            name: "IGHJ2*01".to_string()
        }));
        assert!(report.violations.contains(&Violation::RenameTargetMissing {
            species: Species::HomoSapiens,
            name: "IGHJ2*09".to_string()
        }));
        assert!(report.violations.contains(&Violation::MissingDonorGene {
            species: Species::HomoSapiens,
            name: "IGHJ2*09".to_string()
        }));
    }

    #[rstest]
    fn test_scope_violations(config: DatabaseConfig, mut valid_records: Vec<GermlineRecord>) {
        valid_records.push(record("IGHV1-69*01", "Homo sapiens", "F"));
        valid_records.push(record("IGHV1-1*01", "Macaca mulatta", "F"));
        valid_records.push(record("TRBV1*01", "Mus musculus", "F"));

        let report = validate_records(&valid_records, &config);
        assert_eq!(
            report.violations,
            vec![
                Violation::UnexpectedDonorGene {
                    name: "IGHV1-69*01".to_string(),
                    species: Species::HomoSapiens
                },
                Violation::UnexpectedSpecies {
                    name: "IGHV1-1*01".to_string(),
                    species: Species::MacacaMulatta
                },
                Violation::NonImmunoglobulinLocus {
                    name: "TRBV1*01".to_string(),
                    locus: Locus::TRB
                },
            ]
        );
    }

    #[rstest]
    fn test_duplicate_donor_gene(config: DatabaseConfig, mut valid_records: Vec<GermlineRecord>) {
        valid_records.push(record("IGHV1-2*02", "Homo sapiens", "F"));
        let report = validate_records(&valid_records, &config);
        assert!(report.violations.contains(&Violation::DuplicateDonorGene {
            species: Species::HomoSapiens,
            name: "IGHV1-2*02".to_string(),
            count: 2
        }));
    }

    #[rstest]
    fn test_functionality_filter() {
        let mut config = DatabaseConfig::plain("mouse", None);
        config.filters.functionality = Some(vec![Functionality::Functional]);
        let report = validate_records(&[record("IGHV1-4*01", "Mus musculus", "ORF")], &config);
        assert_eq!(
            report.violations,
            vec![Violation::DisallowedFunctionality {
                name: "IGHV1-4*01".to_string(),
                functionality: Functionality::OpenReadingFrame
            }]
        );
    }
}
