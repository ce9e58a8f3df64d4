use std::collections::{BTreeMap, HashSet};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use germdb_core::consts::MAX_ALLELE;
use germdb_core::{GeneName, GermlineRecord, Origin, Segment, Species};

use crate::config::{CollisionPolicy, DatabaseConfig};
use crate::errors::MergeError;
use crate::filter::{FilterStats, RecordFilter};
use crate::overrides::RenameTable;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenameCause {
    /// Applied from the configured rename table.
    Override,
    /// Assigned automatically because the name was already taken.
    Collision,
}

///
/// One rename performed during a merge, kept for the database manifest.
///
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RenameEvent {
    pub species: Species,
    pub segment: Segment,
    pub from: GeneName,
    pub to: GeneName,
    pub cause: RenameCause,
    pub reason: Option<String>,
}

///
/// Record counts per segment and species.
///
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCounts(BTreeMap<String, BTreeMap<String, usize>>);

impl RecordCounts {
    pub fn from_records<'a, I: IntoIterator<Item = &'a GermlineRecord>>(records: I) -> Self {
        let mut counts = RecordCounts::default();
        for record in records {
            counts.add(record.segment(), &record.species);
        }
        counts
    }

    pub fn add(&mut self, segment: Segment, species: &Species) {
        *self
            .0
            .entry(segment.to_string())
            .or_default()
            .entry(species.to_string())
            .or_insert(0) += 1;
    }

    pub fn get(&self, segment: Segment, species: &Species) -> usize {
        self.0
            .get(&segment.to_string())
            .and_then(|by_species| by_species.get(species.binomial()))
            .copied()
            .unwrap_or(0)
    }

    pub fn segment_total(&self, segment: Segment) -> usize {
        self.0
            .get(&segment.to_string())
            .map(|by_species| by_species.values().sum())
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().flat_map(|m| m.values()).sum()
    }

    /// (segment, species, count) rows in segment order.
    pub fn rows(&self) -> Vec<(String, String, usize)> {
        self.0
            .iter()
            .flat_map(|(segment, by_species)| {
                by_species
                    .iter()
                    .map(move |(species, n)| (segment.clone(), species.clone(), *n))
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Host records in input order, then donor records in input order.
    pub records: Vec<GermlineRecord>,
    pub renames: Vec<RenameEvent>,
    pub counts: RecordCounts,
    pub filter_stats: FilterStats,
}

impl MergeOutcome {
    pub fn records_for(&self, segment: Segment) -> impl Iterator<Item = &GermlineRecord> {
        self.records.iter().filter(move |r| r.segment() == segment)
    }
}

///
/// Filter the input records by the configuration, then merge them into one
/// set with unique gene names.
///
pub fn merge(
    records: Vec<GermlineRecord>,
    config: &DatabaseConfig,
) -> Result<MergeOutcome, MergeError> {
    let n_input = records.len();
    let (records, filter_stats) = RecordFilter::from_config(config).apply(records);
    info!(
        "Kept {} of {} input records ({} filtered out)",
        filter_stats.kept,
        n_input,
        filter_stats.total_dropped()
    );

    let mut outcome = merge_records(records, config)?;
    outcome.filter_stats = filter_stats;
    Ok(outcome)
}

///
/// Merge records whose origin is already set.
///
/// Host records keep their names; a repeated host name is an error. Donor
/// records matching a rename rule are renamed as the rule says. Any other
/// donor record whose name is already taken is handled by the configured
/// collision policy.
///
pub fn merge_records(
    records: Vec<GermlineRecord>,
    config: &DatabaseConfig,
) -> Result<MergeOutcome, MergeError> {
    let table = RenameTable::from_config(config);
    let (host, donors): (Vec<GermlineRecord>, Vec<GermlineRecord>) = records
        .into_iter()
        .partition(|r| r.origin == Origin::Host);

    // every name that is or will be present, so automatic renames never
    // land on a name used further down the input
    let mut reserved: HashSet<String> = host
        .iter()
        .chain(donors.iter())
        .map(|r| r.name.to_string())
        .collect();
    reserved.extend(table.targets().map(|name| name.to_string()));

    let mut accepted: HashSet<String> = HashSet::with_capacity(reserved.len());
    let mut merged = Vec::with_capacity(host.len() + donors.len());
    let mut renames = Vec::new();

    for record in host {
        if !accepted.insert(record.name.to_string()) {
            return Err(MergeError::DuplicateHostRecord {
                name: record.name.to_string(),
                species: record.species.to_string(),
            });
        }
        merged.push(record);
    }

    for mut record in donors {
        if let Some(rule) = table.lookup(&record.species, &record.name) {
            if accepted.contains(&rule.to.to_string()) {
                return Err(MergeError::RenameTargetTaken {
                    from: record.name.to_string(),
                    to: rule.to.to_string(),
                    species: record.species.to_string(),
                });
            }
            info!(
                "Renaming {} {} to {} (rename table)",
                record.species, record.name, rule.to
            );
            renames.push(RenameEvent {
                species: record.species.clone(),
                segment: record.segment(),
                from: record.name.clone(),
                to: rule.to.clone(),
                cause: RenameCause::Override,
                reason: rule.reason.clone(),
            });
            record.rename(rule.to.clone());
        } else if accepted.contains(&record.name.to_string()) {
            match config.collisions.policy {
                CollisionPolicy::Fail => {
                    return Err(MergeError::UnresolvedCollision {
                        name: record.name.to_string(),
                        species: record.species.to_string(),
                    });
                }
                CollisionPolicy::NextAvailable => {
                    let new_name = next_available_allele(&record.name, &reserved)?;
                    warn!(
                        "{} {} collides with an existing record; renamed to {}",
                        record.species, record.name, new_name
                    );
                    reserved.insert(new_name.to_string());
                    renames.push(RenameEvent {
                        species: record.species.clone(),
                        segment: record.segment(),
                        from: record.name.clone(),
                        to: new_name.clone(),
                        cause: RenameCause::Collision,
                        reason: Some("name already used by another record".to_string()),
                    });
                    record.rename(new_name);
                }
            }
        }

        accepted.insert(record.name.to_string());
        merged.push(record);
    }

    let counts = RecordCounts::from_records(&merged);

    Ok(MergeOutcome {
        records: merged,
        renames,
        counts,
        filter_stats: FilterStats::default(),
    })
}

///
/// The smallest allele of the same gene, above the current one, whose name
/// is not reserved.
///
pub fn next_available_allele(
    name: &GeneName,
    reserved: &HashSet<String>,
) -> Result<GeneName, MergeError> {
    (name.allele().saturating_add(1)..=MAX_ALLELE)
        .map(|allele| name.with_allele(allele))
        .find(|candidate| !reserved.contains(&candidate.to_string()))
        .ok_or_else(|| MergeError::AlleleSpaceExhausted {
            gene: name.gene().to_string(),
        })
}
