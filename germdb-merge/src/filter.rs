use std::collections::BTreeMap;
use std::fmt::{self, Display};

use log::debug;
use serde::Serialize;

use germdb_core::{GermlineRecord, Origin};

use crate::config::DatabaseConfig;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    OtherSpecies,
    Functionality,
    Locus,
    NotInDonorList,
}

impl Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DropReason::OtherSpecies => "species not in database",
            DropReason::Functionality => "functionality filtered",
            DropReason::Locus => "locus filtered",
            DropReason::NotInDonorList => "donor gene not listed",
        };
        write!(f, "{}", s)
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub kept: usize,
    pub dropped: BTreeMap<DropReason, usize>,
}

impl FilterStats {
    pub fn total_dropped(&self) -> usize {
        self.dropped.values().sum()
    }
}

///
/// Decides which records enter the database and tags each kept record as
/// host or donor.
///
pub struct RecordFilter<'a> {
    config: &'a DatabaseConfig,
}

impl<'a> RecordFilter<'a> {
    pub fn from_config(config: &'a DatabaseConfig) -> RecordFilter<'a> {
        RecordFilter { config }
    }

    pub fn check(&self, record: &GermlineRecord) -> Result<Origin, DropReason> {
        let origin = if self.config.is_host(&record.species) {
            Origin::Host
        } else {
            match self.config.donor(&record.species) {
                Some(donor) if donor.includes(record.original_name()) => Origin::Donor,
                Some(_) => return Err(DropReason::NotInDonorList),
                None => return Err(DropReason::OtherSpecies),
            }
        };

        if !self.config.filters.allows_functionality(record.functionality) {
            return Err(DropReason::Functionality);
        }
        if !self.config.filters.allows_locus(record.locus()) {
            return Err(DropReason::Locus);
        }

        Ok(origin)
    }

    pub fn apply(&self, records: Vec<GermlineRecord>) -> (Vec<GermlineRecord>, FilterStats) {
        let mut stats = FilterStats::default();
        let mut kept = Vec::with_capacity(records.len());

        for mut record in records {
            match self.check(&record) {
                Ok(origin) => {
                    record.origin = origin;
                    kept.push(record);
                }
                Err(reason) => {
                    debug!("Dropping {} ({}): {}", record.name, record.species, reason);
                    *stats.dropped.entry(reason).or_insert(0) += 1;
                }
            }
        }

        stats.kept = kept.len();
        (kept, stats)
    }
}
