use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn};
use serde::Serialize;

use germdb_core::utils::{expand_path, get_default_db_location};
use germdb_core::{FastaRecord, GermlineRecord, Segment, parse_imgt_records, write_fasta};
use germdb_merge::{DatabaseConfig, MergeOutcome, RecordCounts, RenameEvent, merge};

use crate::blast::{make_blast_db, makeblastdb_from_env};
use crate::errors::BuildError;
use crate::layout::DatabaseLayout;
use crate::manifest::{DatabaseManifest, InputSummary};
use crate::validate::{ValidationReport, validate_records};

#[derive(Default)]
pub struct DatabaseBuilder {
    location: Option<PathBuf>,
    config: Option<DatabaseConfig>,
    inputs: Vec<(Segment, PathBuf)>,
    makeblastdb: Option<PathBuf>,
    force: bool,
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory that holds databases. Defaults to `GERMDB_HOME` or `~/.germdb`.
    pub fn with_location(mut self, location: PathBuf) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_config(mut self, config: DatabaseConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Add an IMGT FASTA file of one segment. May be called more than once
    /// per segment.
    pub fn with_segment_file(mut self, segment: Segment, path: PathBuf) -> Self {
        self.inputs.push((segment, path));
        self
    }

    /// Build BLAST databases with this makeblastdb binary.
    pub fn with_makeblastdb(mut self, path: PathBuf) -> Self {
        self.makeblastdb = Some(path);
        self
    }

    /// Replace an existing database of the same name.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Consumes the builder and creates a GermlineDatabase ready to build.
    pub fn finish(self) -> Result<GermlineDatabase> {
        let config = self.config.ok_or(BuildError::MissingConfig)?;
        if self.inputs.is_empty() {
            return Err(BuildError::NoInput.into());
        }

        let location = expand_path(&self.location.unwrap_or_else(get_default_db_location));
        let layout = DatabaseLayout::new(&location, &config.name);
        let makeblastdb = self
            .makeblastdb
            .map(|p| expand_path(&p))
            .or_else(makeblastdb_from_env);

        Ok(GermlineDatabase {
            layout,
            config,
            inputs: self
                .inputs
                .into_iter()
                .map(|(segment, path)| (segment, expand_path(&path)))
                .collect(),
            makeblastdb,
            force: self.force,
        })
    }
}

/// Files written for one segment.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SegmentOutput {
    pub segment: Segment,
    pub records: usize,
    pub gapped: PathBuf,
    pub ungapped: PathBuf,
    pub blast: Option<PathBuf>,
}

#[derive(Serialize, Debug, Clone)]
pub struct BuildReport {
    pub root: PathBuf,
    pub segments: Vec<SegmentOutput>,
    pub renames: Vec<RenameEvent>,
    pub counts: RecordCounts,
    pub filtered_out: usize,
    pub validation: ValidationReport,
}

///
/// A germline database waiting to be built from IMGT FASTA files.
///
#[derive(Debug)]
pub struct GermlineDatabase {
    layout: DatabaseLayout,
    config: DatabaseConfig,
    inputs: Vec<(Segment, PathBuf)>,
    makeblastdb: Option<PathBuf>,
    force: bool,
}

impl GermlineDatabase {
    pub fn layout(&self) -> &DatabaseLayout {
        &self.layout
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Segments with at least one input file, in V, D, J order.
    pub fn segments(&self) -> Vec<Segment> {
        Segment::ALL
            .into_iter()
            .filter(|s| self.inputs.iter().any(|(segment, _)| segment == s))
            .collect()
    }

    ///
    /// Read, filter and merge the inputs, then write the database.
    ///
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let (records, summaries) = self.read_inputs()?;
        let n_input = records.len();
        let outcome = merge(records, &self.config)?;
        if outcome.records.is_empty() {
            return Err(BuildError::NothingToBuild {
                name: self.config.name.clone(),
                input: n_input,
            });
        }

        self.layout.prepare(self.force)?;
        info!("Writing germline database to {}", self.layout.root().display());

        let mut segments = Vec::new();
        for segment in self.segments() {
            segments.push(self.write_segment(segment, &outcome)?);
        }

        let manifest = DatabaseManifest::new(&self.config, summaries, &outcome);
        manifest.write_json(&self.layout.manifest_json())?;
        manifest.write_text(&self.layout.manifest_text())?;

        let validation = validate_records(&outcome.records, &self.config);
        for violation in &validation.violations {
            warn!("{}", violation);
        }

        Ok(BuildReport {
            root: self.layout.root().to_path_buf(),
            segments,
            renames: outcome.renames,
            counts: outcome.counts,
            filtered_out: manifest.filtered_out,
            validation,
        })
    }

    fn read_inputs(&self) -> Result<(Vec<GermlineRecord>, Vec<InputSummary>), BuildError> {
        let mut records = Vec::new();
        let mut summaries = Vec::new();

        for (segment, path) in &self.inputs {
            let parsed = read_segment_file(*segment, path)?;
            info!(
                "Read {} {} records from {}",
                parsed.len(),
                segment,
                path.display()
            );
            summaries.push(InputSummary {
                segment: *segment,
                path: path.display().to_string(),
                records: parsed.len(),
            });
            records.extend(parsed);
        }

        Ok((records, summaries))
    }

    fn write_segment(
        &self,
        segment: Segment,
        outcome: &MergeOutcome,
    ) -> Result<SegmentOutput, BuildError> {
        // both files share the gapped header order
        let mut records: Vec<&GermlineRecord> = outcome.records_for(segment).collect();
        records.sort_by_cached_key(|r| r.to_imgt_header());
        let gapped: Vec<FastaRecord> = records.iter().map(|r| r.to_gapped_fasta()).collect();
        let ungapped: Vec<FastaRecord> = records.iter().map(|r| r.to_ungapped_fasta()).collect();

        let gapped_path = self.layout.gapped_fasta(segment);
        let ungapped_path = self.layout.ungapped_fasta(segment);
        let n = write_fasta(&gapped_path, &gapped)?;
        write_fasta(&ungapped_path, &ungapped)?;
        info!("Wrote {} {} records", n, segment.long_name());

        let blast = match &self.makeblastdb {
            Some(makeblastdb) => {
                let prefix = self.layout.blast_prefix(segment);
                make_blast_db(
                    makeblastdb,
                    segment,
                    &ungapped_path,
                    &prefix,
                    &self.layout.blast_log(segment),
                )?;
                Some(prefix)
            }
            None => None,
        };

        Ok(SegmentOutput {
            segment,
            records: n,
            gapped: gapped_path,
            ungapped: ungapped_path,
            blast,
        })
    }
}

///
/// Parse an IMGT FASTA file given as input for `segment`. Every record must
/// be a gene of that segment.
///
pub fn read_segment_file(segment: Segment, path: &Path) -> Result<Vec<GermlineRecord>, BuildError> {
    let records = parse_imgt_records(path)?;
    if let Some(record) = records.iter().find(|r| r.segment() != segment) {
        return Err(BuildError::SegmentMismatch {
            path: path.to_path_buf(),
            name: record.name.to_string(),
            expected: segment,
            found: record.segment(),
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::write;

    use germdb_core::Species;
    use rstest::*;
    use tempfile::tempdir;

    #[rstest]
    fn test_finish_requires_config() {
        let result = DatabaseBuilder::new()
            .with_segment_file(Segment::V, PathBuf::from("v.fasta"))
            .finish();
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::MissingConfig)
        ));
    }

    #[rstest]
    fn test_finish_requires_input() {
        let result = DatabaseBuilder::new()
            .with_config(DatabaseConfig::plain("mouse", None))
            .finish();
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::NoInput)
        ));
    }

    #[rstest]
    fn test_segments_in_order() {
        let db = DatabaseBuilder::new()
            .with_location(PathBuf::from("/tmp/germdb-test"))
            .with_config(DatabaseConfig::plain("Mouse", None))
            .with_segment_file(Segment::J, PathBuf::from("j.fasta"))
            .with_segment_file(Segment::V, PathBuf::from("v1.fasta"))
            .with_segment_file(Segment::V, PathBuf::from("v2.fasta"))
            .finish()
            .unwrap();
        assert_eq!(db.segments(), vec![Segment::V, Segment::J]);
        assert_eq!(db.layout().root(), Path::new("/tmp/germdb-test/mouse"));
    }

    #[rstest]
    fn test_build_with_no_surviving_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("j.fasta");
        write(&path, ">J00256|IGHJ2*01|Homo sapiens|F|J-REGION|\nactac\n").unwrap();

        let db = DatabaseBuilder::new()
            .with_location(dir.path().join("db"))
            .with_config(DatabaseConfig::plain("mouse", Some(Species::MusMusculus)))
            .with_segment_file(Segment::J, path)
            .finish()
            .unwrap();

        assert!(matches!(
            db.build(),
            Err(BuildError::NothingToBuild { input: 1, .. })
        ));
        assert!(!db.layout().exists());
    }

    #[rstest]
    fn test_segment_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("v.fasta");
        write(&path, ">X00001|IGHJ1*01|Mus musculus|F|J-REGION|\nactac\n").unwrap();

        let result = read_segment_file(Segment::V, &path);
        assert!(matches!(
            result,
            Err(BuildError::SegmentMismatch {
                expected: Segment::V,
                found: Segment::J,
                ..
            })
        ));
    }
}
