use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use germdb_core::Segment;

use crate::consts::MAKEBLASTDB_ENV;
use crate::errors::BuildError;

/// makeblastdb binary named by `GERMDB_MAKEBLASTDB`, if set.
pub fn makeblastdb_from_env() -> Option<PathBuf> {
    env::var(MAKEBLASTDB_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

///
/// Build a BLAST nucleotide database from an ungapped germline FASTA file.
///
/// # Arguments
/// - makeblastdb: path to the makeblastdb binary
/// - segment: gene segment the file holds (used in errors)
/// - ungapped: ungapped FASTA input
/// - out_prefix: database output prefix
/// - log_file: where makeblastdb writes its log
pub fn make_blast_db(
    makeblastdb: &Path,
    segment: Segment,
    ungapped: &Path,
    out_prefix: &Path,
    log_file: &Path,
) -> Result<(), BuildError> {
    info!("Building BLASTn database for {} genes", segment.long_name());

    let output = Command::new(makeblastdb)
        .arg("-in")
        .arg(ungapped)
        .arg("-out")
        .arg(out_prefix)
        .arg("-parse_seqids")
        .arg("-dbtype")
        .arg("nucl")
        .arg("-logfile")
        .arg(log_file)
        .output()
        .map_err(|source| BuildError::BlastLaunch {
            binary: makeblastdb.to_path_buf(),
            source,
        })?;

    debug!("makeblastdb stdout: {}", String::from_utf8_lossy(&output.stdout));

    if !output.status.success() {
        return Err(BuildError::BlastFailed {
            segment,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;
    use tempfile::tempdir;

    #[rstest]
    fn test_missing_binary() {
        let dir = tempdir().unwrap();
        let result = make_blast_db(
            Path::new("/no/such/makeblastdb"),
            Segment::J,
            &dir.path().join("j.fasta"),
            &dir.path().join("j"),
            &dir.path().join("j.blastlog"),
        );
        assert!(matches!(result, Err(BuildError::BlastLaunch { .. })));
    }

    #[cfg(unix)]
    #[rstest]
    fn test_failing_binary() {
        let dir = tempdir().unwrap();
        let result = make_blast_db(
            Path::new("false"),
            Segment::J,
            &dir.path().join("j.fasta"),
            &dir.path().join("j"),
            &dir.path().join("j.blastlog"),
        );
        assert!(matches!(
            result,
            Err(BuildError::BlastFailed {
                segment: Segment::J,
                ..
            })
        ));
    }
}
