use std::path::PathBuf;

use thiserror::Error;

use germdb_core::{GermdbError, Segment};
use germdb_merge::MergeError;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("A germline database already exists at {0}; use --force to overwrite it")]
    DatabaseExists(PathBuf),

    #[error("No germline database found at {0}")]
    DatabaseNotFound(PathBuf),

    #[error("A database configuration is required")]
    MissingConfig,

    #[error("No input files were given")]
    NoInput,

    #[error("None of the {input} input records belong in database '{name}'; check its species and filters")]
    NothingToBuild { name: String, input: usize },

    #[error("{path}: {name} is a {found} gene but the file was given as {expected} input")]
    SegmentMismatch {
        path: PathBuf,
        name: String,
        expected: Segment,
        found: Segment,
    },

    #[error("Can't run makeblastdb at {binary}: {source}")]
    BlastLaunch {
        binary: PathBuf,
        source: std::io::Error,
    },

    #[error("makeblastdb failed for {segment} genes ({status}): {stderr}")]
    BlastFailed {
        segment: Segment,
        status: String,
        stderr: String,
    },

    #[error("Can't read or write the database manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Germdb(#[from] GermdbError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
