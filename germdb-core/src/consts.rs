/// Environment variable that overrides the default database location (`~/.germdb/`).
pub const GERMDB_HOME_ENV: &str = "GERMDB_HOME";

/// Folder created under the home directory when `GERMDB_HOME` is unset.
pub const DEFAULT_DB_FOLDER: &str = ".germdb";

/// Minimum number of '|'-delimited fields in an IMGT/GENE-DB FASTA header.
/// accession | gene*allele | species | functionality
pub const IMGT_MIN_HEADER_FIELDS: usize = 4;

/// IMGT gap character used in gapped V sequences.
pub const IMGT_GAP: char = '.';

/// Smallest number of digits used when printing an allele number (`*01`).
pub const MIN_ALLELE_WIDTH: usize = 2;

/// Largest allele number considered when searching for an unused allele.
pub const MAX_ALLELE: u32 = 999;
