//! File and directory names of an on-disk germline database.
//!
//! ```text
//! <location>/<name>/
//!     imgt_gapped/{v,d,j}.fasta
//!     ungapped/{v,d,j}.fasta
//!     blast/{v,d,j}.*
//!     manifest.json
//!     MANIFEST.txt
//! ```

/// IMGT-gapped FASTA files with full IMGT headers.
pub const GAPPED_SUBFOLDER: &str = "imgt_gapped";

/// Gap-free FASTA files whose identifiers are bare gene names.
pub const UNGAPPED_SUBFOLDER: &str = "ungapped";

/// BLAST nucleotide databases built from the ungapped files.
pub const BLAST_SUBFOLDER: &str = "blast";

pub const FASTA_EXT: &str = "fasta";

pub const BLAST_LOG_EXT: &str = "blastlog";

/// Machine-readable manifest.
pub const MANIFEST_JSON: &str = "manifest.json";

/// Human-readable provenance notes.
pub const MANIFEST_TEXT: &str = "MANIFEST.txt";

/// Environment variable naming a `makeblastdb` binary to use when none is given.
pub const MAKEBLASTDB_ENV: &str = "GERMDB_MAKEBLASTDB";
