//! # germdb-merge
//!
//! Combines germline records from a host species and any donor species into
//! one set with unique gene names.
//!
//! Records are first filtered by the database configuration (species,
//! functionality, locus, donor gene allowlist). Host records are never
//! renamed. A donor record is renamed when a curated rename rule names it,
//! or when its name is already taken and the collision policy allows an
//! automatic rename to the next unused allele of the same gene.
//!
//! ```
//! use germdb_merge::{DatabaseConfig, merge};
//! use germdb_core::{FastaRecord, GermlineRecord};
//!
//! let config = DatabaseConfig::preset("vrc01mouse").unwrap().unwrap();
//! let records = ["Mus musculus", "Homo sapiens"]
//!     .iter()
//!     .map(|species| {
//!         let fasta = FastaRecord {
//!             header: format!("X00001|IGHJ2*01|{}|F|J-REGION|", species),
//!             sequence: "actactttgactactggggc".to_string(),
//!         };
//!         GermlineRecord::from_fasta_record(&fasta).unwrap()
//!     })
//!     .collect();
//!
//! let outcome = merge(records, &config).unwrap();
//! let names: Vec<String> = outcome.records.iter().map(|r| r.name.to_string()).collect();
//! assert_eq!(names, vec!["IGHJ2*01", "IGHJ2*09"]);
//! ```
pub mod config;
pub mod consts;
pub mod errors;
pub mod filter;
pub mod merge;
pub mod overrides;

pub use config::{CollisionPolicy, DatabaseConfig, DonorConfig, FilterConfig, RenameRule};
pub use errors::MergeError;
pub use filter::{DropReason, FilterStats, RecordFilter};
pub use merge::{
    MergeOutcome, RecordCounts, RenameCause, RenameEvent, merge, merge_records,
    next_available_allele,
};
pub use overrides::RenameTable;
