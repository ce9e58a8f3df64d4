//! # germdb-build
//!
//! Builds germline gene databases on disk from IMGT/GENE-DB FASTA files.
//!
//! A database is a directory holding IMGT-gapped and ungapped FASTA files
//! per gene segment, optional BLAST databases, and a manifest recording the
//! source, snapshot date, species and every gene rename.
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use germdb_build::DatabaseBuilder;
//! use germdb_core::Segment;
//! use germdb_merge::DatabaseConfig;
//!
//! let config = DatabaseConfig::preset("vrc01mouse").unwrap().unwrap();
//! let db = DatabaseBuilder::new()
//!     .with_location(PathBuf::from("~/.germdb"))
//!     .with_config(config)
//!     .with_segment_file(Segment::V, PathBuf::from("imgt_v.fasta"))
//!     .with_segment_file(Segment::D, PathBuf::from("imgt_d.fasta"))
//!     .with_segment_file(Segment::J, PathBuf::from("imgt_j.fasta"))
//!     .finish()
//!     .unwrap();
//!
//! let report = db.build().unwrap();
//! println!("{} records written", report.counts.total());
//! ```
pub mod blast;
pub mod builder;
pub mod consts;
pub mod errors;
pub mod layout;
pub mod manifest;
pub mod validate;

pub use builder::{BuildReport, DatabaseBuilder, GermlineDatabase, SegmentOutput, read_segment_file};
pub use errors::BuildError;
pub use layout::{DatabaseLayout, list_databases};
pub use manifest::{DatabaseManifest, InputSummary};
pub use validate::{ValidationReport, Violation, validate_database, validate_records};
