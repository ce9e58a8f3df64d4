//! # germdb-core
//!
//! Models and file handling shared by the germdb crates: IMGT gene names,
//! species and functionality classes, germline records parsed from
//! IMGT/GENE-DB FASTA headers, and gzip-aware FASTA reading and writing.
pub mod consts;
pub mod errors;
pub mod fasta;
pub mod models;
pub mod utils;

pub use errors::GermdbError;
pub use fasta::{FastaRecord, parse_imgt_records, read_fasta, write_fasta};
pub use models::{Functionality, GeneName, GermlineRecord, Locus, Origin, Segment, Species};
