use thiserror::Error;

#[derive(Error, Debug)]
pub enum GermdbError {
    #[error("Invalid gene name: {0}")]
    InvalidGeneName(String),

    #[error("Invalid IMGT header (expected at least {expected} '|'-delimited fields): {header}")]
    InvalidHeader { header: String, expected: usize },

    #[error("Unknown functionality class: {0}")]
    InvalidFunctionality(String),

    #[error("Unknown species: {0}")]
    InvalidSpecies(String),

    #[error("Malformed FASTA: {0}")]
    Fasta(#[from] seq_io::fasta::Error),

    #[error("Malformed FASTA record #{record}: {reason}")]
    MalformedFasta { record: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
