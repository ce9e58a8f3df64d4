use thiserror::Error;

use germdb_core::GermdbError;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Invalid database configuration: {0}")]
    InvalidConfig(String),

    #[error("Can't parse database configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("{species} gene {name} appears more than once; host records are never renamed")]
    DuplicateHostRecord { name: String, species: String },

    #[error("{species} gene {name} collides with an existing record and no rename rule covers it")]
    UnresolvedCollision { name: String, species: String },

    #[error("Can't rename {species} gene {from} to {to}: {to} is already in the database")]
    RenameTargetTaken {
        from: String,
        to: String,
        species: String,
    },

    #[error("No unused allele number left for gene {gene}")]
    AlleleSpaceExhausted { gene: String },

    #[error(transparent)]
    Germdb(#[from] GermdbError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
