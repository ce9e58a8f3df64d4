use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::functionality::Functionality;
use super::gene::{GeneName, Locus, Segment};
use super::species::Species;
use crate::consts::{IMGT_GAP, IMGT_MIN_HEADER_FIELDS};
use crate::errors::GermdbError;
use crate::fasta::FastaRecord;

///
/// Whether a record belongs to the database's own species or was inserted
/// from another species (e.g. human genes knocked into a mouse).
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Host,
    Donor,
}

impl Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Host => write!(f, "host"),
            Origin::Donor => write!(f, "donor"),
        }
    }
}

///
/// One germline gene allele parsed from an IMGT/GENE-DB FASTA entry.
///
/// All header fields are retained so a renamed record can be written back
/// with only its gene name changed.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GermlineRecord {
    header_fields: Vec<String>,
    pub name: GeneName,
    pub species: Species,
    pub functionality: Functionality,
    pub sequence: String,
    pub origin: Origin,
    pub renamed_from: Option<GeneName>,
}

impl GermlineRecord {
    ///
    /// Build a record from a FASTA entry carrying an IMGT header:
    /// `accession|gene*allele|species|functionality|region|...`
    ///
    pub fn from_fasta_record(record: &FastaRecord) -> Result<GermlineRecord, GermdbError> {
        let header_fields: Vec<String> = record
            .header
            .split('|')
            .map(|field| field.to_string())
            .collect();

        if header_fields.len() < IMGT_MIN_HEADER_FIELDS {
            return Err(GermdbError::InvalidHeader {
                header: record.header.clone(),
                expected: IMGT_MIN_HEADER_FIELDS,
            });
        }

        let name: GeneName = header_fields[1].parse()?;
        let species = Species::from_imgt_field(&header_fields[2])?;
        let functionality: Functionality = header_fields[3].parse()?;

        Ok(GermlineRecord {
            header_fields,
            name,
            species,
            functionality,
            sequence: record.sequence.clone(),
            origin: Origin::Host,
            renamed_from: None,
        })
    }

    pub fn accession(&self) -> &str {
        &self.header_fields[0]
    }

    pub fn locus(&self) -> Locus {
        self.name.locus()
    }

    pub fn segment(&self) -> Segment {
        self.name.segment()
    }

    /// The IMGT region label (`V-REGION`, `J-REGION`...) if the header has one.
    pub fn region(&self) -> Option<&str> {
        self.header_fields
            .get(4)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// The name the record had in the source files.
    pub fn original_name(&self) -> &GeneName {
        self.renamed_from.as_ref().unwrap_or(&self.name)
    }

    pub fn is_renamed(&self) -> bool {
        self.renamed_from.is_some()
    }

    ///
    /// Give the record a new gene name. The header is rewritten so the new
    /// name is what downstream tools see, and the first name the record ever
    /// had is kept for provenance.
    ///
    pub fn rename(&mut self, new_name: GeneName) {
        if self.renamed_from.is_none() {
            self.renamed_from = Some(self.name.clone());
        }
        self.header_fields[1] = new_name.to_string();
        self.name = new_name;
    }

    pub fn to_imgt_header(&self) -> String {
        self.header_fields.join("|")
    }

    pub fn ungapped_sequence(&self) -> String {
        self.sequence.chars().filter(|c| *c != IMGT_GAP).collect()
    }

    pub fn to_gapped_fasta(&self) -> FastaRecord {
        FastaRecord {
            header: self.to_imgt_header(),
            sequence: self.sequence.clone(),
        }
    }

    ///
    /// The form consumed by BLAST-style assigners: the identifier is only the
    /// gene name and IMGT gaps are removed.
    ///
    pub fn to_ungapped_fasta(&self) -> FastaRecord {
        FastaRecord {
            header: self.name.to_string(),
            sequence: self.ungapped_sequence(),
        }
    }
}
