use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_ALLELE_WIDTH;
use crate::errors::GermdbError;

///
/// Antigen receptor locus. Only the immunoglobulin loci are valid members of
/// an antibody germline database, but T cell receptor loci are parsed so they
/// can be reported instead of rejected outright.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Locus {
    IGH,
    IGK,
    IGL,
    TRA,
    TRB,
    TRG,
    TRD,
}

impl Locus {
    pub fn is_immunoglobulin(&self) -> bool {
        matches!(self, Locus::IGH | Locus::IGK | Locus::IGL)
    }

    pub fn is_heavy(&self) -> bool {
        matches!(self, Locus::IGH)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locus::IGH => "IGH",
            Locus::IGK => "IGK",
            Locus::IGL => "IGL",
            Locus::TRA => "TRA",
            Locus::TRB => "TRB",
            Locus::TRG => "TRG",
            Locus::TRD => "TRD",
        }
    }
}

impl FromStr for Locus {
    type Err = GermdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IGH" => Ok(Locus::IGH),
            "IGK" => Ok(Locus::IGK),
            "IGL" => Ok(Locus::IGL),
            "TRA" => Ok(Locus::TRA),
            "TRB" => Ok(Locus::TRB),
            "TRG" => Ok(Locus::TRG),
            "TRD" => Ok(Locus::TRD),
            _ => Err(GermdbError::InvalidGeneName(format!("unknown locus {}", s))),
        }
    }
}

impl Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Gene segment type.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    V,
    D,
    J,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::V, Segment::D, Segment::J];

    /// Lowercase stem used for per-segment database files (`v.fasta`).
    pub fn file_stem(&self) -> &'static str {
        match self {
            Segment::V => "v",
            Segment::D => "d",
            Segment::J => "j",
        }
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            Segment::V => "Variable",
            Segment::D => "Diversity",
            Segment::J => "Joining",
        }
    }

    fn from_char(c: char) -> Option<Segment> {
        match c.to_ascii_uppercase() {
            'V' => Some(Segment::V),
            'D' => Some(Segment::D),
            'J' => Some(Segment::J),
            _ => None,
        }
    }
}

impl FromStr for Segment {
    type Err = GermdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let segment = match (chars.next(), chars.next()) {
            (Some(c), None) => Segment::from_char(c),
            _ => match s.trim().to_lowercase().as_str() {
                "variable" => Some(Segment::V),
                "diversity" => Some(Segment::D),
                "joining" => Some(Segment::J),
                _ => None,
            },
        };
        segment.ok_or_else(|| GermdbError::InvalidGeneName(format!("unknown segment {}", s)))
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Segment::V => "V",
            Segment::D => "D",
            Segment::J => "J",
        };
        write!(f, "{}", c)
    }
}

///
/// An IMGT gene and allele name, e.g. `IGHV1-2*02`.
///
/// The allele is kept as a number so new alleles of the same gene can be
/// minted; `allele_width` preserves the zero padding of the original.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GeneName {
    gene: String,
    locus: Locus,
    segment: Segment,
    allele: u32,
    allele_width: usize,
}

impl GeneName {
    /// The gene without its allele (`IGHJ2` for `IGHJ2*01`).
    pub fn gene(&self) -> &str {
        &self.gene
    }

    pub fn allele(&self) -> u32 {
        self.allele
    }

    pub fn locus(&self) -> Locus {
        self.locus
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    ///
    /// A new name for another allele of the same gene.
    ///
    pub fn with_allele(&self, allele: u32) -> GeneName {
        GeneName {
            gene: self.gene.clone(),
            locus: self.locus,
            segment: self.segment,
            allele,
            allele_width: self.allele_width.max(MIN_ALLELE_WIDTH),
        }
    }

    pub fn same_gene(&self, other: &GeneName) -> bool {
        self.gene == other.gene
    }
}

impl FromStr for GeneName {
    type Err = GermdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || GermdbError::InvalidGeneName(s.to_string());

        let (gene, allele_str) = s.split_once('*').ok_or_else(invalid)?;
        if !gene.is_ascii() || gene.len() < 4 || allele_str.is_empty() {
            return Err(invalid());
        }
        if !allele_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let locus: Locus = gene[..3].parse().map_err(|_| invalid())?;
        let segment = gene[3..]
            .chars()
            .next()
            .and_then(Segment::from_char)
            .ok_or_else(invalid)?;

        let allele = allele_str.parse::<u32>().map_err(|_| invalid())?;

        Ok(GeneName {
            gene: gene.to_string(),
            locus,
            segment,
            allele,
            allele_width: allele_str.len(),
        })
    }
}

impl TryFrom<String> for GeneName {
    type Error = GermdbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GeneName> for String {
    fn from(value: GeneName) -> Self {
        value.to_string()
    }
}

impl Display for GeneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}*{:0width$}",
            self.gene,
            self.allele,
            width = self.allele_width
        )
    }
}
