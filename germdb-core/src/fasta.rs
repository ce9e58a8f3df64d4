use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::str::Utf8Error;

use seq_io::fasta::{Reader, Record};

use crate::errors::GermdbError;
use crate::models::GermlineRecord;
use crate::utils::get_dynamic_reader;

///
/// A raw FASTA entry: the header without its leading `>` and the sequence
/// with line breaks removed.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FastaRecord {
    pub header: String,
    pub sequence: String,
}

impl FastaRecord {
    /// First whitespace-delimited token of the header.
    pub fn id(&self) -> &str {
        self.header.split_whitespace().next().unwrap_or("")
    }
}

///
/// Parse FASTA entries from any reader. Sequences may span several lines.
///
pub fn read_fasta_from<R: Read>(reader: R) -> Result<Vec<FastaRecord>, GermdbError> {
    let mut fasta_reader = Reader::new(reader);
    let mut records = Vec::new();

    while let Some(record) = fasta_reader.next() {
        let record = record?;
        let n = records.len() + 1;
        let malformed = |e: Utf8Error| GermdbError::MalformedFasta {
            record: n,
            reason: e.to_string(),
        };

        let header = std::str::from_utf8(record.head()).map_err(malformed)?;
        let sequence = String::from_utf8(record.full_seq().into_owned())
            .map_err(|e| malformed(e.utf8_error()))?;

        records.push(FastaRecord {
            header: header.trim().to_string(),
            sequence,
        });
    }

    Ok(records)
}

///
/// Read a FASTA file, gzipped or not.
///
/// # Arguments
///
/// - path: path to a `.fasta`, `.fa` or `.fasta.gz` file
///
pub fn read_fasta<T: AsRef<Path>>(path: T) -> Result<Vec<FastaRecord>, GermdbError> {
    let reader = get_dynamic_reader(path.as_ref())?;
    read_fasta_from(reader)
}

///
/// Read an IMGT-gapped germline FASTA file into germline records.
///
pub fn parse_imgt_records<T: AsRef<Path>>(path: T) -> Result<Vec<GermlineRecord>, GermdbError> {
    let records = read_fasta(path.as_ref())?;
    log::debug!(
        "Read {} FASTA entries from {}",
        records.len(),
        path.as_ref().display()
    );

    records
        .iter()
        .map(GermlineRecord::from_fasta_record)
        .collect()
}

///
/// Write FASTA entries with each sequence on a single line.
///
pub fn write_fasta<'a, T, I>(path: T, records: I) -> Result<usize, GermdbError>
where
    T: AsRef<Path>,
    I: IntoIterator<Item = &'a FastaRecord>,
{
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    let mut n = 0;

    for record in records {
        writeln!(writer, ">{}", record.header)?;
        writeln!(writer, "{}", record.sequence)?;
        n += 1;
    }
    writer.flush()?;

    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    #[rstest]
    fn test_multiline_sequences_are_joined() {
        let input = ">seq1 description\nACGT\nTTGG\n\n>seq2\nNNNN\n";
        let records = read_fasta_from(Cursor::new(input)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), "seq1");
        assert_eq!(records[0].sequence, "ACGTTTGG");
        assert_eq!(records[1].sequence, "NNNN");
    }

    #[rstest]
    fn test_sequence_before_header_is_error() {
        let input = "ACGT\n>seq1\nACGT\n";
        let result = read_fasta_from(Cursor::new(input));
        assert!(matches!(result, Err(GermdbError::Fasta(_))));
    }

    #[rstest]
    fn test_empty_input() {
        let records = read_fasta_from(Cursor::new("")).unwrap();
        assert!(records.is_empty());
    }

    #[rstest]
    fn test_windows_line_endings() {
        let input = ">X07448|IGHV1-2*02|Homo sapiens|F|\r\ncaggtg\r\ncagctg\r\n";
        let records = read_fasta_from(Cursor::new(input)).unwrap();
        assert_eq!(records[0].header, "X07448|IGHV1-2*02|Homo sapiens|F|");
        assert_eq!(records[0].sequence, "caggtgcagctg");
    }

    #[rstest]
    fn test_gzipped_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("j.fasta.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder
            .write_all(b">V00770|IGHJ1*01|Mus musculus|F|\nctactgg\ntacttc\n")
            .unwrap();
        encoder.finish().unwrap();

        let records = read_fasta(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "V00770|IGHJ1*01|Mus");
        assert_eq!(records[0].sequence, "ctactggtacttc");
    }

    #[rstest]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.fasta");
        let records = vec![
            FastaRecord {
                header: "IGHJ2*01".to_string(),
                sequence: "ACGT".to_string(),
            },
            FastaRecord {
                header: "IGHJ2*09".to_string(),
                sequence: "TTTT".to_string(),
            },
        ];

        let n = write_fasta(&path, &records).unwrap();
        assert_eq!(n, 2);
        assert_eq!(read_fasta(&path).unwrap(), records);
    }
}
