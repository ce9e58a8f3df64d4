use std::fmt::{self, Display};
use std::fs::{File, read_to_string, write};
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use germdb_core::Segment;
use germdb_merge::{DatabaseConfig, MergeOutcome, RecordCounts, RenameCause, RenameEvent};

use crate::errors::BuildError;

/// One input file and how many records it held before filtering.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InputSummary {
    pub segment: Segment,
    pub path: String,
    pub records: usize,
}

///
/// Provenance record written next to a built database: where the sequences
/// came from, the rules used to select them, and every rename.
///
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatabaseManifest {
    pub config: DatabaseConfig,
    pub inputs: Vec<InputSummary>,
    pub filtered_out: usize,
    pub renames: Vec<RenameEvent>,
    pub counts: RecordCounts,
    pub tool_version: String,
    pub built_at: DateTime<Utc>,
}

impl DatabaseManifest {
    pub fn new(
        config: &DatabaseConfig,
        inputs: Vec<InputSummary>,
        outcome: &MergeOutcome,
    ) -> DatabaseManifest {
        DatabaseManifest {
            config: config.clone(),
            inputs,
            filtered_out: outcome.filter_stats.total_dropped(),
            renames: outcome.renames.clone(),
            counts: outcome.counts.clone(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            built_at: Utc::now(),
        }
    }

    pub fn from_json(path: &Path) -> Result<DatabaseManifest, BuildError> {
        let json = read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), BuildError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn write_text(&self, path: &Path) -> Result<(), BuildError> {
        write(path, self.render_text())?;
        Ok(())
    }

    ///
    /// Render the manifest as plain text notes.
    ///
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl Display for DatabaseManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = &self.config;

        let title = format!("{} germline database", config.name);
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(f)?;

        let source = match &config.source_url {
            Some(url) => format!("{} ({})", config.source, url),
            None => config.source.clone(),
        };
        writeln!(f, "Source:    {}", source)?;
        if let Some(snapshot) = config.snapshot {
            writeln!(f, "Snapshot:  {}", snapshot.format("%B %-d, %Y"))?;
        }
        writeln!(
            f,
            "Built:     {} (germdb {})",
            self.built_at.format("%Y-%m-%d %H:%M UTC"),
            self.tool_version
        )?;
        match &config.host {
            Some(host) => writeln!(f, "Species:   {}", host)?,
            None => writeln!(f, "Species:   all species in the input files")?,
        }

        let functionality = config
            .filters
            .functionality
            .as_ref()
            .map(|v| v.iter().map(|x| x.code()).collect::<Vec<_>>().join(" + "))
            .unwrap_or_else(|| "any".to_string());
        let loci = config
            .filters
            .loci
            .as_ref()
            .map(|l| l.iter().map(|x| x.as_str()).collect::<Vec<_>>().join(", "))
            .unwrap_or_else(|| "any".to_string());
        writeln!(f, "Functionality: {}", functionality)?;
        writeln!(f, "Loci:      {}", loci)?;

        if !config.donors.is_empty() {
            writeln!(f)?;
            writeln!(f, "Genes from other species")?;
            writeln!(f, "------------------------")?;
            for donor in &config.donors {
                let genes = if donor.genes.is_empty() {
                    "all genes passing the filters".to_string()
                } else {
                    donor
                        .genes
                        .iter()
                        .map(|g| g.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                writeln!(f, "{}: {}", donor.species, genes)?;
            }
        }

        if !self.renames.is_empty() {
            writeln!(f)?;
            writeln!(f, "Renamed genes")?;
            writeln!(f, "-------------")?;
            for rename in &self.renames {
                let how = match rename.cause {
                    RenameCause::Override => "curated",
                    RenameCause::Collision => "automatic",
                };
                write!(
                    f,
                    "{} {} was renamed to {} ({})",
                    rename.species, rename.from, rename.to, how
                )?;
                match &rename.reason {
                    Some(reason) => writeln!(f, ": {}", reason)?,
                    None => writeln!(f)?,
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "Records")?;
        writeln!(f, "-------")?;
        for (segment, species, n) in self.counts.rows() {
            writeln!(f, "{:<3}{:<24}{:>6}", segment, species, n)?;
        }
        writeln!(f, "{:<27}{:>6}", "total", self.counts.total())?;
        if self.filtered_out > 0 {
            writeln!(f, "{} input records were filtered out", self.filtered_out)?;
        }

        if !config.notes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Notes")?;
            writeln!(f, "-----")?;
            for note in &config.notes {
                writeln!(f, "- {}", note)?;
            }
        }

        Ok(())
    }
}
