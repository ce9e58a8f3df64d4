use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use germdb_core::{FastaRecord, GermlineRecord, parse_imgt_records, write_fasta};
use germdb_merge::{DatabaseConfig, merge};

use super::cli::*;
use crate::common::{CONFIG_ARG, JSON_ARG, print_counts, print_renames};

pub fn run_merge(matches: &ArgMatches) -> Result<()> {
    let config_path = matches
        .get_one::<String>(CONFIG_ARG)
        .context("A path to a database configuration is required.")?;
    let output = matches
        .get_one::<String>(OUTPUT_ARG)
        .context("An output path is required.")?;

    let config = DatabaseConfig::from_path(Path::new(config_path))
        .with_context(|| format!("Can't load configuration from {}", config_path))?;

    let mut records = Vec::new();
    for input in matches.get_many::<String>(INPUTS_ARG).into_iter().flatten() {
        records.extend(
            parse_imgt_records(input).with_context(|| format!("Can't read {}", input))?,
        );
    }

    let outcome = merge(records, &config)?;

    let mut records: Vec<&GermlineRecord> = outcome.records.iter().collect();
    records.sort_by_cached_key(|r| r.to_imgt_header());
    let fasta: Vec<FastaRecord> = if matches.get_flag(UNGAPPED_ARG) {
        records.iter().map(|r| r.to_ungapped_fasta()).collect()
    } else {
        records.iter().map(|r| r.to_gapped_fasta()).collect()
    };
    let n = write_fasta(output, &fasta)?;

    if matches.get_flag(JSON_ARG) {
        println!("{}", serde_json::to_string_pretty(&outcome.renames)?);
        return Ok(());
    }

    println!("Wrote {} records to {}", n, output);
    print_counts(&outcome.counts);
    print_renames(&outcome.renames);

    Ok(())
}
