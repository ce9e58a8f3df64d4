use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ArgMatches;

use germdb_build::{DatabaseManifest, validate_database};
use germdb_merge::DatabaseConfig;

use crate::common::{CONFIG_ARG, JSON_ARG, open_database, print_violations};

pub fn run_validate(matches: &ArgMatches) -> Result<()> {
    let layout = open_database(matches)?;

    let config = match matches.get_one::<String>(CONFIG_ARG) {
        Some(path) => DatabaseConfig::from_path(Path::new(path))
            .with_context(|| format!("Can't load configuration from {}", path))?,
        None => {
            DatabaseManifest::from_json(&layout.manifest_json())
                .with_context(|| {
                    format!(
                        "Can't read the manifest of {}; pass --config instead",
                        layout.root().display()
                    )
                })?
                .config
        }
    };

    let report = validate_database(&layout, &config)?;

    if matches.get_flag(JSON_ARG) {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_valid() {
        println!(
            "{}: {} records, no problems found",
            layout.name(),
            report.records_checked
        );
    } else {
        print_violations(&report.violations);
    }

    if !report.is_valid() {
        bail!(
            "{} failed validation with {} problem(s)",
            layout.name(),
            report.violations.len()
        );
    }

    Ok(())
}
