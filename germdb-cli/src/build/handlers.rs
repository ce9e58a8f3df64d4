use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};

use germdb_build::DatabaseBuilder;
use germdb_core::{Segment, Species};
use germdb_merge::DatabaseConfig;

use super::cli::*;
use crate::common::{CONFIG_ARG, JSON_ARG, LOCATION_ARG, print_counts, print_renames, print_violations};

pub fn run_build(matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>(SPECIES_ARG)
        .context("A database name is required.")?;

    let config = resolve_config(name, matches.get_one::<String>(CONFIG_ARG).map(Path::new))?;

    let mut builder = DatabaseBuilder::new()
        .with_config(config)
        .force(matches.get_flag(FORCE_ARG));

    if let Some(location) = matches.get_one::<String>(LOCATION_ARG) {
        builder = builder.with_location(PathBuf::from(location));
    }
    if let Some(makeblastdb) = matches.get_one::<String>(MAKEBLASTDB_ARG) {
        builder = builder.with_makeblastdb(PathBuf::from(makeblastdb));
    }
    for (arg, segment) in [
        (VARIABLE_ARG, Segment::V),
        (DIVERSITY_ARG, Segment::D),
        (JOINING_ARG, Segment::J),
    ] {
        for path in matches.get_many::<String>(arg).into_iter().flatten() {
            builder = builder.with_segment_file(segment, PathBuf::from(path));
        }
    }

    let db = builder.finish()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} [{elapsed_precise}] {msg}")?);
    spinner.set_message(format!("Building {}", db.layout().root().display()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = db.build();
    spinner.finish_and_clear();
    let report = result?;

    if matches.get_flag(JSON_ARG) {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Built {}", report.root.display());
    print_counts(&report.counts);
    if report.filtered_out > 0 {
        println!("{} input records were filtered out", report.filtered_out);
    }
    print_renames(&report.renames);
    if !report.validation.is_valid() {
        println!("The database has problems:");
        print_violations(&report.validation.violations);
    }

    Ok(())
}

///
/// Configuration for a build named `name`. An explicit config file wins and
/// takes `name` as its database name; next a bundled preset of that name.
/// Otherwise the database is a plain one: limited to `name` if it is a known
/// species, keeping every input record if it is not.
///
pub fn resolve_config(name: &str, config_path: Option<&Path>) -> Result<DatabaseConfig> {
    if let Some(path) = config_path {
        let mut config = DatabaseConfig::from_path(path)
            .with_context(|| format!("Can't load configuration from {}", path.display()))?;
        config.name = name.to_string();
        return Ok(config);
    }

    if let Some(config) = DatabaseConfig::preset(&name.to_lowercase())? {
        return Ok(config);
    }

    let host = match name.parse::<Species>()? {
        Species::Other(_) => None,
        species => Some(species),
    };
    Ok(DatabaseConfig::plain(name, host))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::write;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    #[rstest]
    fn test_preset_is_used() {
        let config = resolve_config("VRC01mouse", None).unwrap();
        assert_eq!(config.name, "vrc01mouse");
        assert_eq!(config.renames.len(), 1);
    }

    #[rstest]
    #[case("human", Species::HomoSapiens)]
    #[case("mouse", Species::MusMusculus)]
    #[case("macaque", Species::MacacaMulatta)]
    fn test_plain_species(#[case] name: &str, #[case] host: Species) {
        let config = resolve_config(name, None).unwrap();
        assert_eq!(config.name, name);
        assert_eq!(config.host, Some(host));
        assert!(config.donors.is_empty());
    }

    #[rstest]
    fn test_unknown_name_keeps_every_species() {
        let config = resolve_config("mydb", None).unwrap();
        assert_eq!(config.name, "mydb");
        assert_eq!(config.host, None);
        assert!(config.is_host(&Species::HomoSapiens));
        assert!(config.is_host(&Species::MusMusculus));
    }

    #[rstest]
    fn test_config_file_takes_cli_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.toml");
        write(&path, "name = \"from-file\"\nhost = \"Mus musculus\"\n").unwrap();

        let config = resolve_config("custom", Some(&path)).unwrap();
        assert_eq!(config.name, "custom");
        assert_eq!(config.host, Some(Species::MusMusculus));
    }
}
