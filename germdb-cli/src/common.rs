use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use germdb_build::{DatabaseLayout, Violation};
use germdb_core::utils::{expand_path, get_default_db_location};
use germdb_merge::{RecordCounts, RenameCause, RenameEvent};

pub const LOCATION_ARG: &str = "location";
pub const DB_ARG: &str = "db";
pub const CONFIG_ARG: &str = "config";
pub const JSON_ARG: &str = "json";

/// Database location from `-l`, falling back to `GERMDB_HOME` or `~/.germdb`.
pub fn resolve_location(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<String>(LOCATION_ARG)
        .map(|l| expand_path(Path::new(l)))
        .unwrap_or_else(get_default_db_location)
}

///
/// Open the database given with `--db`, either a directory or the name of
/// a database under the location.
///
pub fn open_database(matches: &ArgMatches) -> Result<DatabaseLayout> {
    let db = matches
        .get_one::<String>(DB_ARG)
        .context("A database path or name is required")?;

    let path = expand_path(Path::new(db));
    if path.is_dir() {
        return Ok(DatabaseLayout::open(&path)?);
    }

    let layout = DatabaseLayout::new(&resolve_location(matches), db);
    Ok(DatabaseLayout::open(layout.root())?)
}

#[derive(Tabled)]
struct CountRow {
    segment: String,
    species: String,
    records: usize,
}

#[derive(Tabled)]
struct RenameRow {
    species: String,
    from: String,
    to: String,
    cause: &'static str,
    reason: String,
}

#[derive(Tabled)]
struct ViolationRow {
    #[tabled(rename = "#")]
    index: usize,
    violation: String,
}

pub fn print_counts(counts: &RecordCounts) {
    let rows: Vec<CountRow> = counts
        .rows()
        .into_iter()
        .map(|(segment, species, records)| CountRow {
            segment,
            species,
            records,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    println!("Total records: {}", counts.total());
}

pub fn print_renames(renames: &[RenameEvent]) {
    if renames.is_empty() {
        println!("No genes were renamed.");
        return;
    }

    let rows: Vec<RenameRow> = renames
        .iter()
        .map(|r| RenameRow {
            species: r.species.to_string(),
            from: r.from.to_string(),
            to: r.to.to_string(),
            cause: match r.cause {
                RenameCause::Override => "curated",
                RenameCause::Collision => "collision",
            },
            reason: r.reason.clone().unwrap_or_default(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
}

pub fn print_violations(violations: &[Violation]) {
    let rows: Vec<ViolationRow> = violations
        .iter()
        .enumerate()
        .map(|(i, v)| ViolationRow {
            index: i + 1,
            violation: v.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
}
