use anyhow::Result;
use clap::ArgMatches;
use log::warn;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use germdb_build::{DatabaseLayout, DatabaseManifest, list_databases};

use crate::common::resolve_location;

#[derive(Tabled)]
struct DatabaseRow {
    name: String,
    segments: String,
    records: String,
    renames: String,
    built: String,
}

fn database_row(layout: &DatabaseLayout) -> DatabaseRow {
    let segments = layout
        .segments()
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let manifest = match DatabaseManifest::from_json(&layout.manifest_json()) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            warn!("{}: can't read manifest: {}", layout.name(), e);
            None
        }
    };

    let unknown = || "-".to_string();
    DatabaseRow {
        name: layout.name(),
        segments,
        records: manifest
            .as_ref()
            .map(|m| m.counts.total().to_string())
            .unwrap_or_else(unknown),
        renames: manifest
            .as_ref()
            .map(|m| m.renames.len().to_string())
            .unwrap_or_else(unknown),
        built: manifest
            .as_ref()
            .map(|m| m.built_at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(unknown),
    }
}

pub fn run_list(matches: &ArgMatches) -> Result<()> {
    let location = resolve_location(matches);
    let databases = list_databases(&location)?;

    if databases.is_empty() {
        println!("No germline databases in {}", location.display());
        return Ok(());
    }

    let rows: Vec<DatabaseRow> = databases.iter().map(database_row).collect();
    let n = rows.len();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
    println!("Number of databases: {}", n);

    Ok(())
}
