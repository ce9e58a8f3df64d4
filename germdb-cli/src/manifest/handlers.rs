use anyhow::{Context, Result};
use clap::ArgMatches;

use germdb_build::DatabaseManifest;

use crate::common::{JSON_ARG, open_database};

pub fn run_manifest(matches: &ArgMatches) -> Result<()> {
    let layout = open_database(matches)?;
    let manifest = DatabaseManifest::from_json(&layout.manifest_json())
        .with_context(|| format!("No readable manifest in {}", layout.root().display()))?;

    if matches.get_flag(JSON_ARG) {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    } else {
        print!("{}", manifest.render_text());
    }

    Ok(())
}
