use clap::{Command, arg};

use crate::common::{CONFIG_ARG, DB_ARG, JSON_ARG, LOCATION_ARG};

pub const VALIDATE_CMD: &str = "validate";

pub fn create_validate_cli() -> Command {
    Command::new(VALIDATE_CMD)
        .about("Check a built database for duplicate names, missing donor genes and unapplied renames")
        .arg_required_else_help(true)
        .arg(arg!(--db <db> "Database directory, or the name of a database under the location").id(DB_ARG).required(true))
        .arg(arg!(-c --config <config> "TOML database configuration (default: the one stored in the manifest)").id(CONFIG_ARG))
        .arg(arg!(-l --location <location> "Folder that holds the databases").id(LOCATION_ARG))
        .arg(arg!(--json "Print the validation report as JSON").id(JSON_ARG))
}
