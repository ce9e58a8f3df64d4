use clap::{Command, arg};

use crate::common::{DB_ARG, JSON_ARG, LOCATION_ARG};

pub const MANIFEST_CMD: &str = "manifest";

pub fn create_manifest_cli() -> Command {
    Command::new(MANIFEST_CMD)
        .about("Show where a database came from and which genes were renamed")
        .arg_required_else_help(true)
        .arg(arg!(--db <db> "Database directory, or the name of a database under the location").id(DB_ARG).required(true))
        .arg(arg!(-l --location <location> "Folder that holds the databases").id(LOCATION_ARG))
        .arg(arg!(--json "Print the manifest as JSON").id(JSON_ARG))
}
