use clap::{Command, arg};

use crate::common::LOCATION_ARG;

pub const LIST_CMD: &str = "list";

pub fn create_list_cli() -> Command {
    Command::new(LIST_CMD)
        .about("List the germline databases under a location")
        .arg(arg!(-l --location <location> "Folder that holds the databases (default: $GERMDB_HOME or ~/.germdb)").id(LOCATION_ARG))
}
