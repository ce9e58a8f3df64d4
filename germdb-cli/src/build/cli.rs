use clap::{Arg, ArgAction, ArgGroup, Command, arg};

use crate::common::{CONFIG_ARG, JSON_ARG, LOCATION_ARG};

pub const BUILD_CMD: &str = "build";

pub const VARIABLE_ARG: &str = "variable";
pub const DIVERSITY_ARG: &str = "diversity";
pub const JOINING_ARG: &str = "joining";
pub const SPECIES_ARG: &str = "species";
pub const MAKEBLASTDB_ARG: &str = "makeblastdb";
pub const FORCE_ARG: &str = "force";

pub fn create_build_cli() -> Command {
    Command::new(BUILD_CMD)
        .about("Build a germline database from IMGT/GENE-DB FASTA files")
        .arg_required_else_help(true)
        .arg(
            Arg::new(VARIABLE_ARG)
                .short('v')
                .long("variable")
                .action(ArgAction::Append)
                .help("IMGT-gapped FASTA file of V genes; may be repeated"),
        )
        .arg(
            Arg::new(DIVERSITY_ARG)
                .short('d')
                .long("diversity")
                .action(ArgAction::Append)
                .help("IMGT-gapped FASTA file of D genes; may be repeated"),
        )
        .arg(
            Arg::new(JOINING_ARG)
                .short('j')
                .long("joining")
                .action(ArgAction::Append)
                .help("IMGT-gapped FASTA file of J genes; may be repeated"),
        )
        .group(
            ArgGroup::new("inputs")
                .args([VARIABLE_ARG, DIVERSITY_ARG, JOINING_ARG])
                .multiple(true)
                .required(true),
        )
        .arg(
            arg!(-s --species <species> "Database name. A preset of this name is used when no config is given; otherwise the name is read as the species to keep")
                .required(true),
        )
        .arg(arg!(-c --config <config> "TOML database configuration").id(CONFIG_ARG))
        .arg(arg!(-l --location <location> "Folder that holds the databases (default: $GERMDB_HOME or ~/.germdb)").id(LOCATION_ARG))
        .arg(arg!(--makeblastdb <makeblastdb> "makeblastdb binary; BLAST databases are only built when given or set in $GERMDB_MAKEBLASTDB"))
        .arg(arg!(--force "Overwrite an existing database of the same name"))
        .arg(arg!(--json "Print the build report as JSON").id(JSON_ARG))
}
