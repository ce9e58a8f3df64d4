use clap::{Arg, ArgAction, Command, arg};

use crate::common::{CONFIG_ARG, JSON_ARG};

pub const MERGE_CMD: &str = "merge";

pub const INPUTS_ARG: &str = "inputs";
pub const OUTPUT_ARG: &str = "output";
pub const UNGAPPED_ARG: &str = "ungapped";

pub fn create_merge_cli() -> Command {
    Command::new(MERGE_CMD)
        .about("Merge IMGT FASTA files into one set with unique gene names, without building a database")
        .arg_required_else_help(true)
        .arg(arg!(-c --config <config> "TOML database configuration").id(CONFIG_ARG).required(true))
        .arg(arg!(-o --output <output> "FASTA file to write the merged records to").required(true))
        .arg(arg!(--ungapped "Write ungapped sequences headed by the gene name only"))
        .arg(arg!(--json "Print the renames as JSON").id(JSON_ARG))
        .arg(
            Arg::new(INPUTS_ARG)
                .action(ArgAction::Append)
                .required(true)
                .help("IMGT/GENE-DB FASTA files"),
        )
}
