mod build;
mod common;
mod list;
mod manifest;
mod merge;
mod validate;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "germdb";

    pub const DEBUG_ARG: &str = "debug";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Build and inspect germline antibody gene databases for VDJ assignment.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::DEBUG_ARG)
                .short('D')
                .long("debug")
                .action(ArgAction::Count)
                .global(true)
                .help("More log output (-D info, -DD debug, -DDD trace)"),
        )
        .subcommand(build::cli::create_build_cli())
        .subcommand(merge::cli::create_merge_cli())
        .subcommand(validate::cli::create_validate_cli())
        .subcommand(manifest::cli::create_manifest_cli())
        .subcommand(list::cli::create_list_cli())
}

/// Log filter for a number of `-D` flags. `RUST_LOG` takes precedence.
fn log_directive(debug: u8) -> &'static str {
    match debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(debug: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(debug)));
    // library crates log through `log`; the subscriber picks those records up
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_count(consts::DEBUG_ARG));

    match matches.subcommand() {
        //
        // BUILD
        //
        Some((build::cli::BUILD_CMD, matches)) => {
            build::handlers::run_build(matches)?;
        }

        //
        // MERGE
        //
        Some((merge::cli::MERGE_CMD, matches)) => {
            merge::handlers::run_merge(matches)?;
        }

        //
        // VALIDATE
        //
        Some((validate::cli::VALIDATE_CMD, matches)) => {
            validate::handlers::run_validate(matches)?;
        }

        //
        // MANIFEST
        //
        Some((manifest::cli::MANIFEST_CMD, matches)) => {
            manifest::handlers::run_manifest(matches)?;
        }

        //
        // LIST
        //
        Some((list::cli::LIST_CMD, matches)) => {
            list::handlers::run_list(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    #[case(0, "warn")]
    #[case(1, "info")]
    #[case(2, "debug")]
    #[case(5, "trace")]
    fn test_log_directive(#[case] debug: u8, #[case] expected: &str) {
        assert_eq!(log_directive(debug), expected);
    }

    #[rstest]
    fn test_debug_flag_is_global() {
        let matches = build_parser()
            .try_get_matches_from(["germdb", "list", "-DD"])
            .unwrap();
        assert_eq!(matches.get_count(consts::DEBUG_ARG), 2);
    }
}
