use std::env;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use dirs::home_dir;
use flate2::read::MultiGzDecoder;

use crate::consts::{DEFAULT_DB_FOLDER, GERMDB_HOME_ENV};
use crate::errors::GermdbError;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>, GermdbError> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).map_err(|e| {
        GermdbError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open file {}: {}", path.display(), e),
        ))
    })?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Expand `~` and environment variables in a user supplied path.
///
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy().into_owned();
    let expanded = shellexpand::full(&raw)
        .map(|s| s.into_owned())
        .unwrap_or(raw);
    PathBuf::from(expanded)
}

/// Get the default database location from the environment variable, or fall back to
/// a folder in the home directory.
///
/// # Returns
/// - path to the database location
pub fn get_default_db_location() -> PathBuf {
    if let Ok(val) = env::var(GERMDB_HOME_ENV) {
        return expand_path(Path::new(&val));
    }

    let home = env::var("HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(home_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"));

    home.join(DEFAULT_DB_FOLDER)
}
