use std::fs::{create_dir_all, read_dir, remove_dir_all};
use std::path::{Path, PathBuf};

use log::info;

use germdb_core::Segment;

use crate::consts::{
    BLAST_LOG_EXT, BLAST_SUBFOLDER, FASTA_EXT, GAPPED_SUBFOLDER, MANIFEST_JSON, MANIFEST_TEXT,
    UNGAPPED_SUBFOLDER,
};
use crate::errors::BuildError;

///
/// Paths of one germline database on disk. Database directory names are
/// lowercase, so `Human` and `human` are the same database.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseLayout {
    root: PathBuf,
}

impl DatabaseLayout {
    pub fn new(location: &Path, name: &str) -> DatabaseLayout {
        DatabaseLayout {
            root: location.join(name.to_lowercase()),
        }
    }

    /// Use an existing database directory.
    pub fn open(root: &Path) -> Result<DatabaseLayout, BuildError> {
        let layout = DatabaseLayout {
            root: root.to_path_buf(),
        };
        if !layout.exists() {
            return Err(BuildError::DatabaseNotFound(root.to_path_buf()));
        }
        Ok(layout)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn gapped_dir(&self) -> PathBuf {
        self.root.join(GAPPED_SUBFOLDER)
    }

    pub fn ungapped_dir(&self) -> PathBuf {
        self.root.join(UNGAPPED_SUBFOLDER)
    }

    pub fn blast_dir(&self) -> PathBuf {
        self.root.join(BLAST_SUBFOLDER)
    }

    pub fn gapped_fasta(&self, segment: Segment) -> PathBuf {
        self.gapped_dir()
            .join(format!("{}.{}", segment.file_stem(), FASTA_EXT))
    }

    pub fn ungapped_fasta(&self, segment: Segment) -> PathBuf {
        self.ungapped_dir()
            .join(format!("{}.{}", segment.file_stem(), FASTA_EXT))
    }

    /// Output prefix passed to makeblastdb.
    pub fn blast_prefix(&self, segment: Segment) -> PathBuf {
        self.blast_dir().join(segment.file_stem())
    }

    pub fn blast_log(&self, segment: Segment) -> PathBuf {
        self.blast_dir()
            .join(format!("{}.{}", segment.file_stem(), BLAST_LOG_EXT))
    }

    pub fn manifest_json(&self) -> PathBuf {
        self.root.join(MANIFEST_JSON)
    }

    pub fn manifest_text(&self) -> PathBuf {
        self.root.join(MANIFEST_TEXT)
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Segments that have a gapped FASTA file.
    pub fn segments(&self) -> Vec<Segment> {
        Segment::ALL
            .into_iter()
            .filter(|s| self.gapped_fasta(*s).is_file())
            .collect()
    }

    ///
    /// Create the database directories. An existing database is only
    /// replaced when `force` is set; its sequence directories are emptied.
    ///
    pub fn prepare(&self, force: bool) -> Result<(), BuildError> {
        if self.exists() {
            if !force {
                return Err(BuildError::DatabaseExists(self.root.clone()));
            }
            info!("Overwriting existing database at {}", self.root.display());
        }

        create_dir_all(&self.root)?;
        for dir in [self.gapped_dir(), self.ungapped_dir(), self.blast_dir()] {
            if dir.is_dir() {
                remove_dir_all(&dir)?;
            }
            create_dir_all(&dir)?;
        }

        Ok(())
    }
}

///
/// Databases found directly under a location: any subdirectory holding an
/// `imgt_gapped` folder or a manifest.
///
pub fn list_databases(location: &Path) -> Result<Vec<DatabaseLayout>, BuildError> {
    if !location.is_dir() {
        return Ok(Vec::new());
    }

    let mut layouts = Vec::new();
    for entry in read_dir(location)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let layout = DatabaseLayout { root: path };
        if layout.gapped_dir().is_dir() || layout.manifest_json().is_file() {
            layouts.push(layout);
        }
    }
    layouts.sort_by(|a, b| a.root.cmp(&b.root));

    Ok(layouts)
}
