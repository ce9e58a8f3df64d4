use std::path::PathBuf;

use rstest::*;
use tempfile::{TempDir, tempdir};

use germdb_build::{
    BuildError, BuildReport, DatabaseBuilder, DatabaseLayout, DatabaseManifest, list_databases,
    validate_database,
};
use germdb_core::{Segment, Species, parse_imgt_records, read_fasta};
use germdb_merge::{DatabaseConfig, RenameCause};

#[fixture]
fn path_to_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../tests/data/imgt")
}

fn vrc01mouse_builder(path_to_data: &PathBuf, location: &TempDir) -> DatabaseBuilder {
    DatabaseBuilder::new()
        .with_location(location.path().to_path_buf())
        .with_config(DatabaseConfig::preset("vrc01mouse").unwrap().unwrap())
        .with_segment_file(Segment::V, path_to_data.join("vrc01mouse_v.fasta"))
        .with_segment_file(Segment::V, path_to_data.join("vrc01_human_v.fasta"))
        .with_segment_file(Segment::D, path_to_data.join("vrc01mouse_d.fasta"))
        .with_segment_file(Segment::J, path_to_data.join("vrc01mouse_j.fasta"))
}

mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[rstest]
    fn test_build_vrc01mouse(path_to_data: PathBuf) {
        let location = tempdir().unwrap();
        let db = vrc01mouse_builder(&path_to_data, &location).finish().unwrap();
        let report: BuildReport = db.build().unwrap();

        assert_eq!(report.root, location.path().join("vrc01mouse"));
        assert_eq!(report.counts.total(), 12);
        assert_eq!(report.filtered_out, 4);
        assert!(report.validation.is_valid());
        assert_eq!(report.segments.len(), 3);
        assert!(report.segments.iter().all(|s| s.blast.is_none()));

        let layout = db.layout();
        let ungapped: Vec<String> = read_fasta(layout.ungapped_fasta(Segment::J))
            .unwrap()
            .iter()
            .map(|r| r.header.clone())
            .collect();
        // same order as the gapped file, which is sorted by IMGT header
        assert_eq!(
            ungapped,
            vec!["IGHJ2*09", "IGHJ1*01", "IGHJ2*01", "IGHJ3*01", "IGKJ1*01"]
        );

        // gapped files keep full IMGT headers and are sorted
        let gapped = parse_imgt_records(layout.gapped_fasta(Segment::J)).unwrap();
        assert_eq!(gapped[0].name.to_string(), "IGHJ2*09");
        assert_eq!(gapped[0].species, Species::HomoSapiens);
        assert_eq!(gapped[0].accession(), "J00256");

        // IMGT gaps are removed from the ungapped V sequences
        let ungapped_v = read_fasta(layout.ungapped_fasta(Segment::V)).unwrap();
        assert!(ungapped_v.iter().all(|r| !r.sequence.contains('.')));
        assert_eq!(ungapped_v.len(), 4);
    }

    #[rstest]
    fn test_manifest_is_written(path_to_data: PathBuf) {
        let location = tempdir().unwrap();
        let db = vrc01mouse_builder(&path_to_data, &location).finish().unwrap();
        db.build().unwrap();

        let manifest = DatabaseManifest::from_json(&db.layout().manifest_json()).unwrap();
        assert_eq!(manifest.config.name, "vrc01mouse");
        assert_eq!(manifest.inputs.len(), 4);
        assert_eq!(manifest.renames.len(), 1);
        assert_eq!(manifest.renames[0].cause, RenameCause::Override);
        assert_eq!(manifest.renames[0].to.to_string(), "IGHJ2*09");

        let text = std::fs::read_to_string(db.layout().manifest_text()).unwrap();
        assert!(text.contains("Snapshot:  January 7, 2017"));
        assert!(text.contains("IGHJ2*01 was renamed to IGHJ2*09"));
    }

    #[rstest]
    fn test_built_database_validates(path_to_data: PathBuf) {
        let location = tempdir().unwrap();
        let db = vrc01mouse_builder(&path_to_data, &location).finish().unwrap();
        db.build().unwrap();

        let layout = DatabaseLayout::open(&location.path().join("vrc01mouse")).unwrap();
        let report = validate_database(&layout, db.config()).unwrap();
        assert_eq!(report.violations, vec![]);
        assert_eq!(report.records_checked, 12);
    }

    #[rstest]
    fn test_rebuild_needs_force(path_to_data: PathBuf) {
        let location = tempdir().unwrap();
        vrc01mouse_builder(&path_to_data, &location)
            .finish()
            .unwrap()
            .build()
            .unwrap();

        let again = vrc01mouse_builder(&path_to_data, &location)
            .finish()
            .unwrap()
            .build();
        assert!(matches!(again, Err(BuildError::DatabaseExists(_))));

        let forced = vrc01mouse_builder(&path_to_data, &location)
            .force(true)
            .finish()
            .unwrap()
            .build();
        assert!(forced.is_ok());

        let names: Vec<String> = list_databases(location.path())
            .unwrap()
            .iter()
            .map(|l| l.name())
            .collect();
        assert_eq!(names, vec!["vrc01mouse"]);
    }

    #[rstest]
    fn test_plain_mouse_build(path_to_data: PathBuf) {
        let location = tempdir().unwrap();
        let db = DatabaseBuilder::new()
            .with_location(location.path().to_path_buf())
            .with_config(DatabaseConfig::plain("mouse", Some(Species::MusMusculus)))
            .with_segment_file(Segment::J, path_to_data.join("vrc01mouse_j.fasta"))
            .finish()
            .unwrap();
        let report = db.build().unwrap();

        // human records are not part of a plain mouse database
        assert_eq!(report.counts.total(), 4);
        assert_eq!(report.counts.get(Segment::J, &Species::HomoSapiens), 0);
        assert!(report.renames.is_empty());
        assert_eq!(db.layout().segments(), vec![Segment::J]);
    }
}
