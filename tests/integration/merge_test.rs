use curricula::config::ReferenceConfig;
use curricula::filter::FREE_ELECTIVE_MARKER;
use curricula::merge::{MergeOptions, ReferenceLinks, merge_sources};
use curricula::pipeline::load_sources;
use curricula::{CanonicalRecord, CurriculumError, PipelineConfig, Result};

use crate::utils::{Fixture, read_records, records_for};

#[test]
fn identical_reference_duplicates_can_be_collapsed() -> Result<()> {
    let fixture = Fixture::empty();
    let path = fixture.write_csv(
        "links.csv",
        &["CodigoPACO", "Url", "Titulo"],
        &[
            &["40337", "https://a", "Cálculo I"],
            &["40337", "https://a", "Cálculo I (2023)"],
            &["", "https://orphan", ""],
        ],
    );

    let strict = ReferenceConfig {
        path: path.clone(),
        ..ReferenceConfig::default()
    };
    assert!(matches!(
        ReferenceLinks::load(&strict),
        Err(CurriculumError::DuplicateReferenceKey { count: 2, .. })
    ));

    let lenient = ReferenceConfig {
        path,
        collapse_identical_duplicates: true,
        ..ReferenceConfig::default()
    };
    let links = ReferenceLinks::load(&lenient)?;
    assert_eq!(links.len(), 1);
    assert_eq!(links.get("40337"), Some("https://a"));
    Ok(())
}

#[test]
fn reference_without_url_column_is_rejected() {
    let fixture = Fixture::empty();
    let path = fixture.write_csv("links.csv", &["CodigoPACO", "Link"], &[&["1", "x"]]);

    let config = ReferenceConfig {
        path,
        ..ReferenceConfig::default()
    };
    assert!(matches!(
        ReferenceLinks::load(&config),
        Err(CurriculumError::MissingColumn { ref column, .. }) if column == "Url"
    ));
}

#[test]
fn merge_marker_is_configurable() -> Result<()> {
    let fixture = Fixture::standard();
    let config = fixture.config();
    let links = ReferenceLinks::load(&config.reference)?;
    let tables: Vec<_> = load_sources(&config)?.into_iter().map(|(_, t)| t).collect();

    let options = MergeOptions {
        exclusion_marker: FREE_ELECTIVE_MARKER.to_string(),
        ..MergeOptions::from(&config)
    };
    let (merged, report) = merge_sources(&tables, &links, &options)?;
    assert_eq!(report.excluded_rows, 0);

    let records = CanonicalRecord::from_batch(&merged)?;
    let optional = records_for(&records, "40600");
    assert_eq!(optional.len(), 1);
    assert_eq!(
        optional[0].discipline_name.as_deref(),
        Some("OPÇÃO CONDICIONADA I")
    );
    Ok(())
}

#[test]
fn configuration_file_drives_a_run() -> Result<()> {
    let fixture = Fixture::standard();
    let root = fixture.root().display().to_string().replace('\\', "/");
    let json = format!(
        r#"{{
            "master_dir": "{root}/MSC",
            "specialization_dir": "{root}/CE",
            "microcredential_file": "{root}/Microcredenciais.csv",
            "reference": {{ "path": "{root}/links.csv" }},
            "output": {{ "path": "{root}/final.csv" }},
            "parallel": false
        }}"#
    );
    let config_path = fixture.root().join("curricula.json");
    std::fs::write(&config_path, json).expect("config written");

    let config = PipelineConfig::from_file(&config_path)?;
    assert!(!config.parallel);
    curricula::run(&config)?;

    let records = read_records(&fixture.path("final.csv"))?;
    assert_eq!(records.len(), 6);
    Ok(())
}
