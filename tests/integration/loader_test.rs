use curricula::schema::{CODE, DEPARTMENT, MASTER, NAME, SPECIALIZATION, TRACK};
use curricula::utils::arrow::{column_names, string_column};
use curricula::{
    CurriculumError, MasterLoader, MicrocredentialLoader, Result, SourceKind, SourceLoader,
    SpecializationLoader,
};

use crate::utils::{Fixture, MASTER_HEADERS, SPECIALIZATION_HEADERS};

fn values(batch: &curricula::RecordBatch, column: &str) -> Vec<Option<String>> {
    string_column(batch, column)
        .expect("string column")
        .map(|a| a.iter().map(|v| v.map(str::to_string)).collect())
        .unwrap_or_default()
}

#[test]
fn master_rows_carry_file_metadata() -> Result<()> {
    let fixture = Fixture::standard();
    let loader = MasterLoader::from_config(&fixture.config());
    assert_eq!(loader.kind(), SourceKind::Master);

    let table = loader.load()?;
    assert_eq!(
        &column_names(&table)[..5],
        [CODE, NAME, DEPARTMENT, MASTER, TRACK]
    );
    assert_eq!(
        values(&table, DEPARTMENT),
        [Some("DETI"), Some("DETI"), Some("DETI"), Some("DETI"), Some("DMat")]
            .map(|d| d.map(str::to_string))
    );
    assert_eq!(
        values(&table, TRACK),
        [
            Some("Percurso_Redes"),
            Some("Percurso_Redes"),
            Some("Sistemas"),
            Some("Sistemas"),
            None
        ]
        .map(|d| d.map(str::to_string))
    );
    // Names keep their source case until merge
    assert_eq!(values(&table, NAME)[4].as_deref(), Some("cálculo i"));
    Ok(())
}

#[test]
fn master_loader_skips_lock_and_hidden_files() -> Result<()> {
    let fixture = Fixture::standard();
    fixture.write_bytes("MSC/DETI/~$PlanoEstudo8240_Informatica.xlsx", b"lock");
    fixture.write_bytes("MSC/DETI/.DS_Store", b"");
    fixture.write_bytes("MSC/DETI/notes.txt", b"not a plan");

    let table = MasterLoader::from_config(&fixture.config()).load()?;
    assert_eq!(table.num_rows(), 5);
    Ok(())
}

#[test]
fn master_file_without_code_column_is_rejected() {
    let fixture = Fixture::standard();
    fixture.write_csv(
        "MSC/DMat/PlanoEstudo9400_Estatistica.csv",
        &["CODIGO", "NOMEDISCIPLINA", "NOMEDISCIPLINAGENERICA"],
        &[&["1", "Estatística", "Estatística"]],
    );

    let err = MasterLoader::from_config(&fixture.config())
        .load()
        .unwrap_err();
    assert!(matches!(
        err,
        CurriculumError::MissingColumn { ref column, .. } if column == "CODDISCIPLINACOD"
    ));
}

#[test]
fn missing_code_is_reported_with_row() {
    let fixture = Fixture::standard();
    fixture.write_csv(
        "MSC/DMat/PlanoEstudo9400_Estatistica.csv",
        &MASTER_HEADERS,
        &[
            &["1", "Estatística", "Estatística", "6"],
            &["", "Probabilidades", "Probabilidades", "6"],
        ],
    );

    let err = MasterLoader::from_config(&fixture.config())
        .load()
        .unwrap_err();
    assert!(matches!(err, CurriculumError::MissingValue { row: 2, .. }));
}

#[test]
fn free_elective_without_code_is_dropped_before_the_code_check() -> Result<()> {
    let fixture = Fixture::standard();
    fixture.write_csv(
        "MSC/DMat/PlanoEstudo9400_Estatistica.csv",
        &MASTER_HEADERS,
        &[
            &["1", "Estatística", "Estatística", "6"],
            &["", "Opção", "Opção Livre", "6"],
        ],
    );

    let table = MasterLoader::from_config(&fixture.config()).load()?;
    assert_eq!(table.num_rows(), 6);
    Ok(())
}

#[test]
fn specialization_fan_out_keeps_course_rows_together() -> Result<()> {
    let fixture = Fixture::standard();
    fixture.write_csv(
        "CE/DEGEIT_DEGEIT_DETI_6001_Gestao de Projetos.csv",
        &SPECIALIZATION_HEADERS,
        &[&["50000", "Gestão", "6"], &["50001", "Liderança", "6"]],
    );
    let loader = SpecializationLoader::from_config(&fixture.config());
    let table = loader.load()?;

    assert_eq!(
        &column_names(&table)[..4],
        [CODE, NAME, SPECIALIZATION, DEPARTMENT]
    );
    let departments = values(&table, DEPARTMENT);
    let departments: Vec<_> = departments.iter().map(|d| d.as_deref()).collect();
    assert_eq!(
        departments,
        [
            Some("DEGEIT"),
            Some("DEGEIT"),
            Some("DETI"),
            Some("DETI"),
            Some("DETI"),
            Some("DMat")
        ]
    );
    let courses = values(&table, SPECIALIZATION);
    assert_eq!(courses[0].as_deref(), Some("6001_Gestao de Projetos"));
    assert_eq!(courses[4].as_deref(), Some("5012_Ciencia de Dados"));
    Ok(())
}

#[test]
fn missing_microcredential_file_is_an_io_error() {
    let fixture = Fixture::empty();
    let loader = MicrocredentialLoader::from_config(&fixture.config());
    assert!(loader.load().is_err());
}

#[test]
fn missing_master_folder_is_an_error() {
    let fixture = Fixture::empty();
    fixture.create_dir("CE");
    assert!(MasterLoader::from_config(&fixture.config()).load().is_err());
    let err = SpecializationLoader::from_config(&fixture.config())
        .load()
        .unwrap_err();
    assert!(matches!(err, CurriculumError::EmptySource { .. }));
}
