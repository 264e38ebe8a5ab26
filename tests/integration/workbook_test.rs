use curricula::reader::read_table;
use curricula::schema::CODE;
use curricula::utils::arrow::{column_names, string_column};
use curricula::{CanonicalRecord, MasterLoader, Result, SourceLoader};

use crate::utils::{Fixture, MASTER_HEADERS, read_records, records_for};

fn texts(batch: &curricula::RecordBatch, column: &str) -> Vec<Option<String>> {
    string_column(batch, column)
        .expect("string column")
        .map(|a| a.iter().map(|v| v.map(str::to_string)).collect())
        .unwrap_or_default()
}

#[test]
fn workbook_header_comes_from_first_row() -> Result<()> {
    let fixture = Fixture::empty();
    let path = fixture.write_xlsx(
        "plan.xlsx",
        &["CODDISCIPLINACOD", "NOMEDISCIPLINA", "ECTS"],
        &[&["40337", "Cálculo I", "6"], &["40450", "Física I", "7.5"]],
    );

    let table = read_table(&path)?;
    assert_eq!(column_names(&table), ["CODDISCIPLINACOD", "NOMEDISCIPLINA", "ECTS"]);
    assert_eq!(table.num_rows(), 2);
    // Numeric cells keep no fractional part unless they have one
    assert_eq!(
        texts(&table, CODE),
        [Some("40337".to_string()), Some("40450".to_string())]
    );
    assert_eq!(
        texts(&table, "ECTS"),
        [Some("6".to_string()), Some("7.5".to_string())]
    );
    Ok(())
}

#[test]
fn numeric_workbook_codes_join_reference_urls() -> Result<()> {
    let fixture = Fixture::standard();
    fixture.write_xlsx(
        "MSC/DMat/PlanoEstudo9400_Estatistica.xlsx",
        &MASTER_HEADERS,
        &[
            &["41500", "Estatística", "Estatística", "6"],
            &["41501", "Opção Livre", "OPÇÃO LIVRE", "6"],
        ],
    );
    fixture.write_xlsx(
        "links.xlsx",
        &["CodigoPACO", "Url"],
        &[
            &["40337", "https://paco.example.org/40337"],
            &["41500", "https://paco.example.org/41500"],
        ],
    );
    let mut config = fixture.config();
    config.reference.path = fixture.path("links.xlsx");

    let master = MasterLoader::from_config(&config).load()?;
    let codes = texts(&master, CODE);
    assert!(codes.contains(&Some("41500".to_string())));
    assert!(!codes.contains(&Some("41501".to_string())));

    let built = curricula::build_table(&config)?;
    let records = CanonicalRecord::from_batch(&built.merged)?;
    let statistics = records_for(&records, "41500");
    assert_eq!(statistics.len(), 1);
    assert_eq!(statistics[0].program_master.as_deref(), Some("9400_Estatistica"));
    assert_eq!(
        statistics[0].resource_url.as_deref(),
        Some("https://paco.example.org/41500")
    );
    assert!(records_for(&records, "40337").iter().all(|r| {
        r.resource_url.as_deref() == Some("https://paco.example.org/40337")
    }));
    Ok(())
}

#[test]
fn workbook_output_reads_back_as_canonical_records() -> Result<()> {
    let fixture = Fixture::standard();
    let mut config = fixture.config();
    config.output.path = fixture.path("out/UC_all.xlsx");

    let summary = curricula::run(&config)?;
    let records = read_records(&config.output.path)?;
    assert_eq!(records.len(), summary.merge.output_rows);

    let table = read_table(&config.output.path)?;
    assert_eq!(column_names(&table), curricula::CANONICAL_COLUMNS);
    Ok(())
}
