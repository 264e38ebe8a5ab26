use std::fs;
use std::path::{Path, PathBuf};

use curricula::config::{OutputConfig, ReferenceConfig};
use curricula::reader::read_table;
use curricula::{CanonicalRecord, PipelineConfig, Result};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

pub const MASTER_HEADERS: [&str; 4] = [
    "CODDISCIPLINACOD",
    "NOMEDISCIPLINA",
    "NOMEDISCIPLINAGENERICA",
    "ECTS",
];

pub const SPECIALIZATION_HEADERS: [&str; 3] = ["CODDISCIPLINACOD", "NOMEDISCIPLINA", "ECTS"];

/// A temporary data folder with the standard input layout
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    /// Empty folder with no inputs
    #[must_use]
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Two departments of master plans, one shared specialization course, one
    /// microcredential and a reference table
    #[must_use]
    pub fn standard() -> Self {
        let fixture = Self::empty();
        fixture.write_csv(
            "MSC/DETI/PlanoEstudo8240_Informatica_Ramo_Sistemas.csv",
            &MASTER_HEADERS,
            &[
                &["40337", "Cálculo I", "Cálculo I", "6"],
                &["40400", "Opção Livre", "OPÇÃO LIVRE", "6"],
                &["40337", "Cálculo I", "Cálculo I", "6"],
            ],
        );
        fixture.write_csv(
            "MSC/DETI/PlanoEstudo8240_Informatica_Percurso_Redes.csv",
            &MASTER_HEADERS,
            &[
                &["40500", "Redes Móveis", "Redes Móveis", "6"],
                &["40600", "Opção Condicionada I", "Opções", "6"],
            ],
        );
        fixture.write_csv(
            "MSC/DMat/PlanoEstudo9301_Matematica.csv",
            &MASTER_HEADERS,
            &[&["40337", "cálculo i", "Cálculo I", "6"]],
        );
        fixture.write_csv(
            "CE/DETI_DMat_5012_Ciencia de Dados.csv",
            &SPECIALIZATION_HEADERS,
            &[
                &["41000", "Aprendizagem Automática", "6"],
                &["41001", "opção livre", "6"],
            ],
        );
        fixture.write_csv(
            "Microcredenciais.csv",
            &["CODIGOMICROCREDENCIAL", "Microcredencial", "CODDISCIPLINACOD", "Department"],
            &[&["101", "Python Basics", "42000", "deti"]],
        );
        fixture.write_csv(
            "links.csv",
            &["CodigoPACO", "Url"],
            &[
                &["40337", "https://paco.example.org/40337"],
                &["41000", "https://paco.example.org/41000"],
                &["99999", "https://paco.example.org/99999"],
            ],
        );
        fixture
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Configuration pointing at this fixture, writing CSV output
    #[must_use]
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig {
            master_dir: self.path("MSC"),
            specialization_dir: self.path("CE"),
            microcredential_file: self.path("Microcredenciais.csv"),
            reference: ReferenceConfig {
                path: self.path("links.csv"),
                ..ReferenceConfig::default()
            },
            output: OutputConfig {
                path: self.path("out/UC_all.csv"),
                intermediate_dir: None,
            },
            ..PipelineConfig::default()
        }
    }

    /// Write a CSV file below the fixture root, creating folders as needed
    pub fn write_csv(&self, relative: &str, headers: &[&str], rows: &[&[&str]]) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture folder");
        }
        let mut writer = csv::Writer::from_path(&path).expect("Failed to create fixture file");
        writer.write_record(headers).expect("Failed to write header");
        for row in rows {
            writer.write_record(*row).expect("Failed to write row");
        }
        writer.flush().expect("Failed to flush fixture file");
        path
    }

    /// Write a single-sheet workbook below the fixture root
    ///
    /// Cells that parse as numbers are stored as numeric cells, the way
    /// spreadsheet tools store discipline codes.
    pub fn write_xlsx(&self, relative: &str, headers: &[&str], rows: &[&[&str]]) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture folder");
        }
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in headers.iter().enumerate() {
            sheet
                .write_string(0, col as u16, *header)
                .expect("Failed to write header");
        }
        for (row, cells) in rows.iter().enumerate() {
            let row = row as u32 + 1;
            for (col, cell) in cells.iter().enumerate() {
                let col = col as u16;
                if cell.is_empty() {
                    continue;
                }
                let written = match cell.parse::<f64>() {
                    Ok(number) => sheet.write_number(row, col, number),
                    Err(_) => sheet.write_string(row, col, *cell),
                };
                written.expect("Failed to write cell");
            }
        }
        workbook.save(&path).expect("Failed to save fixture workbook");
        path
    }

    /// Write raw bytes below the fixture root
    pub fn write_bytes(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture folder");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Create an empty folder below the fixture root
    pub fn create_dir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).expect("Failed to create fixture folder");
        path
    }
}

/// Read a written artifact back as canonical records
pub fn read_records(path: &Path) -> Result<Vec<CanonicalRecord>> {
    let table = read_table(path)?;
    CanonicalRecord::from_batch(&table)
}

/// Find the records of one discipline code
#[must_use]
pub fn records_for<'a>(records: &'a [CanonicalRecord], code: &str) -> Vec<&'a CanonicalRecord> {
    records
        .iter()
        .filter(|r| r.discipline_code == code)
        .collect()
}
