//! End-to-end extraction over multi-page text dumps.

use admission_extractor::error::BoxError;
use admission_extractor::export;
use admission_extractor::source::{PageSource, TextDump};
use admission_extractor::{Config, ExtractError, ResultExtractor};

const DUMP: &str = "UNIVERSIDAD NACIONAL\n\
EXAMEN DE ADMISIÓN 2016 - II\n\
MODALIDAD: ORDINARIA\n\
CARRERA PROFESIONAL: 05 ENFERMERIA\n\
N° DNI APELLIDOS Y NOMBRES PUNTAJE CONDICION\n\
1 12345678 PEREZ GARCIA JUAN A 01 02 B 1450 INGRESO\n\
2 23456789 QUISPE MAMANI, ROSA C 10 03 M 12,345 NO INGRESO\n\
3 70123456 TORRES DIAZ LUIS AUSENTE\n\
Página 1 de 2\n\
\x0C\
ESCUELA: OBSTETRICIA\n\
4 95,250 41234567 ROJAS VEGA ANA 10 2 INGRESO\n\
5 51234567 SALAS RIOS PEDRO 0.000 ANULADO\n\
6 61234567 LOPEZ CHAVEZ MARIA 88,75 NO INGRESO\n\
7 71234567 HUAMAN CCORI JOSE 90 INGRESO\n\
Página 2 de 2\n\
\x0C";

#[test]
fn test_document_records_in_order() {
    let source = TextDump::new(DUMP);
    assert_eq!(source.page_count(), 2);

    let document = ResultExtractor::new()
        .process_document(&source, None::<fn(usize, usize, usize)>)
        .unwrap();

    assert_eq!(document.year, "2016");
    assert_eq!(document.period, "II");

    let ids: Vec<&str> = document.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["12345678", "23456789", "70123456", "41234567", "51234567", "61234567", "71234567"]
    );

    let sequences: Vec<u32> = document.records.iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, (1..=7).collect::<Vec<u32>>());

    let first = &document.records[0];
    assert_eq!(first.name, "Perez Garcia Juan");
    assert_eq!(first.modality, "ORDINARIA");
    assert_eq!(first.program, "ENFERMERIA");

    assert_eq!(document.records[1].score, "12.345");
    assert_eq!(document.records[1].status, "NO INGRESO");
    assert_eq!(document.records[2].score, "");
    assert_eq!(document.records[2].status, "AUSENTE");

    let second_page = &document.records[3];
    assert_eq!(second_page.program, "OBSTETRICIA");
    assert_eq!(second_page.modality, "");
    assert_eq!(second_page.year, "2016");
    assert_eq!(second_page.score, "95.250");

    assert_eq!(document.records[4].score, "0.000");
    assert_eq!(document.records[4].status, "ANULADO");
    assert_eq!(document.records[5].score, "88.75");
    assert_eq!(document.records[6].score, "90");
}

#[test]
fn test_document_exports_to_csv() {
    let document = ResultExtractor::new()
        .process_document(&TextDump::new(DUMP), None::<fn(usize, usize, usize)>)
        .unwrap();

    let mut buffer = Vec::new();
    export::write_csv(&document.records, &Config::default(), &mut buffer).unwrap();
    let csv = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 8);
    assert!(lines[0].ends_with("MODALIDAD,CARRERA,FACULTAD,AREA"));
    assert_eq!(
        lines[1],
        "12345678,PEREZ GARCIA JUAN,1450,INGRESO,2016,II,ORDINARIA,ENFERMERIA,,"
    );
    assert_eq!(
        export::generate_filename("UNICA", &document.year, &document.period),
        "Resultados-UNICA-2016-II.csv"
    );
}

struct BrokenSource;

impl PageSource for BrokenSource {
    fn page_count(&self) -> usize {
        3
    }

    fn page_text(&self, index: usize) -> Result<Option<String>, BoxError> {
        if index == 0 {
            Ok(Some("1 12345678 PEREZ GARCIA JUAN A 01 02 B 1450 INGRESO".to_string()))
        } else {
            Err("corrupt page stream".into())
        }
    }
}

#[test]
fn test_source_failure_aborts_document() {
    let mut pages_seen = 0;
    let result = ResultExtractor::new()
        .process_document(&BrokenSource, Some(|done, _, _| pages_seen = done));

    match result {
        Err(ExtractError::PdfProcessing { source }) => {
            assert_eq!(source.to_string(), "corrupt page stream");
        }
        other => panic!("expected a processing error, got {:?}", other.map(|d| d.records.len())),
    }
    assert_eq!(pages_seen, 1);
}
