//! CSV export of extracted records.

use crate::models::{Config, Record};
use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref LEADING_CODE_RE: Regex = Regex::new(r"^\d+\s+").unwrap();
    static ref LABEL_PREFIX_RE: Regex = Regex::new(r"^.*?:\s*").unwrap();
}

const BASE_HEADERS: [&str; 6] = [
    "DNI",
    "APELLIDOS Y NOMBRES",
    "PUNTAJE",
    "CONDICION",
    "AÑO",
    "PERIODO",
];

/// `Resultados-<ORG>-<year>-<period>.csv`, with placeholders for unknown parts.
pub fn generate_filename(organization: &str, year: &str, period: &str) -> String {
    format!(
        "Resultados-{}-{}-{}.csv",
        organization,
        if year.is_empty() { "SIN_ANIO" } else { year },
        if period.is_empty() { "X" } else { period }
    )
}

fn normalize_modality(modality: &str, config: &Config) -> String {
    if modality.is_empty() {
        return config.default_modality.clone();
    }
    let modality = LEADING_CODE_RE.replace(modality, "").into_owned();
    config
        .modality_synonyms
        .get(&modality)
        .cloned()
        .unwrap_or(modality)
}

fn normalize_program(program: &str, config: &Config) -> String {
    let program = LABEL_PREFIX_RE.replace(program, "").trim().to_string();
    if program.is_empty() {
        return program;
    }
    config.programs.get(&program).cloned().unwrap_or(program)
}

/// Writes records as CSV in sequence order.
///
/// MODALIDAD and CARRERA columns only appear when some record has a value for
/// them; FACULTAD and AREA come with CARRERA.
pub fn write_csv<W: Write>(records: &[Record], config: &Config, writer: W) -> Result<()> {
    if records.is_empty() {
        bail!("No records to export");
    }

    let with_modality = records.iter().any(|r| !r.modality.is_empty());
    let with_program = records.iter().any(|r| !r.program.is_empty());

    let mut headers: Vec<&str> = BASE_HEADERS.to_vec();
    if with_modality {
        headers.push("MODALIDAD");
    }
    if with_program {
        headers.extend(["CARRERA", "FACULTAD", "AREA"]);
    }

    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by_key(|r| r.sequence);

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&headers)?;

    for record in sorted {
        let period = if record.period.is_empty() {
            config.default_period.clone()
        } else {
            record.period.clone()
        };

        let mut row = vec![
            record.id.trim().to_string(),
            record.name.trim().to_uppercase(),
            record.score.clone(),
            record.status.clone(),
            record.year.clone(),
            period,
        ];

        if with_modality {
            row.push(normalize_modality(&record.modality, config));
        }

        if with_program {
            let program = normalize_program(&record.program, config);
            let faculty = config
                .faculties
                .get(&program)
                .cloned()
                .unwrap_or_else(|| record.faculty.clone());
            let area = config.areas.get(&program).cloned().unwrap_or_default();
            row.extend([program, faculty, area]);
        }

        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the CSV file into `output_dir` and returns its path.
pub fn export_to_file(
    records: &[Record],
    config: &Config,
    output_dir: &str,
    year: &str,
    period: &str,
) -> Result<PathBuf> {
    if records.is_empty() {
        bail!("No records to export");
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    let path = Path::new(output_dir).join(generate_filename(&config.organization, year, period));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    write_csv(records, config, file)?;
    Ok(path)
}
