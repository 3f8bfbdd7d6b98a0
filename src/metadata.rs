//! Page-level metadata read from header lines.

use crate::models::PageContext;
use crate::patterns::extract_year_period;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MODALITY_RE: Regex = Regex::new(r"^MODALIDAD\s*[:\-]?\s*([^\n]+)").unwrap();
    static ref FACULTY_RE: Regex = Regex::new(r"^FACULTAD\s*[:\-]?\s*([^\n]+)").unwrap();
    static ref CAREER_RE: Regex =
        Regex::new(r"^CARRERA(?: PROFESIONAL)?\s*[:\-]?\s*([^\n]+)").unwrap();
    static ref SCHOOL_RE: Regex =
        Regex::new(r"^ESCUELA\s*[:\-]?\s*(\d{2})?\s*([A-ZÁÉÍÓÚÑ\s\-\.]+)").unwrap();
    static ref LEADING_CODE_RE: Regex = Regex::new(r"^\d+\s*").unwrap();
}

fn capture(regex: &Regex, line: &str, index: usize) -> Option<String> {
    regex
        .captures(line)
        .and_then(|caps| caps.get(index))
        .map(|m| m.as_str().trim().to_uppercase())
}

fn strip_leading_code(value: &str) -> String {
    LEADING_CODE_RE.replace(value, "").trim().to_string()
}

/// `MODALIDAD: ORDINARIA` -> `ORDINARIA`
pub fn extract_modality(line: &str) -> String {
    capture(&MODALITY_RE, &line.to_uppercase(), 1).unwrap_or_default()
}

/// `FACULTAD DE MEDICINA HUMANA` -> `DE MEDICINA HUMANA`
pub fn extract_faculty(line: &str) -> String {
    capture(&FACULTY_RE, &line.to_uppercase(), 1).unwrap_or_default()
}

/// `CARRERA PROFESIONAL: 12 ENFERMERIA` -> `ENFERMERIA`
pub fn extract_career(line: &str) -> String {
    capture(&CAREER_RE, &line.to_uppercase(), 1)
        .map(|career| strip_leading_code(&career))
        .unwrap_or_default()
}

/// `ESCUELA: 04 DERECHO` -> `DERECHO`
pub fn extract_school(line: &str) -> String {
    capture(&SCHOOL_RE, &line.to_uppercase(), 2)
        .map(|school| strip_leading_code(&school))
        .unwrap_or_default()
}

/// Builds the context for one page from its header lines.
///
/// Modality, career and faculty keep the first value found on the page. A
/// school is only taken while no career has been seen, and a page that names
/// a school but no career reports the school as its program.
pub fn scan_page(text: &str) -> PageContext {
    let text = text.to_uppercase();
    let (year, period) = extract_year_period(&text);

    let mut context = PageContext {
        year,
        period,
        ..PageContext::default()
    };

    for line in text.lines().map(str::trim) {
        if context.modality.is_empty() {
            context.modality = extract_modality(line);
        }
        if context.program.is_empty() {
            context.program = extract_career(line);
        }
        if context.school.is_empty() && context.program.is_empty() {
            context.school = extract_school(line);
        }
        if context.faculty.is_empty() {
            context.faculty = extract_faculty(line);
        }
    }

    if !context.school.is_empty() && context.program.is_empty() {
        context.program = std::mem::take(&mut context.school);
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_extractors() {
        assert_eq!(extract_modality("Modalidad: Ordinaria"), "ORDINARIA");
        assert_eq!(extract_modality("MODALIDAD - 02 PRIMEROS PUESTOS"), "02 PRIMEROS PUESTOS");
        assert_eq!(extract_modality("RESULTADOS POR MODALIDAD"), "");
        assert_eq!(extract_career("CARRERA PROFESIONAL: 12 ENFERMERIA"), "ENFERMERIA");
        assert_eq!(extract_career("CARRERA: MEDICINA HUMANA"), "MEDICINA HUMANA");
        assert_eq!(extract_school("ESCUELA: 04 DERECHO"), "DERECHO");
        assert_eq!(extract_school("ESCUELA: ING. CIVIL"), "ING. CIVIL");
        assert_eq!(extract_faculty("FACULTAD: CIENCIAS"), "CIENCIAS");
        assert_eq!(extract_school("1 12345678 PEREZ GARCIA JUAN"), "");
    }

    #[test]
    fn test_school_promoted_to_program() {
        let context = scan_page("ESCUELA: X\n1 12345678 PEREZ GARCIA JUAN A 01 02 B 1450 INGRESO");
        assert_eq!(context.program, "X");
        assert_eq!(context.school, "");
    }

    #[test]
    fn test_school_after_career_is_ignored() {
        let context = scan_page("CARRERA: ENFERMERIA\nESCUELA: OBSTETRICIA");
        assert_eq!(context.program, "ENFERMERIA");
        assert_eq!(context.school, "");
    }

    #[test]
    fn test_first_header_wins() {
        let context = scan_page(
            "EXAMEN DE ADMISIÓN 2016 - II\nmodalidad: ordinaria\nMODALIDAD: EXTRAORDINARIA\nCARRERA: MEDICINA\nCARRERA: DERECHO",
        );
        assert_eq!(context.modality, "ORDINARIA");
        assert_eq!(context.program, "MEDICINA");
        assert_eq!(context.year, "2016");
        assert_eq!(context.period, "II");
    }

    #[test]
    fn test_page_without_headers() {
        let context = scan_page("1 12345678 PEREZ GARCIA JUAN A 01 02 B 1450 INGRESO");
        assert_eq!(context, PageContext::default());
    }
}
