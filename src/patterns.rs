//! Line layouts found in admission-result listings, and year/period headers.
//!
//! Result PDFs from different years and systems print visually similar but
//! structurally different lines. Each layout is one [`LinePattern`]; they are
//! tried in a fixed order, most constrained first, and the first one that
//! recognizes a line decides how its fields are read.

use crate::error::ExtractError;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Raw fields read from a recognized line, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub pattern: &'static str,
    pub id: String,
    pub name: String,
    pub score: String,
    pub status: String,
}

type FieldExtractor = fn(&Captures<'_>) -> Result<[String; 4], String>;

/// A named line layout: recognition regex plus the mapping from its groups to
/// (id, name, score, status).
pub struct LinePattern {
    pub name: &'static str,
    pub regex: Regex,
    extract: FieldExtractor,
}

impl LinePattern {
    pub(crate) fn new(name: &'static str, pattern: &str, extract: FieldExtractor) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
            extract,
        }
    }
}

const STATUS: &str = r"(INGRESO|NO INGRESO|AUSENTE|ANULADO)";

lazy_static! {
    /// Line layouts in priority order.
    pub static ref LINE_PATTERNS: Vec<LinePattern> = vec![
        LinePattern::new(
            "full_layout",
            &format!(
                r"(?i)^\s*(\d+)\s+(\d{{6,9}})\s+(.+?)\s+([A-E])\s+(\d{{2}})\s+(\d{{2}})\s+([A-Z])\s+([\-—–]?\d{{1,4}}(?:[,.]\d{{2,5}})?)\s+(?:\d+\s+)?(?:\d+\s+)?{STATUS}$"
            ),
            |caps| Ok([group(caps, 2)?, group(caps, 3)?, group(caps, 8)?, group(caps, 9)?]),
        ),
        LinePattern::new(
            "id_first",
            &format!(
                r"(?i)^\s*(?:\d+\s+)?(\d{{6,9}})\s+(.+?)\s*(?:([\-—–]?\d{{1,4}}(?:[,.]\d{{2,5}})*(?:\.\d{{2,5}})?|\b(?:AUSENTE|ANULADO)\b)\s*)?(?:\s+\d+)?(?:\s+\d+)?\s*{STATUS}$"
            ),
            |caps| Ok([group(caps, 1)?, group(caps, 2)?, optional_group(caps, 3), group(caps, 4)?]),
        ),
        LinePattern::new(
            "embedded_codes",
            &format!(
                r"(?i)^\s*\d+\s+(?:\d+\s+)?(?:[A-Z0-9]+\s+)?(\d{{6,9}})\s+(.+?)\s+(?:[A-Z0-9]{{1,5}}\s+)?[A-E]\s+([\-—–]?\d{{1,4}}[,.]\d{{2,5}})\s+{STATUS}$"
            ),
            |caps| Ok([group(caps, 1)?, group(caps, 2)?, group(caps, 3)?, group(caps, 4)?]),
        ),
        LinePattern::new(
            "score_first",
            &format!(
                r"(?i)^\s*(\d+)\s+([\-—–]?\d{{1,4}}[,.]\d{{2,5}})\s+(\d{{6,9}})\s+(.+?)\s+(?:\d+)\s+(?:\d+)\s+{STATUS}$"
            ),
            |caps| Ok([group(caps, 3)?, group(caps, 4)?, group(caps, 2)?, group(caps, 5)?]),
        ),
        // absent and voided candidates carry no score, so the status stands in for it
        LinePattern::new(
            "simple_absence",
            r"(?i)^\s*(?:\d+\s+)?(\d{6,9})\s+(.+?)(?:\s+[\-—–]?0\.0+)?\s+(AUSENTE|ANULADO)$",
            |caps| Ok([group(caps, 1)?, group(caps, 2)?, group(caps, 3)?, group(caps, 3)?]),
        ),
        LinePattern::new(
            "flexible_decimal",
            r"(?i)^\s*(?:\d+\s+)?(\d{6,9})\s+(.+?)\s+([\-—–]?\d{1,4}[,.]\d{1,5})\s+(INGRESO|NO INGRESO)$",
            |caps| Ok([group(caps, 1)?, group(caps, 2)?, group(caps, 3)?, group(caps, 4)?]),
        ),
        LinePattern::new(
            "flexible_integer",
            r"(?i)^\s*(?:\d+\s+)?(\d{6,9})\s+(.+?)\s+([\-—–]?\d{1,4})\s+(INGRESO|NO INGRESO)$",
            |caps| Ok([group(caps, 1)?, group(caps, 2)?, group(caps, 3)?, group(caps, 4)?]),
        ),
    ];

    /// Year/period header phrasings in priority order. The flag marks the
    /// phrasings that print the period before the year.
    static ref YEAR_PERIOD_PATTERNS: Vec<(Regex, bool)> = {
        const ROMAN: &str = r"(I{1,3}|IV|V|VI|VII|VIII|IX|X)";
        const DASH: &str = r"[\-—–]";
        vec![
            // EXAMEN DE ADMISIÓN 2016 - II
            (format!(r"EXAMEN DE ADMISI[ÓO]N\s*(20\d{{2}})\s*{DASH}?\s*{ROMAN}"), false),
            // ADMISIÓN 2016, RESULTADOS: 2016 - I
            (format!(r"(?:ADMISI[ÓO]N|INGRESO|RESULTADOS|PROCESO DE ADMISI[ÓO]N)\s*[:\-]?\s*(20\d{{2}})\s*{DASH}?\s*{ROMAN}?"), false),
            (format!(r"(20\d{{2}})[\s\-—–]+{ROMAN}"), false),
            (r"ADMISI[ÓO]N\s+(20\d{2})".to_string(), false),
            (format!(r"REPORTE DE RESULTADOS DE INGRESO\s*(20\d{{2}})\s*{DASH}?\s*{ROMAN}"), false),
            // CICLO II - 2017
            (format!(r"CICLO\s*{ROMAN}\s*{DASH}?\s*(20\d{{2}})"), true),
            // 2017 - CICLO II
            (format!(r"(20\d{{2}})\s*{DASH}?\s*CICLO\s*{ROMAN}"), false),
        ]
        .into_iter()
        .map(|(pattern, period_first)| (Regex::new(&pattern).unwrap(), period_first))
        .collect()
    };
}

fn group(caps: &Captures<'_>, index: usize) -> Result<String, String> {
    caps.get(index)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| format!("missing capture group {}", index))
}

fn optional_group(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Runs a trimmed line through the layouts in priority order.
///
/// Returns `Ok(None)` when no layout recognizes the line. A recognized line
/// whose fields cannot be read is a [`ExtractError::PatternMatch`].
pub fn match_line(line: &str) -> Result<Option<LineMatch>, ExtractError> {
    match_with(&LINE_PATTERNS, line)
}

/// [`match_line`] over an explicit layout list.
pub fn match_with(patterns: &[LinePattern], line: &str) -> Result<Option<LineMatch>, ExtractError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    for pattern in patterns {
        let Some(caps) = pattern.regex.captures(line) else {
            continue;
        };

        let [id, name, score, status] =
            (pattern.extract)(&caps).map_err(|cause| ExtractError::PatternMatch {
                pattern: pattern.name,
                cause,
            })?;

        log::debug!("{} matched line: {}", pattern.name, line);

        return Ok(Some(LineMatch {
            pattern: pattern.name,
            id,
            name,
            score,
            status,
        }));
    }

    Ok(None)
}

/// Finds the admission year and period in a page header.
///
/// Returns empty strings for whatever could not be found.
pub fn extract_year_period(text: &str) -> (String, String) {
    let text = text.to_uppercase();

    for (regex, period_first) in YEAR_PERIOD_PATTERNS.iter() {
        let Some(caps) = regex.captures(&text) else {
            continue;
        };

        let (year_index, period_index) = if *period_first { (2, 1) } else { (1, 2) };
        let mut year = optional_group(&caps, year_index);
        let period = optional_group(&caps, period_index);

        if year.len() == 2 {
            year = format!("20{}", year);
        }

        return (year, period);
    }

    (String::new(), String::new())
}
