//! Cleanup of raw name, condition and score strings captured from result lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Cleanup steps applied to a raw name, in order
    static ref NAME_PIPELINE: Vec<(Regex, &'static str)> = vec![
        // leading code token such as "12", "04A" or "2B1C"
        (Regex::new(r"^\s*\b\d+[A-Z]*\d*[A-Z]*\b\s*").unwrap(), ""),
        // trailing code token
        (Regex::new(r"\s*\b\d+[A-Z]*\d*[A-Z]*\b\s*$").unwrap(), ""),
        (Regex::new(r"\bP\d+[A-Z]*\b").unwrap(), ""),
        (Regex::new(r"\s*,").unwrap(), ","),
        (Regex::new(r"\s{2,}").unwrap(), " "),
        // grade remnants left over from looser layouts: "A 01 02 B", "X1 A", " A"
        (Regex::new(r"\s+[A-E]\s+\d{2}\s+\d{2}\s+[A-Z]$").unwrap(), ""),
        (Regex::new(r"\s+[A-Z0-9]{1,5}\s+[A-E]$").unwrap(), ""),
        (Regex::new(r"\s+[A-E]$").unwrap(), ""),
    ];
}

/// Canonical status values.
pub const INGRESO: &str = "INGRESO";
pub const NO_INGRESO: &str = "NO INGRESO";
pub const AUSENTE: &str = "AUSENTE";
pub const ANULADO: &str = "ANULADO";

/// Keyword groups checked in order; the first group with a hit decides.
const CONDITION_KEYWORDS: [(&[&str], &str); 4] = [
    (&["AUS", "AUSENT"], AUSENTE),
    (&["ANUL", "ANULA"], ANULADO),
    (&["NO ING", "NO ADMIT", "NOING", "NO INGRESO"], NO_INGRESO),
    (&["ING", "ADMIT", "INGRES"], INGRESO),
];

/// Strips code tokens and grade remnants from a raw name and title-cases it.
pub fn clean_name(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    for (pattern, replacement) in NAME_PIPELINE.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }

    title_case(text.trim())
}

/// Maps a raw condition onto one of the canonical statuses, or returns it
/// uppercased when no keyword is present.
pub fn clean_condition(raw: &str) -> String {
    let text = raw.trim().to_uppercase();

    CONDITION_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(*keyword)))
        .map(|(_, status)| status.to_string())
        .unwrap_or(text)
}

/// Normalizes a score to a plain decimal string.
///
/// `AUSENTE` and `ANULADO` pass through unchanged. Returns an empty string when
/// the text is not a number.
pub fn parse_score(raw: &str) -> String {
    let text = raw.trim().to_uppercase();

    if text == AUSENTE || text == ANULADO {
        return text;
    }

    let mut score: String = text.chars().filter(|c| *c != ' ').collect();

    if score.ends_with(',') && !score.contains('.') {
        score = format!("{}0", score.replace(',', "."));
    }

    if let (Some(comma), Some(period)) = (score.rfind(','), score.rfind('.')) {
        // whichever separator comes last is the decimal one
        score = if comma > period {
            score.replace('.', "").replace(',', ".")
        } else {
            score.replace(',', "")
        };
    }

    if score.contains(',') {
        score = score.replace(',', ".");
    }

    match score.parse::<f64>() {
        Ok(value) if value.is_finite() => score,
        _ => String::new(),
    }
}

/// Uppercases the first letter of every word and lowercases the rest.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }

    result
}
