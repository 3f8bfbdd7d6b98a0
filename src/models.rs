use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Organization code used in output file names
    pub organization: String,
    pub output_directory: Option<String>,
    pub default_modality: String,
    pub default_period: String,
    // Lookup tables applied on export
    pub modality_synonyms: HashMap<String, String>,
    pub programs: HashMap<String, String>, // program as printed -> canonical name
    pub faculties: HashMap<String, String>, // canonical program -> faculty
    pub areas: HashMap<String, String>,     // canonical program -> area
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organization: "UNICA".to_string(),
            output_directory: Some("output".to_string()),
            default_modality: "ORDINARIA".to_string(),
            default_period: "I".to_string(),
            modality_synonyms: HashMap::from([
                ("ORDINARIO".to_string(), "ORDINARIA".to_string()),
                ("EXAMEN ORDINARIO".to_string(), "ORDINARIA".to_string()),
            ]),
            programs: HashMap::new(),
            faculties: HashMap::new(),
            areas: HashMap::new(),
        }
    }
}

impl Config {
    pub fn load_from_file(file_path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(file_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, file_path: &str) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(file_path, content)?;
        Ok(())
    }
}

/// One admission result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub sequence: u32,
    pub id: String,
    pub name: String,
    pub score: String,
    pub status: String,
    pub modality: String,
    pub program: String,
    pub faculty: String,
    pub year: String,
    pub period: String,
}

/// Metadata in effect for the lines of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    pub modality: String,
    pub program: String,
    pub school: String,
    pub faculty: String,
    pub year: String,
    pub period: String,
}

/// All records of a document with its resolved year and period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub records: Vec<Record>,
    pub year: String,
    pub period: String,
}

impl Document {
    /// Number of records per status, in order of first appearance.
    pub fn status_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(status, _)| *status == record.status) {
                Some((_, count)) => *count += 1,
                None => counts.push((record.status.clone(), 1)),
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.organization, "UNICA");
        assert_eq!(parsed.modality_synonyms.get("ORDINARIO").map(String::as_str), Some("ORDINARIA"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            "organization = \"UNMSM\"\n[programs]\n\"MEDICINA\" = \"MEDICINA HUMANA\"\n",
        )
        .unwrap();
        assert_eq!(config.organization, "UNMSM");
        assert_eq!(config.default_period, "I");
        assert_eq!(config.programs.len(), 1);
    }
}
