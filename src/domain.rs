use std::fmt;
use std::str::FromStr;

use crate::error::DavidError;

pub const DEFAULT_ID_TYPE: &str = "OFFICIAL_GENE_SYMBOL";
pub const DEFAULT_SPECIES: &str = "9606:Homo sapiens";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    AnnotationReport,
    Term2Term,
    GeneReportFull,
}

impl Tool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::AnnotationReport => "annotationReport",
            Tool::Term2Term => "term2term",
            Tool::GeneReportFull => "geneReportFull",
        }
    }

    pub fn takes_annotations(&self) -> bool {
        matches!(self, Tool::AnnotationReport | Tool::Term2Term)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = DavidError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "annotationReport" => Ok(Tool::AnnotationReport),
            "term2term" => Ok(Tool::Term2Term),
            "geneReportFull" => Ok(Tool::GeneReportFull),
            _ => Err(DavidError::InvalidTool(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdType(String);

impl IdType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for IdType {
    fn default() -> Self {
        Self(DEFAULT_ID_TYPE.to_string())
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IdType {
    type Err = DavidError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase();
        let is_valid = !normalized.is_empty()
            && normalized
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
        if !is_valid {
            return Err(DavidError::InvalidIdType(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

/// Case-sensitive substring match against whatever text the parser hands in.
/// The annotation table passes the whole raw row, so a species string found in
/// another column also matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesFilter(String);

impl SpeciesFilter {
    pub fn new(species: impl Into<String>) -> Self {
        Self(species.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, text: &str) -> bool {
        text.contains(self.0.as_str())
    }
}

impl Default for SpeciesFilter {
    fn default() -> Self {
        Self(DEFAULT_SPECIES.to_string())
    }
}

impl fmt::Display for SpeciesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn default_annotation_categories() -> Vec<String> {
    [
        "GOTERM_BP_2",
        "GOTERM_BP_3",
        "GOTERM_BP_4",
        "GOTERM_BP_5",
        "GOTERM_CC_3",
        "GOTERM_CC_4",
        "GOTERM_CC_5",
        "GOTERM_MF_3",
        "GOTERM_MF_4",
        "GOTERM_MF_5",
        "KEGG_PATHWAY",
        "BIOCARTA",
    ]
    .iter()
    .map(|value| value.to_string())
    .collect()
}
