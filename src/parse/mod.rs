pub mod annotation;
pub mod cluster;
pub mod gene_report;

pub use annotation::{AnnotationTable, AnnotationTableParser, GeneAnnotationRecord};
pub use cluster::{CellValue, ClusterTable, ClusterTableParser, ClusterTerm};
pub use gene_report::{BlockWarning, GeneReport, GeneReportParser, GeneReportRecord};

use crate::error::DavidError;

pub const GENE_SYMBOL_COLUMN: &str = "GENE_SYMBOL";
pub const GENE_NAME_COLUMN: &str = "Gene Name";
pub const SPECIES_COLUMN: &str = "Species";
pub const TERM_COLUMN: &str = "Term";

pub trait TableParser {
    type Output;

    fn parse(&self, lines: &[String]) -> Result<Self::Output, DavidError>;
}

pub(crate) fn split_cells(line: &str) -> Vec<&str> {
    line.split('\t').collect()
}

pub(crate) fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn column_index(header: &[&str], name: &str) -> Result<usize, DavidError> {
    header
        .iter()
        .position(|column| *column == name)
        .ok_or_else(|| DavidError::MalformedHeader(name.to_string()))
}
