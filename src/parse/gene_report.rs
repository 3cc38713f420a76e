use std::collections::BTreeMap;

use serde::Serialize;

use super::{TableParser, split_cells};
use crate::domain::SpeciesFilter;
use crate::error::DavidError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneReportRecord {
    pub gene_symbol: String,
    pub description: String,
    pub species: String,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockWarning {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneReport {
    pub genes: BTreeMap<String, GeneReportRecord>,
    pub warnings: Vec<BlockWarning>,
}

#[derive(Debug, Clone, Default)]
pub struct GeneReportParser {
    species: SpeciesFilter,
}

impl GeneReportParser {
    pub fn new(species: SpeciesFilter) -> Self {
        Self { species }
    }

    fn parse_block(&self, block: &[(usize, &str)], report: &mut GeneReport) {
        let Some(((start, first), rows)) = block.split_first() else {
            return;
        };
        let head = split_cells(first);
        if head.len() < 3 {
            warn(
                report,
                *start,
                format!(
                    "block header has {} cells, expected symbol, description and species",
                    head.len()
                ),
            );
            return;
        }
        if !self.species.matches(head[2]) {
            tracing::debug!(gene = head[0], species = head[2], "skipping block for other species");
            return;
        }

        let mut record = GeneReportRecord {
            gene_symbol: head[0].to_string(),
            description: head[1].to_string(),
            species: head[2].to_string(),
            attributes: BTreeMap::new(),
        };
        for (line, row) in rows {
            let cells = split_cells(row);
            if cells.len() < 2 {
                warn(
                    report,
                    *line,
                    format!("attribute row for {} has no value", record.gene_symbol),
                );
                continue;
            }
            record
                .attributes
                .insert(cells[0].to_string(), cells[1].to_string());
        }
        report.genes.insert(record.gene_symbol.clone(), record);
    }
}

impl TableParser for GeneReportParser {
    type Output = GeneReport;

    fn parse(&self, lines: &[String]) -> Result<GeneReport, DavidError> {
        let mut report = GeneReport::default();
        let mut block: Vec<(usize, &str)> = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                self.parse_block(&block, &mut report);
                block.clear();
                continue;
            }
            block.push((index, line.as_str()));
        }
        self.parse_block(&block, &mut report);
        tracing::debug!(
            genes = report.genes.len(),
            warnings = report.warnings.len(),
            "parsed gene report"
        );
        Ok(report)
    }
}

fn warn(report: &mut GeneReport, line: usize, message: String) {
    tracing::warn!(line, %message, "malformed gene report block");
    report.warnings.push(BlockWarning { line, message });
}
