use std::collections::BTreeMap;

use serde::Serialize;

use super::{TERM_COLUMN, TableParser, column_index, split_cells, split_list};
use crate::error::DavidError;

/// A clustering-table cell. Any cell containing a comma is read as a list;
/// there is no per-column schema, so a scalar with a comma in it is split too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Scalar(String),
    List(Vec<String>),
}

impl CellValue {
    pub fn from_cell(cell: &str) -> Self {
        if cell.contains(',') {
            CellValue::List(split_list(cell))
        } else {
            CellValue::Scalar(cell.to_string())
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            CellValue::Scalar(value) => Some(value),
            CellValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            CellValue::List(values) => Some(values),
            CellValue::Scalar(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterTerm {
    pub term: String,
    pub attributes: BTreeMap<String, CellValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterTable {
    pub terms: BTreeMap<String, ClusterTerm>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterTableParser;

impl TableParser for ClusterTableParser {
    type Output = ClusterTable;

    fn parse(&self, lines: &[String]) -> Result<ClusterTable, DavidError> {
        let mut lines = lines.iter();
        let _summary = lines.next();
        let header_line = lines
            .next()
            .ok_or_else(|| DavidError::MalformedHeader(TERM_COLUMN.to_string()))?;
        let header = split_cells(header_line);
        let term_pos = column_index(&header, TERM_COLUMN)?;

        let mut terms = BTreeMap::new();
        for row in lines {
            if row.trim().is_empty() {
                continue;
            }
            let cells = split_cells(row);
            let term = cells.get(term_pos).copied().unwrap_or("").to_string();
            let attributes = header
                .iter()
                .enumerate()
                .filter(|(pos, _)| *pos != term_pos)
                .map(|(pos, name)| {
                    let cell = cells.get(pos).copied().unwrap_or("");
                    (name.to_string(), CellValue::from_cell(cell))
                })
                .collect();
            // A repeated term replaces the earlier row.
            terms.insert(term.clone(), ClusterTerm { term, attributes });
        }
        tracing::debug!(terms = terms.len(), "parsed clustering table");

        Ok(ClusterTable { terms })
    }
}
