use std::collections::BTreeMap;

use serde::Serialize;

use super::{
    GENE_NAME_COLUMN, GENE_SYMBOL_COLUMN, SPECIES_COLUMN, TableParser, column_index, split_cells,
    split_list,
};
use crate::domain::SpeciesFilter;
use crate::error::DavidError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneAnnotationRecord {
    pub gene_symbol: String,
    pub description: String,
    pub species: String,
    pub fields: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationTable {
    pub categories: Vec<String>,
    pub genes: BTreeMap<String, GeneAnnotationRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationTableParser {
    species: SpeciesFilter,
}

impl AnnotationTableParser {
    pub fn new(species: SpeciesFilter) -> Self {
        Self { species }
    }
}

impl TableParser for AnnotationTableParser {
    type Output = AnnotationTable;

    fn parse(&self, lines: &[String]) -> Result<AnnotationTable, DavidError> {
        let Some((header_line, rows)) = lines.split_first() else {
            return Err(DavidError::MalformedHeader(GENE_SYMBOL_COLUMN.to_string()));
        };
        let header = split_cells(header_line);
        let symbol_pos = column_index(&header, GENE_SYMBOL_COLUMN)?;
        let name_pos = column_index(&header, GENE_NAME_COLUMN)?;
        let species_pos = column_index(&header, SPECIES_COLUMN)?;

        let categories = header
            .iter()
            .enumerate()
            .filter(|(pos, _)| ![symbol_pos, name_pos, species_pos].contains(pos))
            .map(|(pos, name)| (pos, name.to_string()))
            .collect::<Vec<_>>();

        let mut genes = BTreeMap::new();
        for row in rows {
            // The whole row is tested, not just the species column.
            if !self.species.matches(row) {
                continue;
            }
            let cells = split_cells(row);
            let cell = |pos: usize| cells.get(pos).copied().unwrap_or("");

            let fields = categories
                .iter()
                .map(|(pos, name)| (name.clone(), split_list(cell(*pos))))
                .collect();
            let record = GeneAnnotationRecord {
                gene_symbol: cell(symbol_pos).to_string(),
                description: cell(name_pos).to_string(),
                species: cell(species_pos).to_string(),
                fields,
            };
            genes.insert(record.gene_symbol.clone(), record);
        }
        tracing::debug!(genes = genes.len(), "parsed annotation table");

        Ok(AnnotationTable {
            categories: categories.into_iter().map(|(_, name)| name).collect(),
            genes,
        })
    }
}
