use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::parse::GeneAnnotationRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommonAnnotations(BTreeMap<String, Vec<String>>);

impl CommonAnnotations {
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, terms)| (field.as_str(), terms.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

/// Each gene counts a term at most once. A gene lacking a field leaves that
/// field with no common terms.
pub fn common_annotations(genes: &BTreeMap<String, GeneAnnotationRecord>) -> CommonAnnotations {
    let gene_count = genes.len();
    let field_names = genes
        .values()
        .flat_map(|record| record.fields.keys())
        .collect::<BTreeSet<_>>();

    let mut common = BTreeMap::new();
    for field in field_names {
        let mut order = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in genes.values() {
            let Some(terms) = record.fields.get(field) else {
                continue;
            };
            let mut seen = HashSet::new();
            for term in terms.iter().map(|term| term.trim()) {
                if !seen.insert(term) {
                    continue;
                }
                let count = counts.entry(term).or_insert_with(|| {
                    order.push(term);
                    0
                });
                *count += 1;
            }
        }

        let shared = order
            .into_iter()
            .filter(|term| counts.get(term).copied() == Some(gene_count))
            .map(str::to_string)
            .collect::<Vec<_>>();
        tracing::debug!(field = %field, common = shared.len(), "intersected annotation field");
        common.insert(field.clone(), shared);
    }

    CommonAnnotations(common)
}
