use std::io::{self, Write};

use serde::Serialize;

use crate::aggregate::CommonAnnotations;
use crate::parse::{AnnotationTable, ClusterTable, GeneReport};

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_annotations(table: &AnnotationTable) -> io::Result<()> {
        Self::print_json(table)
    }

    pub fn print_clusters(table: &ClusterTable) -> io::Result<()> {
        Self::print_json(table)
    }

    pub fn print_gene_report(report: &GeneReport) -> io::Result<()> {
        Self::print_json(report)
    }

    pub fn print_common(common: &CommonAnnotations) -> io::Result<()> {
        Self::print_json(common)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
