use crate::config::ResolvedConfig;
use crate::domain::Tool;
use crate::error::DavidError;
use crate::fetch::fetch_table;
use crate::parse::{
    AnnotationTable, AnnotationTableParser, ClusterTable, ClusterTableParser, GeneReport,
    GeneReportParser, TableParser,
};
use crate::query::{build_query_url, check_query_length};
use crate::relay::SessionRelay;
use crate::transport::Transport;

pub struct DavidClient<T: Transport> {
    transport: T,
    config: ResolvedConfig,
}

impl<T: Transport> DavidClient<T> {
    pub fn new(transport: T, config: ResolvedConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn query_url(&self, tool: Tool, genes: &[String]) -> String {
        build_query_url(
            &self.config.base_url,
            genes,
            &self.config.id_type,
            tool,
            &self.config.annotations,
        )
    }

    pub fn fetch_report_lines(
        &self,
        tool: Tool,
        genes: &[String],
    ) -> Result<Vec<String>, DavidError> {
        let url = self.query_url(tool, genes);
        check_query_length(&url)?;
        tracing::info!(tool = %tool, genes = genes.len(), "starting DAVID query");
        let link = SessionRelay::new(&self.transport).resolve_download_link(&url)?;
        tracing::info!(link = %link, "DAVID report ready");
        fetch_table(&self.transport, &self.config.base_url, &link)
    }

    pub fn annotation_report(&self, genes: &[String]) -> Result<AnnotationTable, DavidError> {
        let lines = self.fetch_report_lines(Tool::AnnotationReport, genes)?;
        AnnotationTableParser::new(self.config.species.clone()).parse(&lines)
    }

    pub fn term_clusters(&self, genes: &[String]) -> Result<ClusterTable, DavidError> {
        let lines = self.fetch_report_lines(Tool::Term2Term, genes)?;
        ClusterTableParser.parse(&lines)
    }

    pub fn gene_report(&self, genes: &[String]) -> Result<GeneReport, DavidError> {
        let lines = self.fetch_report_lines(Tool::GeneReportFull, genes)?;
        GeneReportParser::new(self.config.species.clone()).parse(&lines)
    }
}
