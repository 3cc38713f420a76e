use std::fs;
use std::sync::Mutex;

use assert_matches::assert_matches;

use david_annot::aggregate::common_annotations;
use david_annot::client::DavidClient;
use david_annot::config::ResolvedConfig;
use david_annot::domain::{SpeciesFilter, Tool};
use david_annot::error::DavidError;
use david_annot::transport::{Page, Transport};

const BASE: &str = "http://david.example.org/";

/// Serves the landing page for `api.jsp`, the download page for any form
/// post, and `report` for the download link.
struct ScriptedDavid {
    report: String,
    reset_on_post: bool,
    download_status: Option<u16>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedDavid {
    fn new(report_fixture: &str) -> Self {
        Self {
            report: fixture(report_fixture),
            reset_on_post: false,
            download_status: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn reset_on_post(mut self) -> Self {
        self.reset_on_post = true;
        self
    }

    fn download_status(mut self, status: u16) -> Self {
        self.download_status = Some(status);
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedDavid {
    fn get(&self, url: &str) -> Result<Page, DavidError> {
        self.requests.lock().unwrap().push(format!("GET {url}"));
        let body = if url.starts_with(&format!("{BASE}api.jsp")) {
            fixture("api_page.html")
        } else if url == format!("{BASE}UserDownload/D3A1B2C4F5_table.txt") {
            if let Some(status) = self.download_status {
                return Err(DavidError::TransportStatus {
                    status,
                    message: "internal server error".to_string(),
                });
            }
            self.report.clone()
        } else {
            return Err(DavidError::TransportStatus {
                status: 404,
                message: "not found".to_string(),
            });
        };
        Ok(Page {
            url: url.to_string(),
            body,
        })
    }

    fn post_form(&self, url: &str, _fields: &[(String, String)]) -> Result<Page, DavidError> {
        self.requests.lock().unwrap().push(format!("POST {url}"));
        if self.reset_on_post {
            return Err(DavidError::Transport("connection reset".to_string()));
        }
        Ok(Page {
            url: url.to_string(),
            body: fixture("submit_page.html"),
        })
    }
}

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{name}")).unwrap()
}

fn config() -> ResolvedConfig {
    ResolvedConfig {
        base_url: BASE.to_string(),
        ..ResolvedConfig::default()
    }
}

fn genes(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn annotation_report_runs_full_pipeline() {
    let client = DavidClient::new(ScriptedDavid::new("annotation_report.txt"), config());
    let table = client
        .annotation_report(&genes(&["TP53", "MDM2", "CDKN2A", "Trp53"]))
        .unwrap();
    assert_eq!(table.genes.len(), 3);

    let common = common_annotations(&table.genes);
    assert_eq!(common.get("GOTERM_BP_3"), ["GO:0006915~apoptotic process"]);
    assert_eq!(common.get("KEGG_PATHWAY"), ["hsa04115:p53 signaling pathway"]);
    assert!(common.get("ID").is_empty());
}

#[test]
fn gene_report_collects_block_warnings() {
    let transport = ScriptedDavid::new("gene_report_full.txt");
    let client = DavidClient::new(transport, config());
    let report = client.gene_report(&genes(&["TP53", "CDKN2A"])).unwrap();
    assert_eq!(report.genes.len(), 2);
    assert_eq!(report.warnings.len(), 2);
}

#[test]
fn gene_report_query_has_no_annot() {
    let client = DavidClient::new(ScriptedDavid::new("gene_report_full.txt"), config());
    let url = client.query_url(Tool::GeneReportFull, &genes(&["TP53"]));
    assert_eq!(
        url,
        "http://david.example.org/api.jsp?type=OFFICIAL_GENE_SYMBOL&ids=TP53&tool=geneReportFull"
    );
}

#[test]
fn clusters_use_term2term_tool() {
    let transport = ScriptedDavid::new("term2term.txt");
    let client = DavidClient::new(transport, config());
    let table = client.term_clusters(&genes(&["TP53", "MDM2"])).unwrap();
    assert_eq!(table.terms.len(), 3);
}

#[test]
fn pipeline_request_sequence() {
    let transport = ScriptedDavid::new("term2term.txt");
    let lines = {
        let client = DavidClient::new(&transport, config());
        client
            .fetch_report_lines(Tool::Term2Term, &genes(&["TP53"]))
            .unwrap()
    };
    assert_eq!(lines[1], "Category\tTerm\tCount\t%\tPValue\tGenes");

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].starts_with("GET http://david.example.org/api.jsp?type="));
    assert!(requests[0].contains("&tool=term2term&annot=GOTERM_BP_2,"));
    assert_eq!(requests[1], "POST http://david.example.org/annotationReport.jsp");
    assert_eq!(
        requests[2],
        "GET http://david.example.org/UserDownload/D3A1B2C4F5_table.txt"
    );
}

#[test]
fn failed_form_post_stops_pipeline() {
    let transport = ScriptedDavid::new("annotation_report.txt").reset_on_post();
    let result = {
        let client = DavidClient::new(&transport, config());
        client.annotation_report(&genes(&["TP53"]))
    };

    let err = result.unwrap_err();
    assert!(err.is_transport());
    assert_matches!(err, DavidError::Transport(message) if message == "connection reset");
    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1], "POST http://david.example.org/annotationReport.jsp");
}

#[test]
fn failed_download_is_a_transport_error() {
    let transport = ScriptedDavid::new("term2term.txt").download_status(500);
    let result = {
        let client = DavidClient::new(&transport, config());
        client.term_clusters(&genes(&["TP53"]))
    };

    let err = result.unwrap_err();
    assert!(err.is_transport());
    assert_matches!(err, DavidError::TransportStatus { status: 500, .. });
    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(
        requests[2],
        "GET http://david.example.org/UserDownload/D3A1B2C4F5_table.txt"
    );
}

#[test]
fn long_gene_list_is_rejected_before_any_request() {
    let transport = ScriptedDavid::new("annotation_report.txt");
    let many = (0..400).map(|n| format!("GENE{n}")).collect::<Vec<_>>();
    let result = {
        let client = DavidClient::new(&transport, config());
        client.annotation_report(&many)
    };
    assert_matches!(result, Err(DavidError::QueryTooLong { .. }));
    assert!(transport.requests().is_empty());
}

#[test]
fn species_comes_from_config() {
    let config = ResolvedConfig {
        species: SpeciesFilter::new("Mus musculus"),
        ..config()
    };
    let client = DavidClient::new(ScriptedDavid::new("annotation_report.txt"), config);
    let table = client.annotation_report(&genes(&["Trp53"])).unwrap();
    assert_eq!(table.genes.keys().collect::<Vec<_>>(), vec!["Trp53"]);
}
