use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DavidError {
    #[error("query URL is {length} characters, the service accepts at most {limit}")]
    #[diagnostic(help("split the gene list into smaller batches"))]
    QueryTooLong { length: usize, limit: usize },

    #[error("DAVID request failed: {0}")]
    Transport(String),

    #[error("DAVID returned status {status}: {message}")]
    TransportStatus { status: u16, message: String },

    #[error("DAVID page has no script content to read session tokens from")]
    NoScriptContent,

    #[error("DAVID page has no form to resubmit")]
    NoForm,

    #[error("download link not found in DAVID response")]
    #[diagnostic(help("the service usually answers this way when it does not recognise the gene list"))]
    DownloadLinkNotFound,

    #[error("report header is missing column {0:?}")]
    MalformedHeader(String),

    #[error("unknown DAVID tool: {0}")]
    InvalidTool(String),

    #[error("invalid identifier type: {0}")]
    InvalidIdType(String),

    #[error("invalid service base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("failed to write output: {0}")]
    Output(String),
}

impl DavidError {
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DavidError::Transport(_) | DavidError::TransportStatus { .. }
        )
    }
}
