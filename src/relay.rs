use std::sync::OnceLock;

use regex::Regex;

use crate::error::DavidError;
use crate::html::{self, HtmlForm};
use crate::transport::{Page, Transport};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub rowids: String,
    pub annot: String,
    pub action: String,
}

pub trait TokenExtractor: Send + Sync {
    fn extract(&self, script: &str) -> SessionTokens;
}

// Per line the first of `rowids`, `annot.value`, `action` it mentions picks the
// token; the value is the text after the first `=`. Later lines win.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTokenExtractor;

impl TokenExtractor for LineTokenExtractor {
    fn extract(&self, script: &str) -> SessionTokens {
        let mut tokens = SessionTokens::default();
        for line in script.lines() {
            let slot = if line.contains("rowids") {
                &mut tokens.rowids
            } else if line.contains("annot.value") {
                &mut tokens.annot
            } else if line.contains("action") {
                &mut tokens.action
            } else {
                continue;
            };
            if let Some(value) = assigned_value(line) {
                *slot = value;
            }
        }
        tokens
    }
}

fn assigned_value(line: &str) -> Option<String> {
    let (_, value) = line.split_once('=')?;
    Some(
        value
            .chars()
            .filter(|ch| *ch != '"' && *ch != ';')
            .collect::<String>()
            .trim()
            .to_string(),
    )
}

#[derive(Debug, Clone)]
pub struct Session {
    pub page: Page,
    pub tokens: SessionTokens,
}

pub struct SessionRelay<'a, T: Transport, E: TokenExtractor = LineTokenExtractor> {
    transport: &'a T,
    extractor: E,
}

impl<'a, T: Transport> SessionRelay<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            extractor: LineTokenExtractor,
        }
    }
}

impl<'a, T: Transport, E: TokenExtractor> SessionRelay<'a, T, E> {
    pub fn with_extractor(transport: &'a T, extractor: E) -> Self {
        Self {
            transport,
            extractor,
        }
    }

    pub fn resolve_download_link(&self, query_url: &str) -> Result<String, DavidError> {
        let session = self.open_session(query_url)?;
        let page = self.submit(&session)?;
        extract_download_link(&page.body)
    }

    pub fn open_session(&self, query_url: &str) -> Result<Session, DavidError> {
        tracing::info!(url = %query_url, "requesting DAVID query page");
        let page = self.transport.get(query_url)?;
        let script = html::first_script_text(&page.body).ok_or(DavidError::NoScriptContent)?;
        let tokens = self.extractor.extract(&script);
        tracing::debug!(
            rowids = %tokens.rowids,
            annot = %tokens.annot,
            action = %tokens.action,
            "scraped session tokens"
        );
        Ok(Session { page, tokens })
    }

    pub fn submit(&self, session: &Session) -> Result<Page, DavidError> {
        let form = build_submission(session)?;
        tracing::info!(action = %form.action, "submitting DAVID session form");
        self.transport.post_form(&form.action, &form.fields)
    }
}

pub fn build_submission(session: &Session) -> Result<HtmlForm, DavidError> {
    let mut form =
        html::first_form(&session.page.body, &session.page.url).ok_or(DavidError::NoForm)?;
    let tokens = &session.tokens;
    form.set_field("rowids", &tokens.rowids);
    form.set_field("annot", &tokens.annot);
    form.set_field("action", &tokens.action);
    if !tokens.action.is_empty() {
        form.set_action(html::resolve_url(&session.page.url, &tokens.action));
    }
    Ok(form)
}

pub fn extract_download_link(body: &str) -> Result<String, DavidError> {
    static LINK: OnceLock<Regex> = OnceLock::new();
    let re = LINK.get_or_init(|| {
        Regex::new(r"UserDownload/\w+\.txt").expect("download link pattern is valid")
    });
    re.find(body)
        .map(|found| found.as_str().to_string())
        .filter(|link| !link.is_empty())
        .ok_or(DavidError::DownloadLinkNotFound)
}
