use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::config::ResolvedConfig;
use crate::error::DavidError;

#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<Page, DavidError>;
    fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<Page, DavidError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<Page, DavidError> {
        (**self).get(url)
    }

    fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<Page, DavidError> {
        (**self).post_form(url, fields)
    }
}

/// One instance holds one cookie jar, and so one server-side session.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ResolvedConfig) -> Result<Self, DavidError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|err| DavidError::Transport(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(|err| DavidError::Transport(err.to_string()))?;
        Ok(Self { client })
    }

    fn into_page(response: Response) -> Result<Page, DavidError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "DAVID request failed".to_string());
            return Err(DavidError::TransportStatus { status, message });
        }
        let url = response.url().to_string();
        let body = response
            .text()
            .map_err(|err| DavidError::Transport(err.to_string()))?;
        Ok(Page { url, body })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Page, DavidError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| DavidError::Transport(err.to_string()))?;
        Self::into_page(response)
    }

    fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<Page, DavidError> {
        let response = self
            .client
            .post(url)
            .form(fields)
            .send()
            .map_err(|err| DavidError::Transport(err.to_string()))?;
        Self::into_page(response)
    }
}
