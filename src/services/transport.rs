//! HTTP plumbing underneath the group client.
//!
//! [`Transport`] is the only thing the group logic talks to: it takes a
//! request relative to the site's API base URL and hands back the raw body.
//! Status handling, authentication headers and URL assembly all live here.

use std::future::Future;

use log::{debug, error};
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};

use crate::config::TableauConf;
use crate::error::TransportError;

pub const AUTH_HEADER: &str = "X-Tableau-Auth";
const CLIENT_USER_AGENT: &str = "tableau-groups";

/// A request against the site API, relative to its base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path plus query string, starting with `/`.
    pub path: String,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }
}

pub trait Transport {
    /// Sends `request` and returns the response body of a successful call.
    fn do_request(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// [`Transport`] over reqwest, authenticated with a Tableau session token.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    api_url: String,
    token: String,
    log_target: String,
}

impl HttpTransport {
    pub fn new(conf: &TableauConf) -> Result<Self, TransportError> {
        let api_url = conf.api_url();
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(TransportError::InvalidUrl(api_url));
        }
        let client = Client::builder()
            .timeout(conf.timeout())
            .build()?;
        Ok(Self {
            client,
            api_url,
            token: conf.token.clone(),
            log_target: conf.log_target.clone(),
        })
    }
}

impl Transport for HttpTransport {
    async fn do_request(&self, request: ApiRequest) -> Result<Vec<u8>, TransportError> {
        let url = format!("{}{}", self.api_url, request.path);
        debug!(target: self.log_target.as_str(), "{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(AUTH_HEADER, &self.token)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT);
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            error!(target: self.log_target.as_str(),
                "{} {} returned {}: {}",
                request.method,
                url,
                status,
                body
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body.to_vec())
    }
}
