use std::time::Duration;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};

pub const DEFAULT_CATALOG_URL: &str = "https://s3.amazonaws.com/open-to-cors/assignment.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

const USER_AGENT: &str = concat!("catalog-pager/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid catalog from {url}: {source}")]
    Catalog {
        url: String,
        #[source]
        source: CatalogError,
    },
}

#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub proxy: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

pub fn build_client(options: &ClientOptions) -> Result<reqwest::Client, FetchError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(USER_AGENT),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(Duration::from_secs(options.timeout_seconds));

    if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        let proxy_cfg = reqwest::Proxy::all(proxy).map_err(|e| FetchError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy_cfg);
    }

    builder
        .build()
        .map_err(|e| FetchError::HttpClientBuild { source: e })
}

/// GETs `url` and decodes the catalog body.
pub async fn fetch_catalog(client: &reqwest::Client, url: &str) -> Result<Catalog, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Request {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Body {
        url: url.to_string(),
        source: e,
    })?;

    Catalog::from_json(&body).map_err(|e| FetchError::Catalog {
        url: url.to_string(),
        source: e,
    })
}
