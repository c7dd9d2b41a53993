//! Transilien HTTP client.
//!
//! Fetches the next-departures board for a station. One authenticated GET
//! per call; retries and backoff belong to the caller.

use std::time::Duration;

use encoding_rs::Encoding;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::debug;

use crate::config::Config;
use crate::domain::StationCode;

use super::error::FetchError;

/// Default base URL for the Transilien API.
const DEFAULT_BASE_URL: &str = "https://api.transilien.com";

/// Media type of the v1 departures board.
const BOARD_MEDIA_TYPE: &str = "application/vnd.sncf.transilien.od.depart+xml;vers=1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Transilien client.
#[derive(Debug, Clone)]
pub struct TransilienConfig {
    /// Basic-auth user name
    pub user: String,
    /// Basic-auth password
    pub password: String,
    /// Station to list departures from
    pub departure: StationCode,
    /// Only list trains calling at this station
    pub arrival: Option<StationCode>,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Encoding label of the response body
    pub encoding: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransilienConfig {
    /// Create a new config for departures from `departure`.
    pub fn new(user: impl Into<String>, password: impl Into<String>, departure: StationCode) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            departure,
            arrival: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            encoding: "utf-8".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Only list trains calling at `arrival`.
    pub fn with_arrival(mut self, arrival: StationCode) -> Self {
        self.arrival = Some(arrival);
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the response body encoding label.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Returns the board URL for the configured stations.
    ///
    /// `{base}/gare/{departure}/depart/` or
    /// `{base}/gare/{departure}/depart/{arrival}/`.
    pub fn board_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        match self.arrival {
            Some(arrival) => format!("{base}/gare/{}/depart/{arrival}/", self.departure),
            None => format!("{base}/gare/{}/depart/", self.departure),
        }
    }
}

impl From<&Config> for TransilienConfig {
    fn from(config: &Config) -> Self {
        let api = &config.api;
        let mut out = Self::new(&api.user, &api.password, config.stations.departure)
            .with_base_url(&api.base_url)
            .with_encoding(&api.encoding)
            .with_timeout(api.timeout_secs);
        out.arrival = config.stations.arrival;
        out
    }
}

/// Transilien departures API client.
#[derive(Debug, Clone)]
pub struct TransilienClient {
    http: reqwest::Client,
    url: String,
    user: String,
    password: String,
    encoding: &'static Encoding,
}

impl TransilienClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails if the encoding label is unknown or the HTTP client cannot be
    /// built.
    pub fn new(config: TransilienConfig) -> Result<Self, FetchError> {
        let encoding = Encoding::for_label(config.encoding.as_bytes())
            .ok_or_else(|| FetchError::UnknownEncoding(config.encoding.clone()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(BOARD_MEDIA_TYPE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            url: config.board_url(),
            http,
            user: config.user,
            password: config.password,
            encoding,
        })
    }

    /// Returns the URL fetched on each call.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the departure board and decode it to text.
    pub async fn fetch(&self) -> Result<String, FetchError> {
        debug!(url = %self.url, "fetching departure board");

        let response = self
            .http
            .get(&self.url)
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.bytes().await?;
        decode_body(&body, self.encoding)
    }
}

/// Decode a response body, rejecting byte sequences that are invalid in
/// `encoding`.
pub fn decode_body(body: &[u8], encoding: &'static Encoding) -> Result<String, FetchError> {
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or(FetchError::Decode {
            encoding: encoding.name(),
        })
}
