//! Asynchronous HTTP client for the e-Stat REST API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::{EstatConfig, REQUEST_TIMEOUT};
use crate::error::Result;
use crate::model::{MetaInfoResponse, StatsDataResponse, StatsListResponse};

/// Listing endpoint (tables, or survey names with `statsNameList=Y`).
const STATS_LIST_PATH: &str = "/rest/3.0/app/getStatsList";

/// Classification metadata endpoint.
const META_INFO_PATH: &str = "/rest/3.0/app/getMetaInfo";

/// Tabular data endpoint.
const STATS_DATA_PATH: &str = "/rest/3.0/app/getStatsData";

/// User agent sent with every request.
const USER_AGENT: &str = concat!("estat-mcp/", env!("CARGO_PKG_VERSION"));

/// Client for the e-Stat REST API.
///
/// Sends `appId` and `explanationGetFlg=N` with every request, forwards
/// caller filters verbatim in caller order, and injects the configured
/// default row limit when the caller did not set one. Responses are
/// deserialized from XML into the envelope models; an upstream error
/// status inside a well-formed envelope is data, not a client error.
pub struct EstatClient {
    client: Client,
    config: EstatConfig,
}

impl EstatClient {
    /// Create a client from the given configuration.
    pub fn new(config: EstatConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .gzip(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch a table listing (or survey names when `statsNameList=Y` is
    /// among the parameters).
    pub async fn get_stats_list(&self, params: &[(String, String)]) -> Result<StatsListResponse> {
        self.fetch(STATS_LIST_PATH, params).await
    }

    /// Fetch the classification metadata of one table.
    pub async fn get_meta_info(&self, params: &[(String, String)]) -> Result<MetaInfoResponse> {
        self.fetch(META_INFO_PATH, params).await
    }

    /// Fetch tabular data of one table.
    pub async fn get_stats_data(&self, params: &[(String, String)]) -> Result<StatsDataResponse> {
        self.fetch(STATS_DATA_PATH, params).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, path);
        let query = self.build_query(params);
        tracing::debug!(%url, params = query.len(), "requesting e-Stat endpoint");

        let body = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(quick_xml::de::from_str(&body)?)
    }

    fn build_query(&self, params: &[(String, String)]) -> Vec<(String, String)> {
        let mut query = vec![
            ("appId".to_string(), self.config.api_key.clone()),
            ("explanationGetFlg".to_string(), "N".to_string()),
        ];
        query.extend(params.iter().cloned());
        if let Some(limit) = self.config.default_limit {
            if !params.iter().any(|(key, _)| key == "limit") {
                query.push(("limit".to_string(), limit.to_string()));
            }
        }
        query
    }
}
