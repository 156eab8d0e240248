use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::*;

use crate::{
    client::IndexerClient,
    errors::ClientError,
    types::{BlockHeadersPage, BlockHeadersQuery, HealthResponse},
};

/// Header carrying the optional API token.
pub const API_TOKEN_HEADER: &str = "X-Indexer-API-Token";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`HttpIndexerClient`].
#[derive(Clone, Debug)]
pub struct HttpIndexerConfig {
    /// Base URL of the indexer, e.g. `https://mainnet-idx.4160.nodely.dev`.
    pub url: String,

    pub api_token: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl HttpIndexerConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_token: None,
            timeout_secs: None,
        }
    }
}

/// [`IndexerClient`] speaking to the indexer's REST API.
#[derive(Clone, Debug)]
pub struct HttpIndexerClient {
    http: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl HttpIndexerClient {
    pub fn new(config: &HttpIndexerConfig) -> Result<Self, ClientError> {
        let base_url = parse_base_url(&config.url)?;
        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("building http client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            api_token: config.api_token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    pub(crate) fn block_headers_url(&self, query: &BlockHeadersQuery) -> Result<Url, ClientError> {
        let mut url = self.endpoint("v2/block-headers")?;
        {
            let proposers = query
                .proposers
                .iter()
                .map(|a| a.as_str())
                .collect::<Vec<_>>()
                .join(",");

            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("proposers", &proposers);
            pairs.append_pair("min-round", &query.min_round.to_string());
            if let Some(max_round) = query.max_round {
                pairs.append_pair("max-round", &max_round.to_string());
            }
            pairs.append_pair("limit", &query.limit.to_string());
            if let Some(next) = &query.next {
                pairs.append_pair("next", next);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        trace!(%url, "indexer request");
        let mut req = self.http.get(url);
        if let Some(token) = &self.api_token {
            req = req.header(API_TOKEN_HEADER, token);
        }

        let resp = req.send().await?;
        decode_response(resp).await
    }
}

/// Parses the base URL, making sure relative endpoint paths join under it rather than
/// replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(format!("{raw}: not a base url")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn decode_response<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.bytes().await?;
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl IndexerClient for HttpIndexerClient {
    async fn block_headers(
        &self,
        query: BlockHeadersQuery,
    ) -> Result<BlockHeadersPage, ClientError> {
        let url = self.block_headers_url(&query)?;
        self.get_json(url).await
    }

    async fn current_round(&self) -> Result<u64, ClientError> {
        let url = self.endpoint("health")?;
        let health: HealthResponse = self.get_json(url).await?;
        Ok(health.round)
    }
}

#[cfg(test)]
mod tests {
    use rewards_primitives::Address;

    use super::*;

    fn client(url: &str) -> HttpIndexerClient {
        HttpIndexerClient::new(&HttpIndexerConfig::new(url)).unwrap()
    }

    fn query(next: Option<&str>, max_round: Option<u64>) -> BlockHeadersQuery {
        BlockHeadersQuery {
            proposers: vec![
                Address::from_public_key(&[0u8; 32]),
                Address::from_public_key(&[1u8; 32]),
            ],
            min_round: 46512890,
            max_round,
            limit: 1000,
            next: next.map(str::to_owned),
        }
    }

    #[test]
    fn test_block_headers_url() {
        let c = client("https://idx.example.com");
        let url = c.block_headers_url(&query(None, None)).unwrap();

        assert_eq!(url.path(), "/v2/block-headers");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let proposers = &pairs[0];
        assert_eq!(proposers.0, "proposers");
        assert_eq!(proposers.1.split(',').count(), 2);
        assert!(proposers
            .1
            .starts_with("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ"));
        assert_eq!(pairs[1], ("min-round".into(), "46512890".into()));
        assert_eq!(pairs[2], ("limit".into(), "1000".into()));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_block_headers_url_with_token_and_max() {
        let c = client("https://idx.example.com/prefix");
        let url = c
            .block_headers_url(&query(Some("tok"), Some(46512999)))
            .unwrap();

        assert_eq!(url.path(), "/prefix/v2/block-headers");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("max-round".into(), "46512999".into())));
        assert!(pairs.contains(&("next".into(), "tok".into())));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = HttpIndexerClient::new(&HttpIndexerConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));

        let err = HttpIndexerClient::new(&HttpIndexerConfig::new("mailto:x@y")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_empty_api_token_is_ignored() {
        let mut config = HttpIndexerConfig::new("https://idx.example.com");
        config.api_token = Some(String::new());
        let c = HttpIndexerClient::new(&config).unwrap();
        assert!(c.api_token.is_none());
    }

    #[test]
    fn test_health_decodes() {
        let health: HealthResponse =
            serde_json::from_str(r#"{"round": 46513000, "is-migrating": false}"#).unwrap();
        assert_eq!(health.round, 46513000);
    }
}
