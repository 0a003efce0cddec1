//! HTTP client for the promotions endpoint using wreq for TLS fingerprint
//! emulation.

use crate::config::Config;
use crate::extract;
use crate::models::{CatalogResponse, FreeGame};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Client for the free-games promotions feed.
pub struct EpicClient {
    client: Client,
    api_url: String,
    locale: String,
}

impl EpicClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_api_url(config, config.api_url.clone())
    }

    /// Creates a new client pointed at a custom endpoint URL (for testing).
    pub fn with_api_url(config: &Config, api_url: String) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, api_url, locale: config.locale.clone() })
    }

    /// Returns the configured storefront locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Fetches the promotions feed and returns the current free games.
    ///
    /// A non-success HTTP status is logged and yields an empty list rather
    /// than an error; only transport failures and a malformed JSON body
    /// propagate as `Err`.
    pub async fn free_games(&self) -> Result<Vec<FreeGame>> {
        info!("Fetching free games from: {}", self.api_url);

        let response = self
            .client
            .get(&self.api_url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "application/json")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            warn!("Promotions request failed with status {}, returning no games", status);
            return Ok(Vec::new());
        }

        let body = response.text().await.context("Failed to read response body")?;
        let catalog: CatalogResponse =
            serde_json::from_str(&body).context("Failed to parse promotions response")?;

        Ok(extract::free_games(&catalog, &self.locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config() -> Config {
        Config {
            api_url: "https://example.invalid/freeGamesPromotions".to_string(),
            locale: "es-MX".to_string(),
            timeout_secs: 5,
        }
    }

    fn catalog_body() -> serde_json::Value {
        json!({
            "data": {
                "Catalog": {
                    "searchStore": {
                        "elements": [
                            {
                                "title": "Free Game",
                                "description": "A free game",
                                "productSlug": "free-game",
                                "keyImages": [
                                    {"type": "Thumbnail", "url": "https://cdn/thumb.jpg"}
                                ],
                                "price": {"totalPrice": {"discountPrice": 0}},
                                "promotions": {
                                    "promotionalOffers": [{
                                        "promotionalOffers": [{
                                            "endDate": "2025-01-09T16:00:00.000Z",
                                            "discountSetting": {"discountPercentage": 0}
                                        }]
                                    }]
                                }
                            },
                            {
                                "title": "Paid Game",
                                "price": {"totalPrice": {"discountPrice": 1999}}
                            }
                        ]
                    }
                }
            }
        })
    }

    async fn client_for(server: &MockServer) -> EpicClient {
        let config = make_test_config();
        let url = format!("{}/freeGamesPromotions", server.uri());
        EpicClient::with_api_url(&config, url).unwrap()
    }

    #[tokio::test]
    async fn test_free_games_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/freeGamesPromotions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let games = client.free_games().await.unwrap();

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].title, "Free Game");
        assert_eq!(games[0].link, "https://store.epicgames.com/es-MX/p/free-game");
        assert_eq!(games[0].end_date, "2025-01-09T16:00:00.000Z");
        assert_eq!(games[0].thumbnail, "https://cdn/thumb.jpg");
    }

    #[tokio::test]
    async fn test_http_error_500_returns_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/freeGamesPromotions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let games = client.free_games().await.unwrap();

        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_404_returns_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/freeGamesPromotions"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let games = client.free_games().await.unwrap();

        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/freeGamesPromotions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let result = client.free_games().await;

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse promotions response"));
    }

    #[tokio::test]
    async fn test_empty_catalog_returns_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/freeGamesPromotions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let games = client.free_games().await.unwrap();

        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn test_locale_flows_into_links() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/freeGamesPromotions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
            .mount(&mock_server)
            .await;

        let mut config = make_test_config();
        config.locale = "en-US".to_string();
        let url = format!("{}/freeGamesPromotions", mock_server.uri());
        let client = EpicClient::with_api_url(&config, url).unwrap();

        let games = client.free_games().await.unwrap();
        assert_eq!(games[0].link, "https://store.epicgames.com/en-US/p/free-game");
    }

    #[tokio::test]
    async fn test_new_uses_configured_url() {
        let config = make_test_config();
        let client = EpicClient::new(&config).unwrap();

        assert_eq!(client.api_url, config.api_url);
        assert_eq!(client.locale(), "es-MX");
    }
}
