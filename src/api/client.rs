//! Discord API HTTP client.

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use secrecy::SecretString;
use serde::de::DeserializeOwned;

use crate::api::auth::build_headers;
use crate::api::types::{Guild, RawEmoji, RawSticker};
use crate::config::{Config, EndpointsConfig};
use crate::error::{Error, Result};

/// Fallback wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Operations the download pipeline needs from the platform.
///
/// Implemented over HTTP by [`DiscordApi`]; tests substitute in-memory fakes.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// List the guilds the account belongs to.
    async fn list_guilds(&self) -> Result<Vec<Guild>>;

    /// List a guild's custom emoji.
    async fn list_emojis(&self, guild_id: &str) -> Result<Vec<RawEmoji>>;

    /// List a guild's stickers.
    async fn list_stickers(&self, guild_id: &str) -> Result<Vec<RawSticker>>;

    /// Fetch raw content bytes from an absolute URL.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Discord API client sharing one connection pool across workers.
pub struct DiscordApi {
    client: Client,
    endpoints: EndpointsConfig,
}

impl DiscordApi {
    /// Create a new API client with the account headers and timeouts applied.
    pub fn new(token: &SecretString, config: &Config) -> Result<Self> {
        let headers = build_headers(token, &config.account.user_agent)?;

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.download.connect_timeout())
            .read_timeout(config.download.read_timeout())
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
        })
    }

    /// Make a GET request, mapping 429 to [`Error::RateLimited`].
    async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited(retry_after_secs(&response)));
        }

        Ok(response)
    }

    /// GET a listing endpoint and decode its JSON array.
    async fn get_listing<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let response = self.get(url).await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api(format!(
                "Failed to list {}: HTTP {} - {}",
                what,
                status,
                truncate(&text)
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse {}: {} - Response: {}",
                what,
                e,
                truncate(&text)
            ))
        })
    }
}

#[async_trait]
impl ApiTransport for DiscordApi {
    async fn list_guilds(&self) -> Result<Vec<Guild>> {
        let url = format!("{}/users/@me/guilds", self.endpoints.api_base);
        let response = self.get(&url).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Guild list error response: {}", truncate(&body));
            return Err(Error::Authentication(format!(
                "HTTP {} while listing guilds. Your token is likely incorrect, please check it and try again.",
                status
            )));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse guild list: {} - Response: {}",
                e,
                truncate(&text)
            ))
        })
    }

    async fn list_emojis(&self, guild_id: &str) -> Result<Vec<RawEmoji>> {
        let url = format!("{}/guilds/{}/emojis", self.endpoints.api_base, guild_id);
        self.get_listing(&url, &format!("emojis of guild {}", guild_id))
            .await
    }

    async fn list_stickers(&self, guild_id: &str) -> Result<Vec<RawSticker>> {
        let url = format!(
            "{}/guilds/{}/stickers",
            self.endpoints.sticker_api_base, guild_id
        );
        self.get_listing(&url, &format!("stickers of guild {}", guild_id))
            .await
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Seconds to wait according to the `Retry-After` header.
fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| secs.ceil() as u64)
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(500) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "MTAxNjQ5.GZx3Yk.abcdefghijklmnopqrstuvwx";

    fn api_for(server: &MockServer) -> DiscordApi {
        let mut config = Config::default();
        config.endpoints = EndpointsConfig::single_host(&server.uri());
        DiscordApi::new(&SecretString::from(TOKEN.to_string()), &config).unwrap()
    }

    #[tokio::test]
    async fn test_list_guilds_sends_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v8/users/@me/guilds"))
            .and(header_eq("authorization", TOKEN))
            .and(header_eq("accept-language", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"id":"1"}]"#))
            .mount(&server)
            .await;

        let guilds = api_for(&server).list_guilds().await.unwrap();
        assert_eq!(guilds.len(), 1);
        assert_eq!(guilds[0].id, "1");
    }

    #[tokio::test]
    async fn test_list_guilds_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v8/users/@me/guilds"))
            .respond_with(ResponseTemplate::new(401).set_body_string("401: Unauthorized"))
            .mount(&server)
            .await;

        let err = api_for(&server).list_guilds().await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[tokio::test]
    async fn test_sticker_listing_uses_v9() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v9/guilds/1/stickers"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[{"id":"5","name":"Wave!","format_type":2}]"#),
            )
            .mount(&server)
            .await;

        let stickers = api_for(&server).list_stickers("1").await.unwrap();
        assert_eq!(stickers[0].format_type, Some(2));
    }

    #[tokio::test]
    async fn test_emoji_listing_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v8/guilds/1/emojis"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = api_for(&server).list_emojis("1").await.unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v8/guilds/1/emojis"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1.5"))
            .mount(&server)
            .await;

        let err = api_for(&server).list_emojis("1").await.unwrap_err();
        assert!(matches!(err, Error::RateLimited(2)));
    }

    #[tokio::test]
    async fn test_fetch_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/emojis/9.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/emojis/10.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let bytes = api
            .fetch_bytes(&format!("{}/emojis/9.png", server.uri()))
            .await
            .unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);

        let err = api
            .fetch_bytes(&format!("{}/emojis/10.png", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch { status: 404, .. }));
    }

    #[test]
    fn test_truncate() {
        let long = "é".repeat(600);
        assert_eq!(truncate(&long).chars().count(), 500);
        assert_eq!(truncate("short"), "short");
    }
}
