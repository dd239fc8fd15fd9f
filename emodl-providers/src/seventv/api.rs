//! 7TV API client.

use emodl_core::UserScope;
use emodl_fetch::{FetchError, HttpClient};
use tracing::{debug, instrument};

use super::model::{SevenTvConnection, SevenTvEmote, SevenTvEmoteSet, SevenTvUser};

// ============================================================================
// Constants
// ============================================================================

/// 7TV API base URL (version 3).
pub const SEVENTV_API_BASE: &str = "https://7tv.io/v3";

/// Emote set endpoint, followed by `/{setID}`.
const EMOTE_SETS_ENDPOINT: &str = "/emote-sets";

/// Users endpoint, followed by `/{id}` or `/{platform}/{platformID}`.
const USERS_ENDPOINT: &str = "/users";

/// Id of the global emote set.
const GLOBAL_SET_ID: &str = "global";

// ============================================================================
// API Client
// ============================================================================

/// 7TV API client.
#[derive(Debug, Clone)]
pub struct SevenTvApiClient {
    base_url: String,
}

impl SevenTvApiClient {
    /// Creates a client for the public API.
    pub fn new() -> Self {
        Self::with_base_url(SEVENTV_API_BASE)
    }

    /// Creates a client for a custom API base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetches one emote set.
    #[instrument(skip(self, http))]
    pub async fn emote_set(
        &self,
        http: &HttpClient,
        set_id: &str,
    ) -> Result<SevenTvEmoteSet, FetchError> {
        if set_id.is_empty() {
            return Err(FetchError::InvalidScope(
                "7TV emote set lookup needs a set id".to_string(),
            ));
        }

        let url = format!("{}{EMOTE_SETS_ENDPOINT}/{set_id}", self.base_url);
        let set: SevenTvEmoteSet = http.get_json(&url, "7TV emote set").await?;
        debug!(set = %set.name, count = set.emotes.len(), "Fetched 7TV emote set");
        Ok(set)
    }

    /// Fetches the emotes of one set, under their in-set names.
    pub async fn set_emotes(
        &self,
        http: &HttpClient,
        set_id: &str,
    ) -> Result<Vec<SevenTvEmote>, FetchError> {
        Ok(self.emote_set(http, set_id).await?.into_emotes())
    }

    /// Fetches the global emote set.
    pub async fn global_emotes(&self, http: &HttpClient) -> Result<Vec<SevenTvEmote>, FetchError> {
        self.set_emotes(http, GLOBAL_SET_ID).await
    }

    /// Resolves a user to the ids of their active emote sets.
    ///
    /// A platform scope yields at most one set; an account scope yields the
    /// distinct sets of every linked platform.
    #[instrument(skip(self, http))]
    pub async fn user_set_ids(
        &self,
        http: &HttpClient,
        scope: &UserScope,
    ) -> Result<Vec<String>, FetchError> {
        let ids = match scope {
            UserScope::Platform {
                platform,
                platform_id,
            } => {
                if platform.is_empty() || platform_id.is_empty() {
                    return Err(FetchError::InvalidScope(
                        "7TV user lookup needs both platform and platform id".to_string(),
                    ));
                }
                let url = format!("{}{USERS_ENDPOINT}/{platform}/{platform_id}", self.base_url);
                let connection: SevenTvConnection = http.get_json(&url, "7TV user").await?;
                connection.set_id().map(str::to_string).into_iter().collect()
            }
            UserScope::Account { id } => {
                if id.is_empty() {
                    return Err(FetchError::InvalidScope(
                        "7TV user lookup needs an account id".to_string(),
                    ));
                }
                let url = format!("{}{USERS_ENDPOINT}/{id}", self.base_url);
                let user: SevenTvUser = http.get_json(&url, "7TV user").await?;
                user.emote_set_ids()
            }
        };

        debug!(sets = ?ids, "Resolved 7TV emote sets");
        Ok(ids)
    }
}

impl Default for SevenTvApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GLOBAL_BODY: &str = r#"{
        "id": "global",
        "name": "Global Emotes",
        "emotes": [
            {"id": "01F6MQ33FG000FFJ97ZB8MWV52", "name": "EZ", "data": {
                "id": "01F6MQ33FG000FFJ97ZB8MWV52", "name": "EZ", "animated": false,
                "host": {"url": "//cdn.7tv.app/emote/01F6MQ33FG000FFJ97ZB8MWV52", "files": [
                    {"name": "1x.webp", "static_name": "1x_static.webp", "width": 32, "height": 32, "frame_count": 1, "size": 512, "format": "WEBP"}
                ]}
            }}
        ]
    }"#;

    #[tokio::test]
    async fn test_global_emotes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/emote-sets/global"))
            .respond_with(ResponseTemplate::new(200).set_body_string(GLOBAL_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let client = SevenTvApiClient::with_base_url(server.uri());
        let emotes = client.global_emotes(&HttpClient::new()).await.unwrap();

        assert_eq!(emotes.len(), 1);
        assert_eq!(emotes[0].name, "EZ");
        assert_eq!(emotes[0].host.files[0].size, 512);
    }

    #[tokio::test]
    async fn test_platform_user_set_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/twitch/1048391821"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"id":"1048391821","platform":"TWITCH","emote_set_id":"01JSG36904T5GM79JJXBVTSFKS","emote_set":{"id":"01JSG36904T5GM79JJXBVTSFKS"}}"#,
            ))
            .mount(&server)
            .await;

        let client = SevenTvApiClient::with_base_url(server.uri());
        let ids = client
            .user_set_ids(&HttpClient::new(), &UserScope::platform("twitch", "1048391821"))
            .await
            .unwrap();

        assert_eq!(ids, vec!["01JSG36904T5GM79JJXBVTSFKS"]);
    }

    #[tokio::test]
    async fn test_account_set_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/60ae3e98b2ecb0150535c6b7"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"id":"60ae3e98b2ecb0150535c6b7","connections":[{"emote_set_id":"a"},{"emote_set_id":"b"},{"emote_set_id":"a"}]}"#,
            ))
            .mount(&server)
            .await;

        let client = SevenTvApiClient::with_base_url(server.uri());
        let ids = client
            .user_set_ids(&HttpClient::new(), &UserScope::account("60ae3e98b2ecb0150535c6b7"))
            .await
            .unwrap();

        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_scope_parts_are_rejected() {
        let client = SevenTvApiClient::new();
        let http = HttpClient::new();

        for scope in [
            UserScope::platform("twitch", ""),
            UserScope::platform("", "1048391821"),
            UserScope::account(""),
        ] {
            let err = client.user_set_ids(&http, &scope).await.unwrap_err();
            assert!(matches!(err, FetchError::InvalidScope(_)), "{scope:?}");
        }
    }

    #[tokio::test]
    async fn test_unknown_set_error_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string(r#"{"error":{"message":"Unknown Emote Set"}}"#),
            )
            .mount(&server)
            .await;

        let client = SevenTvApiClient::with_base_url(server.uri());
        let err = client.emote_set(&HttpClient::new(), "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown Emote Set");
    }
}
