//! Provider registry and the code-for-identity exchange.

use crate::client::OAuthClient;
use crate::config::ProviderConfig;
use crate::errors::*;
use crate::providers::ProviderKind;
use chatterly_identity::Identity;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Registry of configured providers.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct IdentityFederator {
    providers: HashMap<ProviderKind, ProviderConfig>,
    client: OAuthClient,
}

impl IdentityFederator {
    /// Register `configs`, rejecting duplicates and unusable endpoints.
    pub fn new(configs: Vec<ProviderConfig>, timeout: Duration) -> Result<Self> {
        let client = OAuthClient::new(timeout)?;
        let mut providers = HashMap::with_capacity(configs.len());

        for config in configs {
            // Fails fast on a malformed authorization endpoint
            client.build_auth_url(&config, config.kind.as_str())?;

            let kind = config.kind;
            if providers.insert(kind, config).is_some() {
                return Err(OAuthError::InvalidConfig(format!(
                    "provider {} configured twice",
                    kind
                )));
            }
            info!(provider = %kind, "OAuth provider registered");
        }

        Ok(Self { providers, client })
    }

    /// Authorization URL for `provider`; the provider name doubles as `state`.
    pub fn redirect_url(&self, provider: &str) -> Result<String> {
        let config = self.lookup(provider)?;
        self.client.build_auth_url(config, config.kind.as_str())
    }

    /// Trade an authorization code for the user's normalized identity.
    ///
    /// Unsupported providers are rejected before any network call.
    pub async fn exchange(&self, provider: &str, code: &str) -> Result<Identity> {
        let config = self.lookup(provider)?;
        let kind = config.kind;

        let access_token = self.client.exchange_code(config, code).await.map_err(|e| {
            warn!(
                provider = %kind,
                code = %code_fingerprint(code),
                error = %e,
                "OAuth code exchange failed"
            );
            e
        })?;

        let body = self
            .client
            .fetch_user_info(config, &access_token)
            .await
            .map_err(|e| {
                warn!(provider = %kind, error = %e, "Fetching user info failed");
                e
            })?;

        let identity = kind.decode(&body).map_err(|e| {
            warn!(provider = %kind, error = %e, "Decoding user info failed");
            e
        })?;

        debug!(provider = %kind, code = %code_fingerprint(code), "OAuth identity resolved");
        Ok(identity)
    }

    fn lookup(&self, provider: &str) -> Result<&ProviderConfig> {
        ProviderKind::from_name(provider)
            .and_then(|kind| self.providers.get(&kind))
            .ok_or_else(|| OAuthError::UnsupportedProvider(provider.to_string()))
    }
}

/// Short, non-reversible tag for correlating an authorization code in logs
fn code_fingerprint(code: &str) -> String {
    hex::encode(&Sha256::digest(code.as_bytes())[..4])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mock_config(kind: ProviderKind, server: &MockServer) -> ProviderConfig {
        let base = server.uri();
        ProviderConfig::new(kind, "client-id", "client-secret", "http://localhost/callback")
            .with_endpoints(format!("{}/authorize", base), format!("{}/token", base))
            .with_user_info_url(format!("{}/user", base))
    }

    fn federator(configs: Vec<ProviderConfig>) -> IdentityFederator {
        IdentityFederator::new(configs, Duration::from_secs(5)).unwrap()
    }

    async fn mount_token(server: &MockServer, status: u16, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=the-code"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mount_user(server: &MockServer, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", "Bearer provider-token"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_exchange_github() {
        let server = MockServer::start().await;
        mount_token(
            &server,
            200,
            serde_json::json!({"access_token": "provider-token", "token_type": "bearer"}),
        )
        .await;
        mount_user(
            &server,
            200,
            serde_json::json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "avatar_url": "https://avatars.example.com/ada"
            }),
        )
        .await;

        let federator = federator(vec![mock_config(ProviderKind::Github, &server)]);
        let identity = federator.exchange("github", "the-code").await.unwrap();

        assert_eq!(identity.name, "Ada Lovelace");
        assert_eq!(identity.email, "ada@example.com");
        assert_eq!(identity.avatar_url, "https://avatars.example.com/ada");
    }

    #[tokio::test]
    async fn test_exchange_yandex_templates_avatar() {
        let server = MockServer::start().await;
        mount_token(&server, 200, serde_json::json!({"access_token": "provider-token"})).await;
        mount_user(
            &server,
            200,
            serde_json::json!({
                "real_name": "Ada",
                "default_email": "ada@yandex.ru",
                "default_avatar_id": "123/abc"
            }),
        )
        .await;

        let federator = federator(vec![mock_config(ProviderKind::Yandex, &server)]);
        let identity = federator.exchange("yandex", "the-code").await.unwrap();

        assert_eq!(
            identity.avatar_url,
            "https://avatars.yandex.net/get-yapic/123/abc/islands-200"
        );
    }

    #[tokio::test]
    async fn test_unknown_provider_makes_no_network_call() {
        let server = MockServer::start().await;
        let federator = federator(vec![mock_config(ProviderKind::Github, &server)]);

        let err = federator.exchange("facebook", "the-code").await.unwrap_err();
        assert!(matches!(err, OAuthError::UnsupportedProvider(name) if name == "facebook"));

        let err = federator.redirect_url("facebook").unwrap_err();
        assert!(matches!(err, OAuthError::UnsupportedProvider(_)));

        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_unsupported() {
        let server = MockServer::start().await;
        let federator = federator(vec![mock_config(ProviderKind::Github, &server)]);

        let err = federator.exchange("google", "the-code").await.unwrap_err();
        assert!(matches!(err, OAuthError::UnsupportedProvider(_)));
    }

    #[tokio::test]
    async fn test_providers_are_isolated() {
        let github = MockServer::start().await;
        let gitlab = MockServer::start().await;
        mount_token(&gitlab, 200, serde_json::json!({"access_token": "provider-token"})).await;
        mount_user(
            &gitlab,
            200,
            serde_json::json!({"name": "Ada", "email": "ada@example.com", "avatar_url": ""}),
        )
        .await;

        let federator = federator(vec![
            mock_config(ProviderKind::Github, &github),
            mock_config(ProviderKind::Gitlab, &gitlab),
        ]);
        federator.exchange("gitlab", "the-code").await.unwrap();

        assert!(github.received_requests().await.unwrap().is_empty());
        assert_eq!(gitlab.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_token_endpoint_error_is_exchange_failure() {
        let server = MockServer::start().await;
        mount_token(&server, 400, serde_json::json!({"error": "invalid_grant"})).await;

        let federator = federator(vec![mock_config(ProviderKind::Gitlab, &server)]);
        let err = federator.exchange("gitlab", "the-code").await.unwrap_err();

        assert!(matches!(err, OAuthError::ExchangeFailed(_)));
    }

    #[tokio::test]
    async fn test_token_error_in_ok_body_is_exchange_failure() {
        let server = MockServer::start().await;
        mount_token(
            &server,
            200,
            serde_json::json!({"error": "bad_verification_code"}),
        )
        .await;

        let federator = federator(vec![mock_config(ProviderKind::Github, &server)]);
        let err = federator.exchange("github", "the-code").await.unwrap_err();

        assert!(matches!(err, OAuthError::ExchangeFailed(_)));
    }

    #[tokio::test]
    async fn test_user_info_non_200_is_fetch_failure() {
        let server = MockServer::start().await;
        mount_token(&server, 200, serde_json::json!({"access_token": "provider-token"})).await;
        mount_user(&server, 401, serde_json::json!({"message": "Bad credentials"})).await;

        let federator = federator(vec![mock_config(ProviderKind::Github, &server)]);
        let err = federator.exchange("github", "the-code").await.unwrap_err();

        assert!(matches!(err, OAuthError::UserInfoFetchFailed(_)));
    }

    #[tokio::test]
    async fn test_user_info_other_2xx_is_fetch_failure() {
        let server = MockServer::start().await;
        mount_token(&server, 200, serde_json::json!({"access_token": "provider-token"})).await;
        mount_user(&server, 202, serde_json::json!({"email": "ada@example.com"})).await;

        let federator = federator(vec![mock_config(ProviderKind::Google, &server)]);
        let err = federator.exchange("google", "the-code").await.unwrap_err();

        assert!(matches!(err, OAuthError::UserInfoFetchFailed(_)));
    }

    #[tokio::test]
    async fn test_user_info_garbage_is_decode_failure() {
        let server = MockServer::start().await;
        mount_token(&server, 200, serde_json::json!({"access_token": "provider-token"})).await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let federator = federator(vec![mock_config(ProviderKind::Google, &server)]);
        let err = federator.exchange("google", "the-code").await.unwrap_err();

        assert!(matches!(err, OAuthError::UserInfoDecodeFailed(_)));
    }

    #[test]
    fn test_redirect_url_uses_provider_as_state() {
        let config = ProviderConfig::new(ProviderKind::Gitlab, "id", "secret", "http://cb");
        let federator = federator(vec![config]);

        let url = federator.redirect_url("gitlab").unwrap();
        assert!(url.starts_with("https://gitlab.com/oauth/authorize?"));
        assert!(url.contains("state=gitlab"));
        assert!(url.contains("client_id=id"));
    }

    #[test]
    fn test_duplicate_provider_is_rejected() {
        let configs = vec![
            ProviderConfig::new(ProviderKind::Google, "a", "s", "http://cb"),
            ProviderConfig::new(ProviderKind::Google, "b", "s", "http://cb"),
        ];

        let err = IdentityFederator::new(configs, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, OAuthError::InvalidConfig(_)));
    }

    #[test]
    fn test_code_fingerprint_hides_code() {
        let fingerprint = code_fingerprint("super-secret-code");

        assert_eq!(fingerprint.len(), 8);
        assert!(!fingerprint.contains("secret"));
        assert_eq!(fingerprint, code_fingerprint("super-secret-code"));
    }
}
