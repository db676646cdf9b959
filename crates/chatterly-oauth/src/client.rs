//! Authorization-code grant over HTTP.

use crate::config::ProviderConfig;
use crate::errors::*;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Token endpoint answer. Only the access token is used.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// HTTP client for provider interactions
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http_client: Client,
}

impl OAuthClient {
    /// Client whose every request is bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("chatterly/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OAuthError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// Build authorization URL
    pub fn build_auth_url(&self, config: &ProviderConfig, state: &str) -> Result<String> {
        let mut url = Url::parse(&config.auth_url)
            .map_err(|e| OAuthError::InvalidConfig(format!("Invalid auth URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("client_id", &config.client_id)
            .append_pair("redirect_uri", &config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &config.scopes.join(" "))
            .append_pair("state", state);

        Ok(url.to_string())
    }

    /// Exchange an authorization code for a provider access token
    pub async fn exchange_code(&self, config: &ProviderConfig, code: &str) -> Result<String> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_url.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(&config.token_url)
            .header(header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| OAuthError::ExchangeFailed(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OAuthError::ExchangeFailed(format!(
                "Token endpoint answered {}",
                status
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            OAuthError::ExchangeFailed(format!("Failed to parse token response: {}", e))
        })?;

        if token.access_token.is_empty() {
            return Err(OAuthError::ExchangeFailed(
                "Token response carried an empty access token".to_string(),
            ));
        }
        Ok(token.access_token)
    }

    /// Fetch the raw user-info document. Anything but `200 OK` is a failure.
    pub async fn fetch_user_info(
        &self,
        config: &ProviderConfig,
        access_token: &str,
    ) -> Result<Vec<u8>> {
        let response = self
            .http_client
            .get(&config.user_info_url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                OAuthError::UserInfoFetchFailed(format!("User info request failed: {}", e))
            })?;

        if response.status() != StatusCode::OK {
            return Err(OAuthError::UserInfoFetchFailed(format!(
                "User info endpoint answered {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| {
                OAuthError::UserInfoFetchFailed(format!("Failed to read user info: {}", e))
            })?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderKind;

    #[test]
    fn test_build_auth_url() {
        let config = ProviderConfig::new(
            ProviderKind::Google,
            "test_client",
            "test_secret",
            "http://localhost/callback",
        )
        .with_scopes(vec!["email".to_string(), "profile".to_string()]);

        let client = OAuthClient::new(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&client.build_auth_url(&config, "google").unwrap()).unwrap();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert!(query.contains(&("client_id".to_string(), "test_client".to_string())));
        assert!(query.contains(&(
            "redirect_uri".to_string(),
            "http://localhost/callback".to_string()
        )));
        assert!(query.contains(&("response_type".to_string(), "code".to_string())));
        assert!(query.contains(&("scope".to_string(), "email profile".to_string())));
        assert!(query.contains(&("state".to_string(), "google".to_string())));
    }

    #[test]
    fn test_build_auth_url_keeps_existing_query() {
        let config = ProviderConfig::new(ProviderKind::Yandex, "id", "secret", "http://cb")
            .with_endpoints("https://oauth.example.com/authorize?force_confirm=yes", "http://t");

        let client = OAuthClient::new(Duration::from_secs(5)).unwrap();
        let url = client.build_auth_url(&config, "yandex").unwrap();

        assert!(url.starts_with("https://oauth.example.com/authorize?force_confirm=yes&"));
    }

    #[test]
    fn test_build_auth_url_rejects_bad_endpoint() {
        let config = ProviderConfig::new(ProviderKind::Github, "id", "secret", "http://cb")
            .with_endpoints("not a url", "http://t");

        let client = OAuthClient::new(Duration::from_secs(5)).unwrap();
        let err = client.build_auth_url(&config, "github").unwrap_err();
        assert!(matches!(err, OAuthError::InvalidConfig(_)));
    }
}
