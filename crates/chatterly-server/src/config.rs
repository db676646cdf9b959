use anyhow::{Context, Result};
use chatterly_oauth::{ProviderConfig, ProviderKind};
use chatterly_sessions::{ChannelTokenConfig, SessionTokenConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_address: SocketAddr,

    /// Path to RocksDB database
    pub database_path: PathBuf,

    /// `Domain` attribute of the credential cookies; empty means host-only
    pub cookie_domain: String,

    /// Origins allowed to make credentialed cross-origin requests
    pub allow_origins: Vec<String>,

    /// Upper bound for each request to an identity provider
    pub request_timeout: Duration,

    /// Access/refresh token settings
    pub user_tokens: SessionTokenConfig,

    /// Channel token settings
    pub chat_tokens: ChannelTokenConfig,

    /// Providers that have a client id configured
    pub providers: Vec<ProviderConfig>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let bind_address = parse_or(&var, "BIND_ADDRESS", "127.0.0.1:8080")?;

        let database_path = var("DATABASE_PATH")
            .unwrap_or_else(|| "./data/chatterly.db".to_string())
            .into();

        let cookie_domain = var("COOKIE_DOMAIN").unwrap_or_default();

        let allow_origins = var("ALLOW_ORIGINS")
            .map(|origins| split_list(&origins))
            .unwrap_or_default();

        let request_timeout =
            Duration::from_secs(parse_or(&var, "REQUEST_TIMEOUT_SECONDS", "10")?);

        let user_secret = var("JWT_USER_SECRET_KEY")
            .context("JWT_USER_SECRET_KEY environment variable required")?;
        // 15 minutes
        let access_token_ttl = parse_or(&var, "JWT_USER_ACCESS_TOKEN_TTL_SECONDS", "900")?;
        // 30 days
        let refresh_token_ttl = parse_or(&var, "JWT_USER_REFRESH_TOKEN_TTL_SECONDS", "2592000")?;
        if access_token_ttl >= refresh_token_ttl {
            anyhow::bail!(
                "JWT_USER_ACCESS_TOKEN_TTL_SECONDS ({}) must be lower than \
                 JWT_USER_REFRESH_TOKEN_TTL_SECONDS ({})",
                access_token_ttl,
                refresh_token_ttl
            );
        }
        let user_tokens = SessionTokenConfig::new(user_secret.into_bytes())
            .with_ttls(access_token_ttl, refresh_token_ttl);

        let chat_secret = var("JWT_CHAT_SECRET_KEY")
            .context("JWT_CHAT_SECRET_KEY environment variable required")?;
        let chat_tokens = ChannelTokenConfig::new(chat_secret.into_bytes())
            .with_ttl(parse_or(&var, "JWT_CHAT_TOKEN_TTL_SECONDS", "60")?);

        let mut providers = Vec::new();
        for kind in ProviderKind::ALL {
            if let Some(provider) = provider_from_vars(&var, kind)? {
                providers.push(provider);
            }
        }

        Ok(Config {
            bind_address,
            database_path,
            cookie_domain,
            allow_origins,
            request_timeout,
            user_tokens,
            chat_tokens,
            providers,
        })
    }
}

/// A provider is only registered once its client id is set.
fn provider_from_vars<F>(var: &F, kind: ProviderKind) -> Result<Option<ProviderConfig>>
where
    F: Fn(&str) -> Option<String>,
{
    let prefix = format!("OAUTH_{}", kind.as_str().to_ascii_uppercase());
    let key = |suffix: &str| format!("{}_{}", prefix, suffix);

    let Some(client_id) = var(&key("CLIENT_ID")) else {
        return Ok(None);
    };
    let required = |suffix: &str| {
        var(&key(suffix)).with_context(|| {
            format!("{} required when {} is set", key(suffix), key("CLIENT_ID"))
        })
    };
    let client_secret = required("CLIENT_SECRET")?;
    let redirect_url = required("REDIRECT_URL")?;

    let mut provider = ProviderConfig::new(kind, client_id, client_secret, redirect_url);
    if let Some(scopes) = var(&key("SCOPES")) {
        provider = provider.with_scopes(split_list(&scopes));
    }
    if let Some(endpoint) = var(&key("USER_ENDPOINT")) {
        provider = provider.with_user_info_url(endpoint);
    }

    Ok(Some(provider))
}

fn parse_or<F, T>(var: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .unwrap_or_else(|| default.to_string())
        .parse()
        .with_context(|| format!("invalid value for {}", key))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const SECRETS: [(&str, &str); 2] = [
        ("JWT_USER_SECRET_KEY", "user-secret"),
        ("JWT_CHAT_SECRET_KEY", "chat-secret"),
    ];

    #[test]
    fn test_defaults() {
        let config = load(&SECRETS).unwrap();

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_path, PathBuf::from("./data/chatterly.db"));
        assert!(config.cookie_domain.is_empty());
        assert!(config.allow_origins.is_empty());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.user_tokens.access_token_ttl, 900);
        assert_eq!(config.user_tokens.refresh_token_ttl, 2_592_000);
        assert_eq!(config.chat_tokens.token_ttl, 60);
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_secrets_are_required() {
        assert!(load(&[("JWT_CHAT_SECRET_KEY", "chat")]).is_err());
        assert!(load(&[("JWT_USER_SECRET_KEY", "user")]).is_err());
    }

    #[test]
    fn test_access_ttl_must_be_lower_than_refresh_ttl() {
        let mut vars = SECRETS.to_vec();
        vars.push(("JWT_USER_ACCESS_TOKEN_TTL_SECONDS", "3600"));
        vars.push(("JWT_USER_REFRESH_TOKEN_TTL_SECONDS", "3600"));

        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let mut vars = SECRETS.to_vec();
        vars.push(("JWT_CHAT_TOKEN_TTL_SECONDS", "soon"));

        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("JWT_CHAT_TOKEN_TTL_SECONDS"));
    }

    #[test]
    fn test_provider_registered_only_with_client_id() {
        let mut vars = SECRETS.to_vec();
        vars.push(("OAUTH_GITHUB_CLIENT_ID", "gh-id"));
        vars.push(("OAUTH_GITHUB_CLIENT_SECRET", "gh-secret"));
        vars.push(("OAUTH_GITHUB_REDIRECT_URL", "http://localhost/callback"));
        vars.push(("OAUTH_GITHUB_SCOPES", "read:user, user:email"));
        vars.push(("OAUTH_GOOGLE_CLIENT_SECRET", "orphan"));

        let config = load(&vars).unwrap();
        assert_eq!(config.providers.len(), 1);

        let github = &config.providers[0];
        assert_eq!(github.kind, ProviderKind::Github);
        assert_eq!(github.client_id, "gh-id");
        assert_eq!(github.scopes, vec!["read:user".to_string(), "user:email".to_string()]);
        assert_eq!(github.user_info_url, ProviderKind::Github.user_info_url());
    }

    #[test]
    fn test_provider_user_endpoint_override() {
        let mut vars = SECRETS.to_vec();
        vars.push(("OAUTH_YANDEX_CLIENT_ID", "ya-id"));
        vars.push(("OAUTH_YANDEX_CLIENT_SECRET", "ya-secret"));
        vars.push(("OAUTH_YANDEX_REDIRECT_URL", "http://localhost/callback"));
        vars.push(("OAUTH_YANDEX_USER_ENDPOINT", "https://login.yandex.ru/info"));

        let config = load(&vars).unwrap();
        assert_eq!(config.providers[0].user_info_url, "https://login.yandex.ru/info");
    }

    #[test]
    fn test_provider_without_secret_is_rejected() {
        let mut vars = SECRETS.to_vec();
        vars.push(("OAUTH_GITLAB_CLIENT_ID", "gl-id"));

        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("OAUTH_GITLAB_CLIENT_SECRET"));
    }

    #[test]
    fn test_allow_origins_list() {
        let mut vars = SECRETS.to_vec();
        vars.push(("ALLOW_ORIGINS", "http://localhost:3000, https://chatterly.app,"));

        let config = load(&vars).unwrap();
        assert_eq!(
            config.allow_origins,
            vec!["http://localhost:3000".to_string(), "https://chatterly.app".to_string()]
        );
    }
}
