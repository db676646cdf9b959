//! Supported identity providers.
//!
//! Each provider module owns the shape of its user-info document and the
//! normalization of that document into an [`Identity`].

pub mod github;
pub mod gitlab;
pub mod google;
pub mod yandex;

use crate::errors::*;
use chatterly_identity::Identity;
use serde::de::DeserializeOwned;
use std::fmt;

/// The closed set of supported providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Google,
    Yandex,
    Gitlab,
    Github,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Google,
        ProviderKind::Yandex,
        ProviderKind::Gitlab,
        ProviderKind::Github,
    ];

    /// Lower-case name used in routes and as the OAuth `state`
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::Yandex => "yandex",
            ProviderKind::Gitlab => "gitlab",
            ProviderKind::Github => "github",
        }
    }

    /// Exact, case-sensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn auth_url(&self) -> &'static str {
        match self {
            ProviderKind::Google => google::AUTH_URL,
            ProviderKind::Yandex => yandex::AUTH_URL,
            ProviderKind::Gitlab => gitlab::AUTH_URL,
            ProviderKind::Github => github::AUTH_URL,
        }
    }

    pub fn token_url(&self) -> &'static str {
        match self {
            ProviderKind::Google => google::TOKEN_URL,
            ProviderKind::Yandex => yandex::TOKEN_URL,
            ProviderKind::Gitlab => gitlab::TOKEN_URL,
            ProviderKind::Github => github::TOKEN_URL,
        }
    }

    pub fn user_info_url(&self) -> &'static str {
        match self {
            ProviderKind::Google => google::USER_INFO_URL,
            ProviderKind::Yandex => yandex::USER_INFO_URL,
            ProviderKind::Gitlab => gitlab::USER_INFO_URL,
            ProviderKind::Github => github::USER_INFO_URL,
        }
    }

    pub fn default_scopes(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::Google => google::SCOPES,
            ProviderKind::Yandex => yandex::SCOPES,
            ProviderKind::Gitlab => gitlab::SCOPES,
            ProviderKind::Github => github::SCOPES,
        }
    }

    /// Normalize a raw user-info document into an [`Identity`].
    ///
    /// A document without an email is rejected: the email is half of the
    /// directory's de-duplication key.
    pub fn decode(&self, body: &[u8]) -> Result<Identity> {
        let identity = match self {
            ProviderKind::Google => parse::<google::GooglePayload>(body)?.into_identity(),
            ProviderKind::Yandex => parse::<yandex::YandexPayload>(body)?.into_identity(),
            ProviderKind::Gitlab => parse::<gitlab::GitlabPayload>(body)?.into_identity(),
            ProviderKind::Github => parse::<github::GithubPayload>(body)?.into_identity(),
        };

        if identity.email.is_empty() {
            return Err(OAuthError::UserInfoDecodeFailed(format!(
                "{} user info has no email",
                self
            )));
        }
        Ok(identity)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| OAuthError::UserInfoDecodeFailed(e.to_string()))
}
