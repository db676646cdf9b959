//! Yandex OAuth provider.
//!
//! Yandex answers with an avatar id rather than a URL.

use chatterly_identity::Identity;
use serde::Deserialize;

pub const AUTH_URL: &str = "https://oauth.yandex.com/authorize";
pub const TOKEN_URL: &str = "https://oauth.yandex.com/token";
pub const USER_INFO_URL: &str = "https://login.yandex.ru/info?format=json";
pub const SCOPES: &[&str] = &["login:email", "login:info", "login:avatar"];

#[derive(Debug, Deserialize)]
pub struct YandexPayload {
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub default_email: Option<String>,
    #[serde(default)]
    pub default_avatar_id: Option<String>,
}

/// Public 200px avatar for a Yandex avatar id
pub fn avatar_url(avatar_id: &str) -> String {
    format!("https://avatars.yandex.net/get-yapic/{}/islands-200", avatar_id)
}

impl YandexPayload {
    pub fn into_identity(self) -> Identity {
        let avatar_url = match self.default_avatar_id.as_deref() {
            Some(id) if !id.is_empty() => avatar_url(id),
            _ => String::new(),
        };

        Identity {
            name: self.real_name.unwrap_or_default(),
            email: self.default_email.unwrap_or_default(),
            avatar_url,
        }
    }
}
