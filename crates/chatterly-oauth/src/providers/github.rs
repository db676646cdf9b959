//! GitHub OAuth provider.
//!
//! GitHub only returns JSON from its token endpoint when asked to, and may
//! report `null` for a private email or an unset name.

use chatterly_identity::Identity;
use serde::Deserialize;

pub const AUTH_URL: &str = "https://github.com/login/oauth/authorize";
pub const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
pub const USER_INFO_URL: &str = "https://api.github.com/user";
pub const SCOPES: &[&str] = &["read:user", "user:email"];

#[derive(Debug, Deserialize)]
pub struct GithubPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl GithubPayload {
    pub fn into_identity(self) -> Identity {
        Identity {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            avatar_url: self.avatar_url.unwrap_or_default(),
        }
    }
}
