//! GitLab OAuth provider.

use chatterly_identity::Identity;
use serde::Deserialize;

pub const AUTH_URL: &str = "https://gitlab.com/oauth/authorize";
pub const TOKEN_URL: &str = "https://gitlab.com/oauth/token";
pub const USER_INFO_URL: &str = "https://gitlab.com/api/v4/user";
pub const SCOPES: &[&str] = &["read_user"];

#[derive(Debug, Deserialize)]
pub struct GitlabPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl GitlabPayload {
    pub fn into_identity(self) -> Identity {
        Identity {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            avatar_url: self.avatar_url.unwrap_or_default(),
        }
    }
}
