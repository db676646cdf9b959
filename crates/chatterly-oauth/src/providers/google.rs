//! Google OAuth provider.

use chatterly_identity::Identity;
use serde::Deserialize;

pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const USER_INFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/userinfo.profile",
];

/// `oauth2/v2/userinfo` document
#[derive(Debug, Deserialize)]
pub struct GooglePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl GooglePayload {
    pub fn into_identity(self) -> Identity {
        Identity {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            avatar_url: self.picture.unwrap_or_default(),
        }
    }
}
