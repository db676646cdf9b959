//! Credential cookies.

use axum::http::{header, HeaderMap, HeaderValue};
use chatterly_sessions::TokenPair;

pub const ACCESS_TOKEN_COOKIE: &str = "X-Access-Token";
pub const REFRESH_TOKEN_COOKIE: &str = "X-Refresh-Token";

/// Read the credential pair from the request's `Cookie` headers.
///
/// A missing cookie reads as an empty string.
pub fn read_token_pair(headers: &HeaderMap) -> TokenPair {
    let mut pair = TokenPair {
        access: String::new(),
        refresh: String::new(),
    };

    let cookies = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|cookie| cookie.trim().split_once('='));

    for (name, value) in cookies {
        match name {
            ACCESS_TOKEN_COOKIE => pair.access = value.to_string(),
            REFRESH_TOKEN_COOKIE => pair.refresh = value.to_string(),
            _ => {}
        }
    }

    pair
}

/// Cookie attributes shared by both credentials
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub domain: String,
    pub access_max_age: u64,
    pub refresh_max_age: u64,
}

impl CookieSettings {
    /// `Set-Cookie` values storing `pair`
    pub fn store(&self, pair: &TokenPair) -> [HeaderValue; 2] {
        [
            self.build(ACCESS_TOKEN_COOKIE, &pair.access, self.access_max_age),
            self.build(REFRESH_TOKEN_COOKIE, &pair.refresh, self.refresh_max_age),
        ]
    }

    /// `Set-Cookie` values deleting both credentials
    pub fn clear(&self) -> [HeaderValue; 2] {
        [
            self.build(ACCESS_TOKEN_COOKIE, "", 0),
            self.build(REFRESH_TOKEN_COOKIE, "", 0),
        ]
    }

    /// Append the cookies to a response's headers
    pub fn apply(headers: &mut HeaderMap, cookies: [HeaderValue; 2]) {
        for cookie in cookies {
            headers.append(header::SET_COOKIE, cookie);
        }
    }

    fn build(&self, name: &str, value: &str, max_age: u64) -> HeaderValue {
        let mut cookie = format!("{}={}; Path=/; Max-Age={}", name, value, max_age);
        if !self.domain.is_empty() {
            cookie.push_str("; Domain=");
            cookie.push_str(&self.domain);
        }
        cookie.push_str("; Secure; HttpOnly");

        // Tokens are base64url; only a malformed cookie domain can fail here
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}
