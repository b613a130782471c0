//! Session context for the presentation layer
//!
//! The access gate is an explicit value passed to handlers, not ambient
//! state. The aggregator never sees it. When no password is configured the
//! gate is open and every session counts as authenticated.

use patoweb_utils::short_hash;

/// Cookie name carrying the session token
pub const SESSION_COOKIE: &str = "patoweb_session";

/// Per-request session context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
}

impl Session {
    /// Session token issued after a successful password check
    pub fn token_for(password: &str) -> String {
        short_hash(password)
    }

    /// Build the session from a request's Cookie header value
    ///
    /// `expected_password` is the configured shared secret; `None` means no
    /// gate is configured.
    pub fn from_cookie(cookie_header: Option<&str>, expected_password: Option<&str>) -> Self {
        let expected = match expected_password {
            Some(p) => Self::token_for(p),
            None => return Session { authenticated: true },
        };

        let authenticated = cookie_header
            .map(|header| {
                header.split(';').any(|pair| {
                    let mut parts = pair.trim().splitn(2, '=');
                    parts.next() == Some(SESSION_COOKIE) && parts.next() == Some(expected.as_str())
                })
            })
            .unwrap_or(false);

        Session { authenticated }
    }

    /// Check a submitted password against the configured secret
    pub fn password_matches(submitted: &str, expected_password: &str) -> bool {
        submitted == expected_password
    }
}
