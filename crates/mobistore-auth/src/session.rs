//! Local session state.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use mobistore_commerce::checkout::AuthContext;
use mobistore_commerce::ids::UserId;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AuthError;

/// Proof of a login, kept on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Opaque token value.
    pub value: String,
    /// Logged-in user.
    pub user: UserId,
    /// Unix timestamp of login.
    pub issued_at: i64,
    /// Unix timestamp after which the token is void.
    pub expires_at: i64,
}

impl SessionToken {
    /// Check if the token is past its expiry at `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// The session of one browser/terminal user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalSession {
    token: Option<SessionToken>,
    lifetime_secs: i64,
}

impl LocalSession {
    /// Default session duration: 7 days.
    pub const DEFAULT_DURATION_SECS: i64 = 7 * 24 * 60 * 60;

    /// A session nobody has logged into.
    pub fn anonymous() -> Self {
        Self {
            token: None,
            lifetime_secs: Self::DEFAULT_DURATION_SECS,
        }
    }

    /// Set the lifetime of tokens issued by later logins.
    pub fn with_lifetime(mut self, lifetime_secs: i64) -> Result<Self, AuthError> {
        if lifetime_secs <= 0 {
            return Err(AuthError::InvalidLifetime(lifetime_secs));
        }
        self.lifetime_secs = lifetime_secs;
        Ok(self)
    }

    /// Log `username` in, replacing any previous login.
    pub fn login(&mut self, username: &str) -> Result<&SessionToken, AuthError> {
        self.login_at(username, current_timestamp())
    }

    /// Log in with an explicit clock reading.
    pub fn login_at(&mut self, username: &str, now: i64) -> Result<&SessionToken, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }

        info!(user = username, "session login");
        let token = self.token.insert(SessionToken {
            value: generate_token(),
            user: UserId::new(username),
            issued_at: now,
            expires_at: now.saturating_add(self.lifetime_secs),
        });
        Ok(&*token)
    }

    /// Drop the login. Returns whether someone was logged in.
    pub fn logout(&mut self) -> bool {
        let had_token = self.token.take().is_some();
        if had_token {
            info!("session logout");
        }
        had_token
    }

    /// Current token, expired or not.
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// User of a still-valid login.
    pub fn user(&self) -> Option<&UserId> {
        self.valid_token(current_timestamp()).map(|t| &t.user)
    }

    /// Authentication check against an explicit clock reading.
    pub fn is_authenticated_at(&self, now: i64) -> bool {
        self.valid_token(now).is_some()
    }

    fn valid_token(&self, now: i64) -> Option<&SessionToken> {
        self.token.as_ref().filter(|t| !t.is_expired_at(now))
    }
}

impl Default for LocalSession {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl AuthContext for LocalSession {
    fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(current_timestamp())
    }
}

/// Random URL-safe token.
fn generate_token() -> String {
    let mut bytes = [0u8; 24];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_not_authenticated() {
        let session = LocalSession::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_login_then_logout() {
        let mut session = LocalSession::anonymous();
        session.login("ada").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.user().map(|u| u.as_str()), Some("ada"));

        assert!(session.logout());
        assert!(!session.is_authenticated());
        assert!(!session.logout());
    }

    #[test]
    fn test_login_rejects_blank_user() {
        let mut session = LocalSession::anonymous();
        assert!(matches!(session.login("   "), Err(AuthError::EmptyUsername)));
    }

    #[test]
    fn test_token_expires() {
        let mut session = LocalSession::anonymous().with_lifetime(60).unwrap();
        session.login_at("ada", 1_000).unwrap();

        assert!(session.is_authenticated_at(1_059));
        assert!(!session.is_authenticated_at(1_060));
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut session = LocalSession::anonymous();
        let first = session.login("ada").unwrap().value.clone();
        let second = session.login("ada").unwrap().value.clone();
        assert_ne!(first, second);
        assert_eq!(first.len(), 32);
    }

    #[test]
    fn test_invalid_lifetime() {
        assert!(matches!(
            LocalSession::anonymous().with_lifetime(0),
            Err(AuthError::InvalidLifetime(0))
        ));
    }
}
