use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at_unix: Option<u64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
}

impl TokenSet {
    const EXPIRY_SKEW_SECS: u64 = 30;

    pub fn is_expired(&self, now: SystemTime) -> bool {
        let Some(expires_at) = self.expires_at_unix else {
            return false;
        };

        let Ok(duration) = now.duration_since(UNIX_EPOCH) else {
            return false;
        };

        duration.as_secs().saturating_add(Self::EXPIRY_SKEW_SECS) >= expires_at
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn token(expires_at_unix: Option<u64>) -> TokenSet {
        TokenSet {
            access_token: "atoken".to_string(),
            refresh_token: Some("rtoken".to_string()),
            expires_at_unix,
            token_type: Some("Bearer".to_string()),
            scope: None,
        }
    }

    #[test]
    fn token_without_expiry_never_expires() {
        assert!(!token(None).is_expired(SystemTime::now()));
    }

    #[test]
    fn expiry_applies_clock_skew() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        // 20 seconds of remaining lifetime is inside the 30 second skew.
        assert!(token(Some(1_020)).is_expired(now));
        assert!(!token(Some(1_031)).is_expired(now));
    }
}
