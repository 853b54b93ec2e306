use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Identity token payload.
///
/// Only the registered claims this service relies on are carried:
/// the subject (an opaque user identifier), issue time and expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject issued at `now` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Opaque user identifier
    /// * `now` - Issue instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Errors
    /// * `SigningFailed` - `now + ttl` is outside the representable range
    pub fn new(
        subject: impl ToString,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            TokenError::SigningFailed(format!("token lifetime out of range: {}", ttl))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is valid strictly before its `exp` instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let now = Utc::now();
        let claims = Claims::new("user123", now, Duration::hours(24)).unwrap();

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_out_of_range_lifetime_is_an_error() {
        let result = Claims::new("user123", Utc::now(), Duration::hours(100_000_000_000));

        assert!(matches!(result, Err(TokenError::SigningFailed(_))));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: "user123".to_string(),
            iat: 0,
            exp: 1000,
        };

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // exp is exclusive
        assert!(claims.is_expired(1001));
    }
}
