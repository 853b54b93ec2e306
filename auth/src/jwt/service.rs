use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Issues and verifies signed, time-limited identity tokens.
///
/// Tokens are HS256 JWTs carrying `sub`, `iat` and `exp`. Verification needs
/// only the shared secret; nothing is looked up in storage and nothing can be
/// revoked before expiry.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Default token lifetime.
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret (at least 32 bytes recommended for HS256)
    /// * `ttl` - Lifetime of issued tokens
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Lifetime of tokens issued by this service.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from now for the configured lifetime.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed or the lifetime overflows
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.sign(&Claims::new(subject, Utc::now(), self.ttl)?)
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `BadSignature` - Signature does not match the secret
    /// * `Expired` - `exp` is not in the future
    /// * `Malformed` - Anything else: bad encoding, wrong algorithm, missing claims
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        // jsonwebtoken accepts exp == now; tokens are only valid strictly before exp
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        if claims.sub.is_empty() {
            return Err(TokenError::Malformed("empty subject".to_string()));
        }

        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn service() -> TokenService {
        TokenService::new(SECRET, Duration::hours(24))
    }

    #[test]
    fn test_issue_and_verify() {
        let service = service();

        let token = service.issue("user123").expect("Failed to issue token");
        assert!(!token.is_empty());

        let subject = service.verify(&token).expect("Failed to verify token");
        assert_eq!(subject, "user123");
    }

    #[test]
    fn test_verify_is_idempotent() {
        let service = service();
        let token = service.issue("user123").unwrap();

        assert_eq!(service.verify(&token), service.verify(&token));
    }

    #[test]
    fn test_issue_with_oversized_lifetime_fails_cleanly() {
        let service = TokenService::new(SECRET, Duration::hours(100_000_000_000));

        assert!(matches!(
            service.issue("user123"),
            Err(TokenError::SigningFailed(_))
        ));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer = TokenService::new(b"secret1_at_least_32_bytes_long_key!", Duration::hours(1));
        let verifier =
            TokenService::new(b"secret2_at_least_32_bytes_long_key!", Duration::hours(1));

        let token = issuer.issue("user123").expect("Failed to issue token");

        assert_eq!(verifier.verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_verify_expired_token() {
        let service = service();
        let issued = Utc::now() - Duration::hours(48);
        let claims = Claims::new("user123", issued, Duration::hours(24)).unwrap();
        let token = service.sign(&claims).unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_token_expiring_now() {
        let service = service();
        let now = Utc::now();
        let claims = Claims {
            sub: "user123".to_string(),
            iat: now.timestamp() - 60,
            exp: now.timestamp(),
        };
        let token = service.sign(&claims).unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_garbage() {
        let service = service();

        let result = service.verify("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Malformed(_))));

        let result = service.verify("");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let service = service();
        let token = service.issue("user123").unwrap();
        let forged = service.issue("admin").unwrap();

        // Splice the forged payload onto the original signature
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert_eq!(service.verify(&tampered), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_verify_rejects_other_algorithms() {
        let service = service();
        let claims = Claims::new("user123", Utc::now(), Duration::hours(1)).unwrap();
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_verify_rejects_missing_claims() {
        #[derive(serde::Serialize)]
        struct SubjectOnly {
            sub: String,
        }

        let service = service();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &SubjectOnly {
                sub: "user123".to_string(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_verify_rejects_empty_subject() {
        let service = service();
        let token = service.issue("").unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(TokenError::Malformed(_))
        ));
    }
}
