use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the only copy of the signing secret and the hashing work factor;
/// services receive it by injection rather than reading configuration.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    decoy_hash: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed bearer token for the authenticated subject
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create an authenticator with the default hashing work factor.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self::with_hasher(PasswordHasher::new(), jwt_secret, token_ttl)
    }

    /// Create an authenticator with an explicitly configured hasher.
    pub fn with_hasher(
        password_hasher: PasswordHasher,
        jwt_secret: &[u8],
        token_ttl: Duration,
    ) -> Self {
        Self {
            password_hasher,
            token_service: TokenService::new(jwt_secret, token_ttl),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identifier to bind into the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is unusable
    /// * `Token` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Verifies `password` against a decoy digest made with the same work
    /// factor, so the rejection takes as long as a wrong password would.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).unwrap_or_default());

        // Outcome is irrelevant, only the work matters
        let _ = self.password_hasher.verify(password, decoy);

        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// Used right after registration, where the caller has just proven
    /// knowledge of the password by choosing it.
    ///
    /// # Errors
    /// * `SigningFailed` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<String, TokenError> {
        self.token_service.issue(subject)
    }

    /// Verify a bearer token and return its subject.
    ///
    /// # Errors
    /// * `Malformed`, `Expired`, `BadSignature` - Token rejected
    pub fn verify_token(&self, token: &str) -> Result<String, TokenError> {
        self.token_service.verify(token)
    }

    /// Access the underlying token service.
    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }
}
