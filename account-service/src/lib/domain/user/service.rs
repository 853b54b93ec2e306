use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSession;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Identity service: registration, login and user lookup.
///
/// Argon2 work runs on tokio's blocking pool so slow hashing never stalls
/// the request executor.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<UserSession, UserError> {
        let RegisterUserCommand {
            first_name,
            last_name,
            email,
            password,
            phone,
        } = command;

        let authenticator = Arc::clone(&self.authenticator);
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        let user = User {
            id: UserId::new(),
            first_name,
            last_name,
            email,
            password_hash,
            phone,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        let access_token = self
            .authenticator
            .issue_token(&created_user.id.to_string())
            .map_err(|e| {
                tracing::error!(
                    user_id = %created_user.id,
                    error = %e,
                    "User persisted but token issuance failed"
                );
                UserError::from(e)
            })?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(UserSession {
            user: created_user,
            access_token,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<UserSession, UserError> {
        let LoginCommand { email, password } = command;

        let user = match self.repository.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                // Same Argon2 cost as a wrong password
                let authenticator = Arc::clone(&self.authenticator);
                let rejection = tokio::task::spawn_blocking(move || {
                    authenticator.reject_unknown(password.expose())
                })
                .await
                .map_err(|e| {
                    UserError::Unknown(format!("Password verification task failed: {}", e))
                })?;

                tracing::info!(reason = "unknown_email", "Login rejected");
                return Err(rejection.into());
            }
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password_hash = user.password_hash.clone();
        let subject = user.id.to_string();
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &password_hash, &subject)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        let result = result.map_err(|e| {
            if matches!(e, auth::AuthenticationError::InvalidCredentials) {
                tracing::info!(user_id = %user.id, reason = "wrong_password", "Login rejected");
            }
            UserError::from(e)
        })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(UserSession {
            user,
            access_token: result.access_token,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
