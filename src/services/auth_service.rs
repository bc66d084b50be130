//! Authentication flows.
//!
//! Form rules are checked here so bad input never reaches the backend.

use crate::cache::FetchCache;
use crate::client::AsyncEduSyncClient;
use crate::domain::{EmailAddress, NewPassword, Role, ValidationError};
use crate::error::{ApiError, ApiResult};
use crate::models::{AuthSession, LoginRequest, RegisterRequest, ResetPasswordRequest};
use crate::session::TokenStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Fields of the registration form.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

/// Auth service trait for account operations.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Sign in and remember the session token.
    async fn login(&self, email: &str, password: &str) -> ApiResult<AuthSession>;

    /// Create an account. The user signs in separately afterwards.
    async fn register(&self, form: RegistrationForm) -> ApiResult<()>;

    /// Request a password reset email.
    async fn forgot_password(&self, email: &str) -> ApiResult<()>;

    /// Set a new password with the token from the reset email.
    ///
    /// Only a match with the confirmation is required here; the minimum
    /// length applies at registration.
    async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> ApiResult<()>;

    /// Forget the token and every cached response.
    fn logout(&self);

    /// Whether a token is currently stored.
    fn is_logged_in(&self) -> bool;
}

/// Default implementation of AuthService.
pub struct AuthServiceImpl {
    client: Arc<dyn AsyncEduSyncClient>,
    tokens: Arc<dyn TokenStore>,
    cache: FetchCache,
}

impl AuthServiceImpl {
    pub fn new(
        client: Arc<dyn AsyncEduSyncClient>,
        tokens: Arc<dyn TokenStore>,
        cache: FetchCache,
    ) -> Self {
        Self {
            client,
            tokens,
            cache,
        }
    }
}

/// Check that a signed-in user holds one of `allowed` roles.
///
/// # Errors
///
/// `Unauthorized` when nobody is signed in, `Forbidden` for any other role.
pub fn authorize<'a>(
    session: Option<&'a AuthSession>,
    allowed: &[Role],
) -> ApiResult<&'a AuthSession> {
    let session = session.ok_or(ApiError::Unauthorized)?;
    if allowed.contains(&session.role) {
        Ok(session)
    } else {
        Err(ApiError::Forbidden(format!(
            "{} accounts cannot access this area",
            session.role
        )))
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        let email = EmailAddress::new(email)?;
        require(password, "Password")?;

        let request = LoginRequest {
            email: email.into_inner(),
            password: password.to_string(),
        };
        let session = self.client.login(&request).await?;

        // a different user must not see the previous user's cached lists
        self.cache.clear();
        self.tokens.set(&session.token);
        info!(user_id = %session.user_id, role = %session.role, "login succeeded");

        Ok(session)
    }

    async fn register(&self, form: RegistrationForm) -> ApiResult<()> {
        require(&form.name, "Name")?;
        let email = EmailAddress::new(form.email)?;
        let password = NewPassword::new(&form.password, &form.confirm_password)?;

        let request = RegisterRequest {
            name: form.name.trim().to_string(),
            email: email.into_inner(),
            password: password.into_inner(),
            role: form.role,
        };
        self.client.register(&request).await?;
        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> ApiResult<()> {
        let email = EmailAddress::new(email)?;
        self.client.forgot_password(email.as_str()).await?;
        Ok(())
    }

    async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> ApiResult<()> {
        let email = EmailAddress::new(email)?;
        require(token, "Reset token")?;
        require(new_password, "Password")?;
        if new_password != confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }

        let request = ResetPasswordRequest {
            email: email.into_inner(),
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        self.client.reset_password(&request).await?;
        Ok(())
    }

    fn logout(&self) {
        self.tokens.clear();
        self.cache.clear();
        info!("logged out");
    }

    fn is_logged_in(&self) -> bool {
        self.tokens.get().is_some()
    }
}
