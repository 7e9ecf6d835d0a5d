use std::sync::Arc;

use chrono::Duration;
use tracing::info;

use crate::{
    domain::{LoginPayload, UserView},
    error::ApiError,
    password,
    store::UserStore,
    token::{Claims, TokenKeys},
};

/// Verifies credentials and issues signed, time-limited tokens. Stateless:
/// nothing is recorded per session, expiry alone forces re-login.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenKeys,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenKeys, token_ttl: Duration) -> Self {
        Self {
            users,
            tokens,
            token_ttl,
        }
    }

    /// Unknown email and wrong password produce the same error on purpose.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginPayload, ApiError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !password::verify(password, &user.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        let claims = Claims::new(&user, self.token_ttl);
        let access_token = self.tokens.sign(&claims)?;

        info!(user = %user.email, "Issued access token");

        Ok(LoginPayload {
            access_token,
            user: UserView::from(&user),
        })
    }
}
