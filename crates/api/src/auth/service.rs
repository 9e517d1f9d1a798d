// Auth service: registration and login
// Decision: Uniqueness is checked up front and again by the store on insert
// Decision: Unknown email and wrong password return the same error
// Decision: bcrypt runs on the blocking pool so it never stalls the request executor

use eventhub_core::{normalize_email, Error, User};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::jwt::{TokenPair, TokenService};
use super::password::PasswordHasher;
use crate::storage::{CreateUserRow, StorageBackend};

/// User projection plus a fresh token pair
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct AuthService {
    db: Arc<StorageBackend>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(
        db: Arc<StorageBackend>,
        tokens: Arc<TokenService>,
        hasher: PasswordHasher,
    ) -> Self {
        Self { db, tokens, hasher }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, Error> {
        let email = normalize_email(email);

        if self.db.get_user_by_email(&email).await?.is_some() {
            tracing::info!("Registration rejected: email already registered");
            return Err(Error::Conflict);
        }

        let password_hash = self.hash_password(password).await?;

        let row = self
            .db
            .create_user(CreateUserRow {
                name: name.trim().to_string(),
                email,
                password_hash,
            })
            .await?;

        let tokens = self.tokens.issue_token_pair(row.id)?;
        tracing::info!(user_id = %row.id, "User registered");

        Ok(AuthResponse {
            user: row.into(),
            tokens,
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, Error> {
        let email = normalize_email(email);

        let Some(row) = self.db.get_user_by_email(&email).await? else {
            tracing::info!("Login failed: unknown email");
            return Err(Error::InvalidCredentials);
        };

        if !self.verify_password(password, &row.password_hash).await? {
            tracing::info!(user_id = %row.id, "Login failed: wrong password");
            return Err(Error::InvalidCredentials);
        }

        let tokens = self.tokens.issue_token_pair(row.id)?;
        tracing::info!(user_id = %row.id, "User logged in");

        Ok(AuthResponse {
            user: row.into(),
            tokens,
        })
    }

    /// Look up the profile of an authenticated user
    pub async fn me(&self, user_id: Uuid) -> Result<User, Error> {
        self.db
            .get_user(user_id)
            .await?
            .map(User::from)
            .ok_or(Error::NotFound("User"))
    }

    async fn hash_password(&self, password: &str) -> Result<String, Error> {
        let hasher = self.hasher;
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| Error::Internal(e.into()))?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, Error> {
        let hasher = self.hasher;
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| Error::Internal(e.into()))
    }
}
