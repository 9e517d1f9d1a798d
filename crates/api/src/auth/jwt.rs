// JWT token service for authentication
// Decision: Stateless tokens, nothing stored server-side (no revocation; logout discards client-side)
// Decision: Access and refresh tokens share a claim shape and differ by `token_type` and expiry
// Decision: Verification pins the configured algorithm and uses zero expiry leeway

use anyhow::Context;
use chrono::{Duration, Utc};
use eventhub_core::Error;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::config::JwtConfig;

/// Generate a random identifier string (32 hex characters)
fn generate_random_id() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    hex::encode(bytes)
}

/// Kind of token, carried in the claims so one cannot stand in for the other
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims shared by access and refresh tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Token type
    pub token_type: TokenType,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Unique token ID
    pub jti: String,
}

/// Token pair returned after successful authentication
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived token sent with every request.
    pub access_token: String,
    /// Long-lived token for obtaining new access tokens.
    pub refresh_token: String,
}

/// Identity decoded from a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedToken {
    pub user_id: Uuid,
    pub token_type: TokenType,
}

/// Token service for token generation and validation
#[derive(Clone)]
pub struct TokenService {
    config: JwtConfig,
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            algorithm: config.algorithm.into(),
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn generate_token(&self, user_id: Uuid, token_type: TokenType) -> Result<String, Error> {
        let lifetime = match token_type {
            TokenType::Access => self.config.access_token_lifetime,
            TokenType::Refresh => self.config.refresh_token_lifetime,
        };
        let now = Utc::now();
        let exp = Duration::from_std(lifetime)
            .ok()
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .context("Token lifetime out of range")?;

        let claims = Claims {
            sub: user_id.to_string(),
            token_type,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: generate_random_id(),
        };

        self.encode_claims(&claims)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, Error> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .context("Failed to encode token")
            .map_err(Error::Internal)
    }

    /// Generate both access and refresh tokens for a user
    pub fn issue_token_pair(&self, user_id: Uuid) -> Result<TokenPair, Error> {
        Ok(TokenPair {
            access_token: self.generate_token(user_id, TokenType::Access)?,
            refresh_token: self.generate_token(user_id, TokenType::Refresh)?,
        })
    }

    /// Validate and decode a token of either type
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, Error> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            Error::InvalidToken
        })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub).map_err(|_| Error::InvalidToken)?;

        Ok(VerifiedToken {
            user_id,
            token_type: token_data.claims.token_type,
        })
    }

    /// Validate an access token and return its subject
    pub fn verify_access(&self, token: &str) -> Result<Uuid, Error> {
        let verified = self.verify(token)?;
        if verified.token_type != TokenType::Access {
            tracing::debug!("Rejected {:?} token used as access token", verified.token_type);
            return Err(Error::InvalidToken);
        }
        Ok(verified.user_id)
    }

    /// Get access token lifetime in seconds
    pub fn access_token_lifetime_secs(&self) -> i64 {
        i64::try_from(self.config.access_token_lifetime.as_secs()).unwrap_or(i64::MAX)
    }
}
