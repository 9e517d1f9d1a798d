// Authentication configuration
// Decision: Token lifetimes use the `<integer><unit>` grammar (h, d, w, m, y) so
//           operators can write JWT_EXPIRES_IN=1d instead of raw seconds
// Decision: Only symmetric HMAC algorithms are accepted; the secret is never printed

use jsonwebtoken::Algorithm;
use std::time::Duration;
use thiserror::Error;

/// Minimum length of the token signing secret
pub const MIN_SECRET_LEN: usize = 32;

/// Default bcrypt work factor
pub const DEFAULT_HASH_COST: u32 = 10;

/// Name of the cookie carrying the access token
pub const TOKEN_COOKIE: &str = "token";

const HOUR: u64 = 60 * 60;
const DAY: u64 = 24 * HOUR;
const YEAR: u64 = 365 * DAY + DAY / 4;

/// Longest accepted token lifetime
pub const MAX_LIFETIME_YEARS: u64 = 100;

/// Error returned when a lifetime string does not match `<integer><unit>`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration '{0}': expected <integer><unit> with unit one of h, d, w, m, y")]
pub struct ExpiryParseError(pub String);

/// Parse a token lifetime such as `15m`, `1d` or `7d`.
///
/// Units: `m` minutes, `h` hours, `d` days, `w` weeks, `y` years (365.25 days).
/// Lifetimes above `MAX_LIFETIME_YEARS` are rejected.
pub fn parse_expiry(input: &str) -> Result<Duration, ExpiryParseError> {
    let err = || ExpiryParseError(input.to_string());
    let s = input.trim();

    let unit = s.chars().last().ok_or_else(err)?;
    let digits = &s[..s.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(err());
    }
    let amount: u64 = digits.parse().map_err(|_| err())?;
    if amount == 0 {
        return Err(err());
    }

    let unit_secs = match unit {
        'm' => 60,
        'h' => HOUR,
        'd' => DAY,
        'w' => 7 * DAY,
        'y' => YEAR,
        _ => return Err(err()),
    };

    amount
        .checked_mul(unit_secs)
        .filter(|secs| *secs <= MAX_LIFETIME_YEARS * YEAR)
        .map(Duration::from_secs)
        .ok_or_else(err)
}

/// HMAC signing algorithm for issued tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningAlgorithm {
    #[default]
    HS256,
    HS384,
    HS512,
}

impl SigningAlgorithm {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "HS256" => Some(SigningAlgorithm::HS256),
            "HS384" => Some(SigningAlgorithm::HS384),
            "HS512" => Some(SigningAlgorithm::HS512),
            _ => None,
        }
    }
}

impl From<SigningAlgorithm> for Algorithm {
    fn from(alg: SigningAlgorithm) -> Self {
        match alg {
            SigningAlgorithm::HS256 => Algorithm::HS256,
            SigningAlgorithm::HS384 => Algorithm::HS384,
            SigningAlgorithm::HS512 => Algorithm::HS512,
        }
    }
}

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWTs
    pub secret: String,
    /// Signing algorithm
    pub algorithm: SigningAlgorithm,
    /// Access token lifetime
    pub access_token_lifetime: Duration,
    /// Refresh token lifetime
    pub refresh_token_lifetime: Duration,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_lifetime", &self.access_token_lifetime)
            .field("refresh_token_lifetime", &self.refresh_token_lifetime)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: SigningAlgorithm::default(),
            access_token_lifetime: Duration::from_secs(DAY),
            refresh_token_lifetime: Duration::from_secs(7 * DAY),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
    /// bcrypt work factor
    pub hash_cost: u32,
    /// Whether the token cookie is marked `Secure`
    pub secure_cookies: bool,
}

impl AuthConfig {
    pub fn new(jwt: JwtConfig) -> Self {
        Self {
            jwt,
            hash_cost: DEFAULT_HASH_COST,
            secure_cookies: false,
        }
    }
}
