// Password hashing using bcrypt
// Decision: bcrypt with a configurable cost (default 10), salt generated per hash
// Decision: verify never errors; a malformed stored hash simply fails to match

use eventhub_core::Error;

use super::config::DEFAULT_HASH_COST;

/// One-way password hasher with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String, Error> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            Error::Hashing
        })
    }

    /// Verify a password against a stored hash
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }
}
