use crate::error::AppError;
use bcrypt::{hash, verify};

/// Fixed bcrypt work factor. Deliberately a constant rather than
/// configuration: digests produced with different costs cannot coexist
/// without a migration path.
const HASH_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, HASH_COST)
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

/// Checks a plaintext password against a stored bcrypt digest.
///
/// bcrypt performs the comparison in constant time. A malformed digest is
/// treated as a mismatch rather than an error, so callers get a plain `bool`
/// and cannot be tricked into a distinguishable failure path.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or(false)
}
