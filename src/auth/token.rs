//!
//! # Token Service
//!
//! Issues and verifies the signed, self-expiring bearer tokens that carry a
//! user's identity between requests. Tokens are standard HMAC-signed JWTs
//! with the claim set `{sub, email, iat, exp}`; there is no server-side
//! session store and no revocation list, so a token stays valid until its
//! expiry elapses. That tradeoff is deliberate.
//!
//! The signing secret is injected once at construction. Nothing in this
//! module reads the environment.

use crate::error::AppError;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Token lifetime in seconds. Fixed at one hour, not configurable per call.
const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Verified identity of a request's caller.
///
/// Produced only by [`TokenService::verify`]; never persisted. Handlers
/// receive it through request extensions and must not construct it from
/// anything other than a verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}

/// Claims encoded into a JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's unique identifier.
    pub sub: Uuid,
    /// Email of the user at issuance time.
    pub email: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch. `iat + TOKEN_TTL_SECS`.
    pub exp: i64,
}

/// Classification of why a token failed verification.
///
/// Callers treat every variant as "unauthorized"; the distinction exists for
/// logging and tests, and is never sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    /// Not a decodable JWT at all (wrong segment count, bad base64, bad JSON).
    Malformed,
    /// Structurally valid but the signature does not match the secret.
    SignatureInvalid,
    /// Signature checks out but the expiry has elapsed.
    Expired,
}

impl fmt::Display for VerificationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VerificationError::Malformed => write!(f, "malformed token"),
            VerificationError::SignatureInvalid => write!(f, "invalid signature"),
            VerificationError::Expired => write!(f, "token expired"),
        }
    }
}

/// Issues and verifies identity tokens with a single symmetric secret.
///
/// Constructed once at startup and shared read-only across requests; both
/// operations are pure in-memory computation.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::default();
        // Expiry is checked by hand in `verify` so that the boundary instant
        // (now == exp) counts as expired; the library treats it as valid and
        // applies leeway.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Mints a signed token for `identity`, expiring one hour from now.
    pub fn issue(&self, identity: &Identity) -> Result<String, AppError> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: identity.id,
            email: identity.email.clone(),
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
    }

    /// Verifies signature and expiry, returning the embedded [`Identity`].
    pub fn verify(&self, token: &str) -> Result<Identity, VerificationError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => VerificationError::SignatureInvalid,
                    ErrorKind::ExpiredSignature => VerificationError::Expired,
                    _ => VerificationError::Malformed,
                }
            })?;

        if chrono::Utc::now().timestamp() >= data.claims.exp {
            return Err(VerificationError::Expired);
        }

        Ok(Identity {
            id: data.claims.sub,
            email: data.claims.email,
        })
    }
}
