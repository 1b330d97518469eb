//! Password hashing and verification using Argon2id.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use roster_core::error::{RosterError, RosterResult};

fn argon2() -> RosterResult<Argon2<'static>> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| RosterError::Internal(format!("argon2 params error: {e}")))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hash a secret with Argon2id. Salt is randomly generated per call.
pub fn hash_password(password: &str) -> RosterResult<String> {
    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| RosterError::Internal(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a plaintext secret against an Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or an error
/// if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> RosterResult<bool> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| RosterError::Internal(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(RosterError::Internal(format!("verify error: {e}"))),
    }
}
