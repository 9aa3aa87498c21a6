use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use sha2::{Digest, Sha256};

use crate::error::AccountsServiceError;

/// Which hash scheme a stored hash verified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeMatch {
    /// Current scheme (argon2id) — nothing to do.
    Current,
    /// A legacy scheme — callers re-hash and persist on successful login.
    Legacy,
}

struct HashScheme {
    /// Stored-hash prefix this scheme claims. The empty prefix claims
    /// everything, so it must come last.
    tag: &'static str,
    verify: fn(&str, &str) -> bool,
}

/// Tried in priority order; the first scheme whose tag matches the stored
/// hash decides the outcome. Index 0 is the current scheme.
const SCHEMES: &[HashScheme] = &[
    HashScheme {
        tag: "$argon2",
        verify: verify_argon2,
    },
    HashScheme {
        tag: "",
        verify: verify_legacy_sha256,
    },
];

/// Hash a password with the current scheme (argon2id, salted PHC string).
pub fn hash_password(password: &str) -> Result<String, AccountsServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AccountsServiceError::Internal(anyhow::anyhow!("hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Check `password` against `stored`, reporting which scheme matched.
/// `None` means the password does not match under the claiming scheme.
pub fn verify_password(password: &str, stored: &str) -> Option<SchemeMatch> {
    for (index, scheme) in SCHEMES.iter().enumerate() {
        if !stored.starts_with(scheme.tag) {
            continue;
        }
        if (scheme.verify)(password, stored) {
            return Some(if index == 0 {
                SchemeMatch::Current
            } else {
                SchemeMatch::Legacy
            });
        }
        return None;
    }
    None
}

fn verify_argon2(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Unsalted hex SHA-256, the scheme accounts were created with before the
/// argon2 migration.
fn verify_legacy_sha256(password: &str, stored: &str) -> bool {
    let digest = format!("{:x}", Sha256::digest(password.as_bytes()));
    digest == stored
}
