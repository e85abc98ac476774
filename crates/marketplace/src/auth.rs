use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::errors::DbError;

// Fixture accounts only: 1 MiB, one pass, one lane.
const FIXTURE_MEMORY_KIB: u32 = 1024;
const FIXTURE_ITERATIONS: u32 = 1;
const FIXTURE_PARALLELISM: u32 = 1;

fn fixture_hasher() -> Result<Argon2<'static>, DbError> {
    let params = Params::new(
        FIXTURE_MEMORY_KIB,
        FIXTURE_ITERATIONS,
        FIXTURE_PARALLELISM,
        None,
    )
    .map_err(|e| DbError::PasswordHash(format!("Invalid Argon2 parameters: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes `password` into an Argon2id PHC string for `users.password_hash`.
pub fn hash_password(password: &str) -> Result<String, DbError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = fixture_hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies `password` against a PHC string produced by [`hash_password`].
pub fn verify_password(password: &str, hash: &str) -> Result<bool, DbError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| DbError::PasswordHash(format!("Invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let hash = hash_password("hunter2-fixture").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.len() <= 255, "must fit users.password_hash");
        assert!(verify_password("hunter2-fixture", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_plaintext() {
        assert!(verify_password("secret", "secret").is_err());
    }
}
