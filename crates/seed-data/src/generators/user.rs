//! User account generation.

use std::collections::HashSet;

use fake::{
    Fake,
    faker::internet::en::{Password, SafeEmail, Username},
    faker::name::en::{FirstName, LastName},
};
use rand::Rng;

use marketplace::auth::hash_password;

use super::{GenerateError, MAX_UNIQUE_ATTEMPTS};

const USERNAME_MAX_LEN: usize = 50;

/// Generated user data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedUser {
    pub username: String,
    pub email: String,
    /// Argon2 PHC string; the plaintext is discarded.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// Generates user accounts, keeping usernames and emails unique per generator.
#[derive(Debug, Default)]
pub struct UserGenerator {
    usernames: HashSet<String>,
    emails: HashSet<String>,
}

impl UserGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a single user.
    pub fn generate(&mut self, rng: &mut impl Rng) -> Result<GeneratedUser, GenerateError> {
        let username = self.unique_username(rng)?;
        let email = self.unique_email(rng)?;
        let password: String = Password(10..20).fake_with_rng(rng);

        Ok(GeneratedUser {
            username,
            email,
            password_hash: hash_password(&password)?,
            first_name: FirstName().fake_with_rng(rng),
            last_name: LastName().fake_with_rng(rng),
        })
    }

    /// Generates multiple users.
    pub fn generate_batch(
        &mut self,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedUser>, GenerateError> {
        (0..count).map(|_| self.generate(rng)).collect()
    }

    fn unique_username(&mut self, rng: &mut impl Rng) -> Result<String, GenerateError> {
        for attempt in 0..MAX_UNIQUE_ATTEMPTS {
            let mut candidate: String = Username().fake_with_rng(rng);
            // The fake corpus is small; numeric suffixes after a collision
            if attempt > 0 {
                candidate = format!("{candidate}{}", rng.gen_range(1..10_000));
            }
            candidate.truncate(USERNAME_MAX_LEN);

            if self.usernames.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }

        Err(GenerateError::Exhausted {
            what: "username",
            attempts: MAX_UNIQUE_ATTEMPTS,
        })
    }

    fn unique_email(&mut self, rng: &mut impl Rng) -> Result<String, GenerateError> {
        for attempt in 0..MAX_UNIQUE_ATTEMPTS {
            let mut candidate: String = SafeEmail().fake_with_rng(rng);
            if attempt > 0
                && let Some((local, domain)) = candidate.split_once('@')
            {
                candidate = format!("{local}{}@{domain}", rng.gen_range(1..10_000));
            }

            if self.emails.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }

        Err(GenerateError::Exhausted {
            what: "email",
            attempts: MAX_UNIQUE_ATTEMPTS,
        })
    }
}
