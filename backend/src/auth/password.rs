//! Password hashing using argon2
//!
//! Hashing and verification are CPU-bound, so both run on tokio's blocking
//! pool and never on a runtime worker.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Password hashing service (Argon2id, default parameters)
pub struct PasswordService;

impl PasswordService {
    /// Hash a password into a PHC string
    pub async fn hash(password: String) -> Result<String> {
        run_blocking(move || hash_blocking(&password)).await
    }

    /// Check a password against a stored PHC string
    pub async fn verify(password: String, hash: String) -> Result<bool> {
        run_blocking(move || verify_blocking(&password, &hash)).await
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
}

fn hash_blocking(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
