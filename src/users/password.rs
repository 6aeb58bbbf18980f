//! Argon2 password hashing. Hashing is CPU-bound, so the async entry points
//! run it on the blocking pool; the `_blocking` variants exist for callers
//! already off the runtime (migrations, test fixtures).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tokio::task;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Hash(#[from] argon2::password_hash::Error),
    #[error(transparent)]
    TaskJoin(#[from] task::JoinError),
}

pub fn hash_blocking(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

pub fn verify_blocking(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

pub async fn hash(password: String) -> Result<String> {
    task::spawn_blocking(move || hash_blocking(&password)).await?
}

pub async fn verify(password: String, hash: String) -> Result<bool> {
    task::spawn_blocking(move || verify_blocking(&password, &hash)).await?
}
