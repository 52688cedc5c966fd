//! Runtime configuration types, built from the TOML file by the loader.

use std::net::SocketAddr;

/// Listen address for the HTTP server.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub listen: SocketAddr,
}

/// Location of the sqlite roster database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

/// The admin credential, held only as an argon2 hash at runtime.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    secret_hash: String,
}

impl AdminConfig {
    pub fn new(secret_hash: String) -> Self {
        Self { secret_hash }
    }

    /// Hash a plaintext secret for storage.
    pub fn hash_secret(plaintext: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2, PasswordHasher,
            password_hash::{SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    }

    /// Check a login attempt against the stored hash.
    pub fn verify_password(&self, candidate: &str) -> bool {
        use argon2::{Argon2, PasswordVerifier, password_hash::PasswordHash};

        let Ok(parsed) = PasswordHash::new(&self.secret_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_password_roundtrip() {
        let hash = AdminConfig::hash_secret("sesame").unwrap();
        let admin = AdminConfig::new(hash);
        assert!(admin.verify_password("sesame"));
        assert!(!admin.verify_password("open sesame"));
        assert!(!admin.verify_password(""));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        let admin = AdminConfig::new("not-an-argon2-hash".to_string());
        assert!(!admin.verify_password("anything"));
    }
}
