//! Argon2id password hashing

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
        rand_core::OsRng,
    },
};
use core_config::{ConfigError, FromEnv, env_parse_or};

use crate::error::{UserError, UserResult};

/// Argon2id cost parameters.
///
/// Loaded from environment variables:
/// - `PASSWORD_MEMORY_KIB` (default: 19456)
/// - `PASSWORD_ITERATIONS` (default: 2)
/// - `PASSWORD_PARALLELISM` (default: 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl FromEnv for PasswordConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            memory_kib: env_parse_or("PASSWORD_MEMORY_KIB", defaults.memory_kib)?,
            iterations: env_parse_or("PASSWORD_ITERATIONS", defaults.iterations)?,
            parallelism: env_parse_or("PASSWORD_PARALLELISM", defaults.parallelism)?,
        })
    }
}

/// Salted Argon2id hasher producing PHC strings
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Fails when the cost parameters are outside what Argon2 accepts
    pub fn new(config: &PasswordConfig) -> UserResult<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| UserError::PasswordHash(format!("invalid Argon2 parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn hash(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    /// Check `password` against a stored PHC string.
    ///
    /// The cost parameters are read from the stored hash, so hashes made under an
    /// older configuration still verify.
    pub fn verify(&self, password: &str, stored_hash: &str) -> UserResult<bool> {
        let parsed =
            PasswordHash::new(stored_hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(UserError::PasswordHash(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::new(&PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let hash = hasher.hash("password1").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("password1"));
        assert!(hasher.verify("password1", &hash).unwrap());
        assert!(!hasher.verify("password2", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = fast_hasher();
        assert_ne!(
            hasher.hash("password1").unwrap(),
            hasher.hash("password1").unwrap()
        );
    }

    #[test]
    fn test_verify_uses_parameters_of_stored_hash() {
        let stored = fast_hasher().hash("password1").unwrap();
        let current = PasswordHasher::new(&PasswordConfig::default()).unwrap();
        assert!(current.verify("password1", &stored).unwrap());
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        let result = fast_hasher().verify("password1", "plaintext");
        assert!(matches!(result, Err(UserError::PasswordHash(_))));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let result = PasswordHasher::new(&PasswordConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("PASSWORD_MEMORY_KIB", Some("65536")),
                ("PASSWORD_ITERATIONS", Some("3")),
                ("PASSWORD_PARALLELISM", None::<&str>),
            ],
            || {
                let config = PasswordConfig::from_env().unwrap();
                assert_eq!(config.memory_kib, 65536);
                assert_eq!(config.iterations, 3);
                assert_eq!(config.parallelism, 1);
            },
        );
    }

    #[test]
    fn test_config_from_env_rejects_garbage() {
        temp_env::with_var("PASSWORD_ITERATIONS", Some("many"), || {
            assert!(PasswordConfig::from_env().is_err());
        });
    }
}
