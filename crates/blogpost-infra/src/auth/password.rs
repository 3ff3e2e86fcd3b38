//! Argon2 password hashing implementation.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use blogpost_core::ports::{AuthError, PasswordService};

/// Argon2id password service producing PHC-format hash strings.
///
/// Each hash carries its own random salt, so hashing the same password twice
/// yields different strings.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogpost_core::domain::User;

    #[test]
    fn test_password_hashing() {
        let service = Argon2PasswordService::new();
        let mut user = User::new("susan", "susan@example.com");

        user.set_password("cat", &service).unwrap();

        assert!(user.password_hash.starts_with("$argon2"));
        assert!(!user.check_password("dog", &service));
        assert!(user.check_password("cat", &service));
    }

    #[test]
    fn test_hashes_are_salted() {
        let service = Argon2PasswordService::new();

        let first = service.hash("cat").unwrap();
        let second = service.hash("cat").unwrap();

        assert_ne!(first, second);
        assert!(service.verify("cat", &first).unwrap());
        assert!(service.verify("cat", &second).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let service = Argon2PasswordService::new();
        assert!(matches!(
            service.verify("cat", "not-a-phc-string"),
            Err(AuthError::HashingError(_))
        ));
    }
}
