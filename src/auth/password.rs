//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("hunter2secret").unwrap();
        assert_ne!(hashed, "hunter2secret");
        assert!(verify_password("hunter2secret", &hashed).unwrap());
    }

    #[test]
    fn test_wrong_password_fails() {
        let hashed = hash_password("hunter2secret").unwrap();
        assert!(!verify_password("not-the-password", &hashed).unwrap());
    }

    #[test]
    fn test_salted_hashes_differ() {
        let a = hash_password("hunter2secret").unwrap();
        let b = hash_password("hunter2secret").unwrap();
        assert_ne!(a, b);
    }
}
