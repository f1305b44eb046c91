//! Password hashing and verification over bcrypt.

use crate::error::ShelfError;

/// Fixed bcrypt cost factor.
pub const HASH_COST: u32 = 10;

pub fn hash_password(plaintext: &str) -> Result<String, ShelfError> {
    bcrypt::hash(plaintext, HASH_COST).map_err(ShelfError::Hashing)
}

/// A wrong password is `Ok(false)`; only an internal bcrypt failure is an error.
pub fn verify_password(plaintext: &str, hashed: &str) -> Result<bool, ShelfError> {
    bcrypt::verify(plaintext, hashed).map_err(ShelfError::Comparison)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hashed = hash_password("pw1").expect("hashing failed");
        assert_ne!(hashed, "pw1");
        assert!(verify_password("pw1", &hashed).expect("verify failed"));
    }

    #[test]
    fn verify_rejects_other_plaintext() {
        let hashed = hash_password("pw1").expect("hashing failed");
        assert!(!verify_password("pw2", &hashed).expect("verify failed"));
    }

    #[test]
    fn verify_on_garbage_hash_is_an_error() {
        assert!(matches!(
            verify_password("pw1", "not-a-bcrypt-hash"),
            Err(ShelfError::Comparison(_))
        ));
    }
}
