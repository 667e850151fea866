use sha2::{Digest, Sha256, Sha512};

pub struct AuthUtils;

impl AuthUtils {
    /// Hex-encoded SHA-256 digest of the password, stored as-is in the
    /// `users` collection.
    pub fn hash_password(password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn verify_password(password: &str, expected_hash: &str) -> bool {
        Self::hash_password(password) == expected_hash
    }

    /// Stretches the configured session secret into the 64 bytes the cookie
    /// signing key requires.
    pub fn session_key_material(secret: &str) -> [u8; 64] {
        let mut hasher = Sha512::new();
        hasher.update(secret.as_bytes());
        hasher.finalize().into()
    }
}
