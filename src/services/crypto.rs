use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use anyhow::{Context, Result};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;

/// Encrypts Instagram credentials before they touch the database.
///
/// The stored form is hex(nonce || ciphertext || tag) with a random
/// 12-byte nonce per value, so equal passwords never share ciphertext.
pub struct CredentialCipher {
    key: [u8; 32],
}

impl CredentialCipher {
    /// Derive the AES-256 key from the configured `ENCRYPTION_KEY` via
    /// HKDF-SHA256. The env value can be any non-empty string.
    pub fn new(encryption_key: &str) -> Result<Self> {
        if encryption_key.is_empty() {
            anyhow::bail!("ENCRYPTION_KEY must not be empty");
        }

        let hk = Hkdf::<Sha256>::new(None, encryption_key.as_bytes());
        let mut key = [0u8; 32];
        hk.expand(b"autogram-credentials", &mut key)
            .map_err(|_| anyhow::anyhow!("Failed to derive encryption key"))?;

        Ok(Self { key })
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = Aes256Gcm::new_from_slice(&self.key).context("Failed to create cipher")?;

        // 12-byte nonce (96 bits, recommended for GCM)
        let mut nonce_bytes = [0u8; 12];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| anyhow::anyhow!("Encryption failed: {}", e))?;

        let mut out = nonce_bytes.to_vec();
        out.extend_from_slice(&ciphertext);
        Ok(hex::encode(out))
    }

    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        let data = hex::decode(encoded).context("Stored credential is not valid hex")?;
        if data.len() < 12 {
            anyhow::bail!("Stored credential is truncated");
        }
        let (nonce_bytes, ciphertext) = data.split_at(12);

        let cipher = Aes256Gcm::new_from_slice(&self.key).context("Failed to create cipher")?;
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| anyhow::anyhow!("Decryption failed (data may be corrupted): {}", e))?;

        String::from_utf8(plaintext).context("Decrypted credential is not valid UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt() {
        let cipher = CredentialCipher::new("test-master-key").unwrap();
        let encrypted = cipher.encrypt("insta-password-1").unwrap();

        assert_ne!(encrypted, "insta-password-1");
        assert_eq!(cipher.decrypt(&encrypted).unwrap(), "insta-password-1");
    }

    #[test]
    fn test_same_plaintext_differs() {
        let cipher = CredentialCipher::new("test-master-key").unwrap();
        let a = cipher.encrypt("same").unwrap();
        let b = cipher.encrypt("same").unwrap();
        // Random nonce per value
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let cipher = CredentialCipher::new("key-one").unwrap();
        let other = CredentialCipher::new("key-two").unwrap();
        let encrypted = cipher.encrypt("secret").unwrap();
        assert!(other.decrypt(&encrypted).is_err());
    }

    #[test]
    fn test_tampered_data_fails() {
        let cipher = CredentialCipher::new("test-master-key").unwrap();
        let mut encrypted = cipher.encrypt("secret").unwrap();
        // Flip the last hex digit
        let last = encrypted.pop().unwrap();
        encrypted.push(if last == '0' { '1' } else { '0' });
        assert!(cipher.decrypt(&encrypted).is_err());
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(CredentialCipher::new("").is_err());
    }
}
