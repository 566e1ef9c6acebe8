use std::fs::File;
use std::io::Read;
use std::path::Path;

use alloy_primitives::{keccak256, Keccak256, B256};
use k256::ecdsa::RecoveryId;

use super::{Account, KeyError, SecretKey, Signature};

/// What a file signature commits to.
///
/// The vault service verifies writes against a signature over the
/// submitted file's *name*, so [`SignatureTarget::FileName`] is the
/// default. A file-name signature says nothing about the bytes that
/// were uploaded; [`SignatureTarget::FileContent`] signs a keccak256
/// digest of the content instead, and is only accepted by services
/// that verify content digests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureTarget {
    #[default]
    FileName,
    FileContent,
}

/// Signs vault submissions on behalf of a single account.
///
/// Holds the secret key for the lifetime of the run along with the
/// account derived from it, so derivation happens exactly once.
#[derive(Debug, Clone)]
pub struct Signer {
    key: SecretKey,
    account: Account,
}

impl Signer {
    /// Take ownership of `key` and derive its account.
    pub fn new(key: SecretKey) -> Result<Self, KeyError> {
        let account = Account::from_verifying_key(key.verifying_key())?;
        Ok(Self { key, account })
    }

    /// Parse `secret` as hex and build a signer from it.
    pub fn from_hex(secret: &str) -> Result<Self, KeyError> {
        Self::new(SecretKey::from_hex(secret)?)
    }

    pub fn account(&self) -> Account {
        self.account
    }

    /// Sign the canonical bytes of `identifier`.
    ///
    /// The message is `keccak256(identifier)`; nonces follow RFC 6979, so
    /// the same key and identifier always produce the same signature.
    pub fn sign_target(&self, identifier: &[u8]) -> Result<Signature, KeyError> {
        self.sign_prehash(&keccak256(identifier))
    }

    /// Sign a file according to `target`.
    ///
    /// For [`SignatureTarget::FileName`] the identifier is the UTF-8 base
    /// name of `path`, which is also what gets sent in the `filename`
    /// header on write.
    pub fn sign_file(&self, path: &Path, target: SignatureTarget) -> Result<Signature, KeyError> {
        match target {
            SignatureTarget::FileName => {
                let name = file_name(path)?;
                tracing::debug!(file = %path.display(), name, "signing file name");
                self.sign_target(name.as_bytes())
            }
            SignatureTarget::FileContent => {
                let digest = content_digest(path)?;
                tracing::debug!(file = %path.display(), %digest, "signing file content");
                self.sign_prehash(&digest)
            }
        }
    }

    fn sign_prehash(&self, prehash: &B256) -> Result<Signature, KeyError> {
        let (signature, recovery_id) = self
            .key
            .signing_key()
            .sign_prehash_recoverable(prehash.as_slice())
            .map_err(|e| KeyError::Signing(e.to_string()))?;

        // s must sit in the lower half of the order; flipping it flips
        // the parity of R
        let (signature, recovery_id) = match signature.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (signature, recovery_id),
        };

        Ok(Signature::from_parts(&signature, recovery_id))
    }
}

/// Base name of `path` as UTF-8.
pub fn file_name(path: &Path) -> Result<&str, KeyError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| KeyError::InvalidTarget(format!("{} has no UTF-8 file name", path.display())))
}

/// Streaming keccak256 over the contents of `path`.
pub fn content_digest(path: &Path) -> Result<B256, KeyError> {
    let mut file = File::open(path)?;
    let mut hasher = Keccak256::new();
    let mut buff = [0u8; 8 * 1024];
    loop {
        let read = file.read(&mut buff)?;
        if read == 0 {
            break;
        }
        hasher.update(&buff[..read]);
    }
    Ok(hasher.finalize())
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_account_is_deterministic() {
        let a = Signer::from_hex(DEV_KEY).unwrap();
        let b = Signer::from_hex(DEV_KEY).unwrap();
        assert_eq!(a.account(), b.account());
        assert_eq!(a.account(), a.account());
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = Signer::new(SecretKey::generate()).unwrap();
        let message = b"test.txt";

        let signature = signer.sign_target(message).unwrap();
        assert!(signature.v() <= 1);
        assert_eq!(signature.to_hex().len(), 130);

        // Verify the signature
        assert!(signer.account().verify(message, &signature).is_ok());

        // Verify fails with wrong message
        assert!(signer.account().verify(b"test.txt ", &signature).is_err());

        // Verify fails with wrong key
        let other = Signer::new(SecretKey::generate()).unwrap();
        assert!(other.account().verify(message, &signature).is_err());
    }

    #[test]
    fn test_signature_is_deterministic() {
        let signer = Signer::from_hex(DEV_KEY).unwrap();
        let first = signer.sign_target(b"test.txt").unwrap();
        let second = signer.sign_target(b"test.txt").unwrap();
        assert_eq!(first, second);
        assert_ne!(first, signer.sign_target(b"other.txt").unwrap());
    }

    #[test]
    fn test_signature_hex_round_trip() {
        let signer = Signer::from_hex(DEV_KEY).unwrap();
        let signature = signer.sign_target(b"vault").unwrap();
        let parsed: Signature = signature.to_hex().parse().unwrap();
        assert_eq!(parsed, signature);

        // legacy 27/28 recovery byte is normalized
        let mut legacy = signature.to_bytes();
        legacy[64] += 27;
        let parsed = Signature::try_from(legacy.as_slice()).unwrap();
        assert_eq!(parsed, signature);
    }

    #[test]
    fn test_sign_file_name_uses_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, b"irrelevant").unwrap();

        let signer = Signer::from_hex(DEV_KEY).unwrap();
        let by_path = signer.sign_file(&path, SignatureTarget::FileName).unwrap();
        let by_name = signer.sign_target(b"test.txt").unwrap();
        assert_eq!(by_path, by_name);
    }

    #[test]
    fn test_sign_file_content_covers_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        let mut file = File::create(&path).unwrap();
        file.write_all(&vec![7u8; 20_000]).unwrap();
        drop(file);

        let signer = Signer::from_hex(DEV_KEY).unwrap();
        let signature = signer.sign_file(&path, SignatureTarget::FileContent).unwrap();
        let digest = keccak256(vec![7u8; 20_000]);
        assert!(signer
            .account()
            .verify_prehash(digest.as_slice(), &signature)
            .is_ok());

        std::fs::write(&path, b"changed").unwrap();
        let changed = signer.sign_file(&path, SignatureTarget::FileContent).unwrap();
        assert_ne!(signature, changed);
    }

    #[test]
    fn test_sign_missing_file_content() {
        let signer = Signer::from_hex(DEV_KEY).unwrap();
        let err = signer
            .sign_file(Path::new("/nonexistent/file.txt"), SignatureTarget::FileContent)
            .unwrap_err();
        assert!(matches!(err, KeyError::Io(_)));
    }
}
