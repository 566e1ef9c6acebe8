use std::fmt;
use std::str::FromStr;

use alloy_primitives::{keccak256, Address};
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Serialize};

use super::{KeyError, Signature};

/// Size of a secp256k1 private key in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;
/// Size of an uncompressed SEC1 public key (0x04 || x || y)
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;
/// Size of an account address in bytes
pub const ACCOUNT_SIZE: usize = 20;

/// Account address that owns a vault
///
/// Derived from the uncompressed secp256k1 public key: the last
/// 20 bytes of `keccak256(x || y)`. Displayed as a `0x`-prefixed,
/// EIP-55 checksummed hex string.
///
/// # Examples
///
/// ```ignore
/// let account: Account = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse()?;
/// assert_eq!(
///     account.to_string(),
///     "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Account(Address);

impl Account {
    /// Derive the account address from a verifying (public) key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::KeyDerivation`] if the key does not encode to
    /// the 65-byte uncompressed form.
    pub fn from_verifying_key(key: &VerifyingKey) -> Result<Self, KeyError> {
        let encoded = key.to_encoded_point(false);
        let bytes = encoded.as_bytes();
        if bytes.len() != UNCOMPRESSED_PUBLIC_KEY_SIZE || bytes[0] != 0x04 {
            return Err(KeyError::KeyDerivation(format!(
                "expected {} byte uncompressed public key, got {} bytes",
                UNCOMPRESSED_PUBLIC_KEY_SIZE,
                bytes.len()
            )));
        }

        let hash = keccak256(&bytes[1..]);
        Ok(Self(Address::from_slice(&hash[32 - ACCOUNT_SIZE..])))
    }

    /// Raw address bytes
    pub fn to_bytes(&self) -> [u8; ACCOUNT_SIZE] {
        let mut bytes = [0u8; ACCOUNT_SIZE];
        bytes.copy_from_slice(self.0.as_slice());
        bytes
    }

    /// Checksummed `0x`-prefixed hex
    pub fn to_hex(&self) -> String {
        self.0.to_checksum(None)
    }

    /// Verify that `signature` over `identifier` was produced by this account.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidSignature`] if the signature is malformed
    /// or recovers to a different account.
    pub fn verify(&self, identifier: &[u8], signature: &Signature) -> Result<(), KeyError> {
        let prehash = keccak256(identifier);
        self.verify_prehash(prehash.as_slice(), signature)
    }

    pub(crate) fn verify_prehash(
        &self,
        prehash: &[u8],
        signature: &Signature,
    ) -> Result<(), KeyError> {
        let recovered = signature.recover(prehash)?;
        if recovered != *self {
            return Err(KeyError::InvalidSignature(format!(
                "signature recovers to {}, expected {}",
                recovered, self
            )));
        }
        Ok(())
    }
}

impl From<Address> for Account {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl From<Account> for Address {
    fn from(account: Account) -> Self {
        account.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Account {
    type Err = KeyError;

    /// Accepts plain or `0x`-prefixed hex in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s.strip_prefix("0x").unwrap_or(s);
        let mut buff = [0u8; ACCOUNT_SIZE];
        hex::decode_to_slice(hex, &mut buff)
            .map_err(|e| KeyError::InvalidKeyFormat(format!("invalid account address: {}", e)))?;
        Ok(Self(Address::from(buff)))
    }
}

impl Serialize for Account {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Secret key used to sign vault submissions
///
/// A thin wrapper around a secp256k1 [`SigningKey`]. The underlying
/// scalar is zeroized when the key is dropped.
///
/// # Security Considerations
///
/// - Never transmitted; only signatures and the derived [`Account`] leave the process
/// - `Debug` output is redacted so the key can't end up in logs
///
/// # Examples
///
/// ```ignore
/// let key = SecretKey::from_hex(&std::env::var("PRIVATE_KEY")?)?;
/// let signer = Signer::new(key)?;
/// println!("account: {}", signer.account());
/// ```
#[derive(Clone)]
pub struct SecretKey(SigningKey);

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl SecretKey {
    /// Parse a secret key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings. Surrounding
    /// whitespace (e.g. a trailing newline from a `.env` file) is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKeyFormat`] if:
    /// - The string is not valid hex
    /// - The decoded length is not 32 bytes
    /// - The scalar is zero or not below the secp256k1 group order
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let bytes = hex::decode(hex)
            .map_err(|e| KeyError::InvalidKeyFormat(format!("private key hex decode error: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a secret key from raw big-endian scalar bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(KeyError::InvalidKeyFormat(format!(
                "invalid private key size, expected {}, got {}",
                PRIVATE_KEY_SIZE,
                bytes.len()
            )));
        }
        let key = SigningKey::from_slice(bytes).map_err(|_| {
            KeyError::InvalidKeyFormat("private key is not a valid secp256k1 scalar".into())
        })?;
        Ok(Self(key))
    }

    /// Generate a new random secret key using a cryptographically secure RNG
    pub fn generate() -> Self {
        Self(SigningKey::random(&mut rand::rngs::OsRng))
    }

    /// Public half of the keypair
    pub fn verifying_key(&self) -> &VerifyingKey {
        self.0.verifying_key()
    }

    /// Convert secret key to hexadecimal string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_bytes())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // Well-known development key (hardhat account #0)
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ACCOUNT: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_known_account_derivation() {
        let key = SecretKey::from_hex(DEV_KEY).unwrap();
        let account = Account::from_verifying_key(key.verifying_key()).unwrap();
        assert_eq!(account.to_string(), DEV_ACCOUNT);
        assert_eq!(account.to_hex().len(), 42);
    }

    #[test]
    fn test_from_hex_accepts_prefix_and_whitespace() {
        let plain = SecretKey::from_hex(DEV_KEY.trim_start_matches("0x")).unwrap();
        let padded = SecretKey::from_hex(&format!("  {}\n", DEV_KEY)).unwrap();
        assert_eq!(plain.to_hex(), padded.to_hex());
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        let zero = "00".repeat(32);
        let over_order = "ff".repeat(32);
        for bad in ["", "0x", "zz", "0x1234", zero.as_str(), over_order.as_str()] {
            let err = SecretKey::from_hex(bad).unwrap_err();
            assert!(matches!(err, KeyError::InvalidKeyFormat(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = SecretKey::from_hex(DEV_KEY).unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains(&key.to_hex()));
    }

    #[test]
    fn test_account_parse_any_case() {
        let lower: Account = DEV_ACCOUNT.to_lowercase().parse().unwrap();
        let bare: Account = DEV_ACCOUNT.trim_start_matches("0x").parse().unwrap();
        assert_eq!(lower, bare);
        assert_eq!(lower.to_string(), DEV_ACCOUNT);
        assert!("0x1234".parse::<Account>().is_err());
    }

    #[test]
    fn test_generated_keys_differ() {
        let a = SecretKey::generate();
        let b = SecretKey::generate();
        assert_ne!(a.to_hex(), b.to_hex());
    }
}
