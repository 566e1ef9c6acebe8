use std::fmt;
use std::str::FromStr;

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use serde::{Deserialize, Serialize};

use super::{Account, KeyError};

/// Size of a recoverable signature: r (32) || s (32) || v (1)
pub const SIGNATURE_SIZE: usize = 65;

/// Recoverable secp256k1 signature
///
/// Laid out as `r || s || v` where `v` is the recovery id (0 or 1) and `s`
/// is always in the lower half of the curve order. The wire form is 130
/// lowercase hex digits without a `0x` prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    pub(crate) fn from_parts(signature: &EcdsaSignature, recovery_id: RecoveryId) -> Self {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = recovery_id.to_byte();
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Recovery id, normalized to 0/1
    pub fn v(&self) -> u8 {
        self.0[64]
    }

    /// Recover the account that produced this signature over `prehash`.
    pub fn recover(&self, prehash: &[u8]) -> Result<Account, KeyError> {
        let signature = EcdsaSignature::from_slice(&self.0[..64])
            .map_err(|e| KeyError::InvalidSignature(format!("malformed signature: {}", e)))?;
        let recovery_id = RecoveryId::from_byte(self.v())
            .ok_or_else(|| KeyError::InvalidSignature(format!("bad recovery id {}", self.v())))?;
        let key = VerifyingKey::recover_from_prehash(prehash, &signature, recovery_id)
            .map_err(|e| KeyError::InvalidSignature(format!("recovery failed: {}", e)))?;
        Account::from_verifying_key(&key)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = KeyError;

    /// Accepts a recovery byte of 0/1 or the legacy 27/28 form.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(KeyError::InvalidSignature(format!(
                "invalid signature size, expected {}, got {}",
                SIGNATURE_SIZE,
                bytes.len()
            )));
        }
        let mut buff = [0u8; SIGNATURE_SIZE];
        buff.copy_from_slice(bytes);
        buff[64] = match buff[64] {
            v @ (0 | 1) => v,
            v @ (27 | 28) => v - 27,
            v => {
                return Err(KeyError::InvalidSignature(format!(
                    "invalid recovery byte {}",
                    v
                )))
            }
        };
        Ok(Self(buff))
    }
}

impl FromStr for Signature {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(hex)
            .map_err(|e| KeyError::InvalidSignature(format!("signature hex decode error: {}", e)))?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl Serialize for Signature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
