//! Cryptographic primitives for basin vault clients
//!
//! - **Identity**: a secp256k1 [`SecretKey`] whose public half yields the
//!   [`Account`] (keccak256-derived address) that owns a vault
//! - **Authentication**: recoverable ECDSA [`Signature`]s over a
//!   keccak256 digest, produced by a [`Signer`]
//!
//! # Signing Model
//!
//! A write is authenticated by signing an identifier for the submitted
//! file. The service recovers the signer from the signature and compares
//! it with the vault owner. By default the identifier is the file's base
//! name (see [`SignatureTarget`]), which matches what the service checks
//! but does not bind the signature to the uploaded bytes.

mod keys;
mod signature;
mod signer;

pub use keys::{Account, SecretKey, ACCOUNT_SIZE, PRIVATE_KEY_SIZE};
pub use signature::{Signature, SIGNATURE_SIZE};
pub use signer::{content_digest, file_name, SignatureTarget, Signer};

/// Errors that can occur during key and signature operations
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("invalid key format: {0}")]
    InvalidKeyFormat(String),
    #[error("key derivation error: {0}")]
    KeyDerivation(String),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    #[error("invalid signing target: {0}")]
    InvalidTarget(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
