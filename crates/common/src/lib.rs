/**
 * Cryptographic types and operations.
 *  - secp256k1 secret keys and derived accounts
 *  - Recoverable signatures over vault submissions
 */
pub mod crypto;
/**
 * Data contracts shared with the vault service:
 *  vault identifiers and the events a vault
 *  reports once a write has been ingested.
 */
pub mod vault;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::build_info;
    pub use crate::crypto::{Account, KeyError, SecretKey, Signature, SignatureTarget, Signer};
    pub use crate::vault::{Event, VaultId, VaultIdError};
    pub use crate::version::BuildInfo;
}
