mod event;
mod vault_id;

pub use event::Event;
pub use vault_id::{VaultId, VaultIdError};
