pub mod client;
pub mod events;
pub mod vaults;
