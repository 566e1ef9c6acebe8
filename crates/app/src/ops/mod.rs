pub mod account;
pub mod events;
pub mod init;
pub mod run;
pub mod sign;
pub mod vault;
pub mod version;

pub use account::Account;
pub use events::Events;
pub use init::Init;
pub use run::Run;
pub use sign::Sign;
pub use vault::Vault;
pub use version::Version;
