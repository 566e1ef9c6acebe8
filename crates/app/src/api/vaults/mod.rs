pub mod create;

pub use create::CreateVaultRequest;
