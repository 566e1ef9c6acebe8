// CLI modules
mod args;
mod logging;
mod op;
mod ops;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Account, Events, Init, Run, Sign, Vault, Version};

command_enum! {
    (Init, Init),
    (Account, Account),
    (Sign, Sign),
    (Vault, Vault),
    (Events, Events),
    (Run, Run),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    // .env must be loaded before parsing so clap sees PRIVATE_KEY / VAULT_ID
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Error: failed to load .env file: {}", e);
            std::process::exit(1);
        }
    }

    let args = Args::parse();
    let guard = logging::init_logging(args.log_level);

    // Build context - always has a vault client initialized
    let ctx = match op::OpContext::new(
        args.remote,
        args.config_path,
        args.private_key,
        args.vault_id,
    ) {
        Ok(ctx) => ctx,
        Err(e) => {
            drop(guard);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            1
        }
    };

    drop(guard);
    std::process::exit(code);
}
