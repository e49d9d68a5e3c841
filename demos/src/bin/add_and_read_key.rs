//! Add a user key to an anchor keyring and read it back.

use anyhow::Context;
use clap::Parser;
use kretain::{KeyClient, KeyType, SpecialKeyring};
use kretain_demos::{apply_default_permissions, init_logging, load_config, render_payload};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "add-and-read-key", about = "Add a user key and read it back")]
struct Args {
    /// Key description.
    #[arg(long, default_value = "test123")]
    description: String,

    /// Key payload.
    #[arg(long, default_value = "hello")]
    data: String,

    /// Destination anchor (thread, process, session, user, user-session).
    #[arg(long, env = "KRETAIN_KEYRING")]
    keyring: Option<SpecialKeyring>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let config = load_config(args.keyring)?;
    let client = KeyClient::new();

    let serial = client
        .add_str(&KeyType::USER, &args.description, &args.data, config.default_keyring)
        .with_context(|| format!("adding key {:?}", args.description))?;
    info!(%serial, description = %args.description, keyring = %config.default_keyring, "added key");
    apply_default_permissions(&client, &config, serial)?;

    let payload = client
        .read(serial)
        .with_context(|| format!("reading key {serial}"))?;
    println!("{}", render_payload(payload.as_bytes()));
    Ok(())
}
