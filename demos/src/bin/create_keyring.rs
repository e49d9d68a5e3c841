//! Create a keyring, add keys to it and list its members.

use anyhow::Context;
use clap::Parser;
use kretain::{KeyClient, KeyType, SpecialKeyring};
use kretain_demos::{
    apply_default_permissions, init_logging, load_config, render_permissions,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "create-keyring", about = "Create and populate a keyring, then list it")]
struct Args {
    /// Keyring description.
    #[arg(long, default_value = "demo keyring")]
    name: String,

    /// Parent anchor (thread, process, session, user, user-session).
    #[arg(long, env = "KRETAIN_KEYRING")]
    keyring: Option<SpecialKeyring>,

    /// Print members as JSON.
    #[arg(long)]
    json: bool,
}

const MEMBERS: [(&str, &str); 2] = [
    ("ssh key", "ssh key secret data"),
    ("password for github", "my github password"),
];

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let config = load_config(args.keyring)?;
    let client = KeyClient::new();

    let ring = client
        .new_keyring(&args.name, config.default_keyring)
        .with_context(|| format!("creating keyring {:?}", args.name))?;
    info!(keyring = %ring, name = %args.name, "created keyring");

    for (description, data) in MEMBERS {
        let serial = client
            .add_str(&KeyType::USER, description, data, ring)
            .with_context(|| format!("adding {description:?} to keyring {ring}"))?;
        apply_default_permissions(&client, &config, serial)?;
    }

    let members = client
        .list_members(ring)
        .with_context(|| format!("listing keyring {ring}"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&members)?);
        return Ok(());
    }

    println!("{} ({} keys):", args.name, members.len());
    for (i, key) in members.iter().enumerate() {
        println!(
            "-- #{i}: {} [{}] serial={} uid={} gid={} perm={}",
            key.description,
            key.key_type,
            key.serial,
            key.uid,
            key.gid,
            render_permissions(key.permissions),
        );
    }
    Ok(())
}
