//! Shared setup for the kretain demo programs.

use anyhow::Context;
use kretain::{KeyClient, KeyPermissions, KeySerial, SpecialKeyring};
use kretain_core::env::{get_var_or, vars};
use kretain_core::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `KRETAIN_LOG` is unset. Targets match by prefix, so
/// this covers `kretain_core` and `kretain_demos` too.
pub const DEFAULT_LOG_FILTER: &str = "kretain=info";

/// The `EnvFilter` directives to log with.
pub fn log_filter() -> String {
    get_var_or(vars::KRETAIN_LOG, DEFAULT_LOG_FILTER)
}

/// Initialize logging from `KRETAIN_LOG` (default `kretain=info`).
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load consumer defaults, with `--keyring` taking precedence.
pub fn load_config(keyring: Option<SpecialKeyring>) -> anyhow::Result<Config> {
    let mut config = Config::load_default().context("loading kretain config")?;
    if let Some(keyring) = keyring {
        config.default_keyring = keyring;
    }
    Ok(config)
}

/// Apply the configured default permission mask to a new key, if any.
pub fn apply_default_permissions(
    client: &KeyClient,
    config: &Config,
    serial: KeySerial,
) -> anyhow::Result<()> {
    if let Some(mask) = config.default_permissions {
        client
            .set_permissions(serial, mask)
            .with_context(|| format!("setting permissions {mask} on key {serial}"))?;
        info!(%serial, permissions = %mask, "applied default permissions");
    }
    Ok(())
}

/// Render a payload for the terminal: text when it is UTF-8, hex otherwise.
pub fn render_payload(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => format!("hex:{}", hex::encode(bytes)),
    }
}

/// Render a permission mask scope by scope.
pub fn render_permissions(mask: KeyPermissions) -> String {
    use kretain::Scope;

    const LETTERS: [(u32, char); 6] = [
        (KeyPermissions::VIEW, 'v'),
        (KeyPermissions::READ, 'r'),
        (KeyPermissions::WRITE, 'w'),
        (KeyPermissions::SEARCH, 's'),
        (KeyPermissions::LINK, 'l'),
        (KeyPermissions::SETATTR, 'a'),
    ];

    [Scope::Possessor, Scope::User, Scope::Group, Scope::Other]
        .iter()
        .map(|scope| {
            let bits = mask.scope(*scope);
            LETTERS
                .iter()
                .map(|(bit, c)| if bits & bit != 0 { *c } else { '-' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("|")
}
