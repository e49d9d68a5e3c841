//! Helpers shared by the live-kernel integration tests.
//!
//! Tests run against the real key service. When the host refuses key
//! management (no kernel support, or a sandbox filtering the calls) each
//! test returns early instead of failing.

use std::sync::atomic::{AtomicUsize, Ordering};

use kretain::{ErrorKind, KeyClient, KeySerial, SpecialKeyring};

static RING_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Client plus a scratch keyring private to one test.
pub struct Scratch {
    pub client: KeyClient,
    pub ring: KeySerial,
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = self.client.clear(self.ring);
        let _ = self.client.unlink(self.ring, SpecialKeyring::Process);
        let _ = self.client.invalidate(self.ring);
    }
}

/// Create a scratch keyring under the process keyring, or `None` if the
/// kernel key service is unavailable here.
pub fn scratch(test: &str) -> Option<Scratch> {
    let client = KeyClient::new();
    let name = format!(
        "kretain-it-{}-{}-{test}",
        std::process::id(),
        RING_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    match client.new_keyring(&name, SpecialKeyring::Process) {
        Ok(ring) => Some(Scratch { client, ring }),
        Err(e) if matches!(e.kind(), ErrorKind::PermissionDenied | ErrorKind::Unknown) => {
            eprintln!("skipping {test}: kernel key service unavailable ({e})");
            None
        }
        Err(e) => panic!("creating scratch keyring for {test}: {e}"),
    }
}
