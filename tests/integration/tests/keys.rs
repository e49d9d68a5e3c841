//! Live-kernel tests for individual key operations.

use kretain::{ErrorKind, KeyPermissions, KeyType, SpecialKeyring};
use kretain_integration_tests::scratch;
use nix::errno::Errno;
use nix::unistd::{getgid, getuid};

#[test]
fn test_add_and_read_key() {
    let Some(s) = scratch("add_and_read") else { return };
    let serial = s
        .client
        .add_str(&KeyType::USER, "testkey", "hello this is new data", s.ring)
        .unwrap();
    assert!(serial.as_raw() > 0);
    assert_eq!(
        s.client.read_to_string(serial).unwrap(),
        "hello this is new data"
    );
}

#[test]
fn test_binary_and_empty_payloads() {
    let Some(s) = scratch("payloads") else { return };
    let binary = [0u8, 1, 2, 0xfe, 0xff, b';', 0];
    let serial = s.client.add(&KeyType::USER, "bin", &binary, s.ring).unwrap();
    assert_eq!(s.client.read(serial).unwrap().as_bytes(), &binary);

    let empty = s.client.new_keyring("empty", s.ring).unwrap();
    assert!(s.client.read(empty).unwrap().is_empty());
}

#[test]
fn test_empty_user_payload_is_invalid() {
    let Some(s) = scratch("empty_user") else { return };
    let err = s.client.add(&KeyType::USER, "empty", &[], s.ring).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.errno(), Some(Errno::EINVAL));
}

#[test]
fn test_describe_key() {
    let Some(s) = scratch("describe") else { return };
    let serial = s
        .client
        .add_str(&KeyType::USER, "desc;with;semicolons", "x", s.ring)
        .unwrap();
    let desc = s.client.describe(serial).unwrap();
    assert_eq!(desc.serial, serial);
    assert_eq!(desc.key_type, KeyType::USER);
    assert_eq!(desc.description, "desc;with;semicolons");
    assert_eq!(desc.uid, getuid().as_raw());
    assert_eq!(desc.gid, getgid().as_raw());
}

#[test]
fn test_describe_anchor_has_concrete_serial() {
    let Some(s) = scratch("describe_anchor") else { return };
    let desc = s.client.describe(SpecialKeyring::Process).unwrap();
    assert!(desc.is_keyring());
    assert!(desc.serial.as_raw() > 0);
    assert_eq!(
        desc.serial,
        s.client.keyring_id(SpecialKeyring::Process, false).unwrap()
    );
}

#[test]
fn test_request_key() {
    let Some(s) = scratch("request") else { return };
    let serial = s
        .client
        .add_str(&KeyType::USER, "requested", "data", s.ring)
        .unwrap();
    let found = s.client.request(&KeyType::USER, "requested", s.ring).unwrap();
    assert_eq!(found, serial);
}

#[test]
fn test_request_ignores_keys_outside_keyring() {
    let Some(s) = scratch("request_rooted") else { return };
    let other = s.client.new_keyring("other", s.ring).unwrap();
    let sub = s.client.new_keyring("sub", s.ring).unwrap();
    let key = s.client.add_str(&KeyType::USER, "outside", "x", other).unwrap();

    let err = s.client.request(&KeyType::USER, "outside", sub).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(s.client.request(&KeyType::USER, "outside", s.ring).unwrap(), key);
}

#[test]
fn test_revoke_then_read_fails() {
    let Some(s) = scratch("revoke") else { return };
    let s1 = s.client.add_str(&KeyType::USER, "k1", "secret", s.ring).unwrap();
    assert_eq!(s.client.read_to_string(s1).unwrap(), "secret");

    s.client.revoke(s1).unwrap();
    let err = s.client.read(s1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.raw_os_error().is_some());
}

#[test]
fn test_set_permissions_overwrites() {
    let Some(s) = scratch("setperm") else { return };
    let serial = s.client.add_str(&KeyType::USER, "perm", "x", s.ring).unwrap();
    let mask_a = KeyPermissions::POS_ALL | KeyPermissions::USR_ALL;
    let mask_b = KeyPermissions::POS_ALL | KeyPermissions::USR_VIEW;

    s.client.set_permissions(serial, mask_a).unwrap();
    s.client.set_permissions(serial, mask_b).unwrap();
    assert_eq!(s.client.describe(serial).unwrap().permissions, mask_b);
}

#[test]
fn test_chown_to_self() {
    let Some(s) = scratch("chown") else { return };
    let serial = s.client.add_str(&KeyType::USER, "owned", "x", s.ring).unwrap();
    s.client
        .chown(serial, Some(getuid().as_raw()), None)
        .unwrap();
    assert_eq!(s.client.describe(serial).unwrap().uid, getuid().as_raw());
}

#[test]
fn test_set_and_clear_timeout() {
    let Some(s) = scratch("timeout") else { return };
    let serial = s.client.add_str(&KeyType::USER, "expiring", "x", s.ring).unwrap();
    s.client.set_timeout(serial, 3600).unwrap();
    s.client.set_timeout(serial, 0).unwrap();
    assert_eq!(s.client.read_to_string(serial).unwrap(), "x");
}

#[test]
fn test_update_key() {
    let Some(s) = scratch("update") else { return };
    let serial = s.client.add_str(&KeyType::USER, "rotating", "v1", s.ring).unwrap();
    s.client.update(serial, b"v2").unwrap();
    assert_eq!(s.client.read_to_string(serial).unwrap(), "v2");
}

#[test]
fn test_unknown_serial_is_not_found() {
    let Some(s) = scratch("unknown") else { return };
    // Serials are allocated upwards from a random start; i32::MAX is
    // practically never live.
    let err = s.client.describe(kretain::KeySerial::new(i32::MAX)).unwrap_err();
    assert!(err.is_not_found());
}
