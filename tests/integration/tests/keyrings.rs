//! Live-kernel tests for keyring enumeration.

use kretain::codec::decode_serials;
use kretain::{ErrorKind, KeySerial, KeyType, SpecialKeyring};
use kretain_integration_tests::scratch;

#[test]
fn test_list_two_members() {
    let Some(s) = scratch("list_two") else { return };
    let ring = s.client.new_keyring("ring1", s.ring).unwrap();
    s.client.add_str(&KeyType::USER, "a", "x", ring).unwrap();
    s.client.add_str(&KeyType::USER, "b", "y", ring).unwrap();

    let members = s.client.list_members(ring).unwrap();
    assert_eq!(members.len(), 2);
    let mut names: Vec<&str> = members.iter().map(|d| d.description.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_list_order_matches_raw_payload() {
    let Some(s) = scratch("list_order") else { return };
    for name in ["one", "two", "three", "four"] {
        s.client.add_str(&KeyType::USER, name, name, s.ring).unwrap();
    }

    let raw = s.client.read(s.ring).unwrap();
    let expected = decode_serials(raw.as_bytes()).unwrap();
    let listed: Vec<KeySerial> = s
        .client
        .list_members(s.ring)
        .unwrap()
        .iter()
        .map(|d| d.serial)
        .collect();
    assert_eq!(listed, expected);
}

#[test]
fn test_list_non_keyring_fails() {
    let Some(s) = scratch("list_leaf") else { return };
    let leaf = s.client.add_str(&KeyType::USER, "leaf", "x", s.ring).unwrap();
    let err = s.client.list_members(leaf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAKeyring);
}

#[test]
fn test_clear_keyring() {
    let Some(s) = scratch("clear") else { return };
    s.client.add_str(&KeyType::USER, "kretain-clear-probe", "data", s.ring).unwrap();
    s.client.request(&KeyType::USER, "kretain-clear-probe", s.ring).unwrap();

    s.client.clear(s.ring).unwrap();
    assert!(s.client.list_members(s.ring).unwrap().is_empty());
    let err = s.client.request(&KeyType::USER, "kretain-clear-probe", s.ring).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_clear_keeps_key_linked_elsewhere() {
    let Some(s) = scratch("clear_linked") else { return };
    let ring = s.client.new_keyring("cleared", s.ring).unwrap();
    let holder = s.client.new_keyring("holder", s.ring).unwrap();
    let key = s.client.add_str(&KeyType::USER, "survivor", "data", ring).unwrap();
    s.client.link(key, holder).unwrap();
    s.client.link(key, SpecialKeyring::Process).unwrap();

    s.client.clear(ring).unwrap();
    assert!(s.client.list_members(ring).unwrap().is_empty());
    let err = s.client.request(&KeyType::USER, "survivor", ring).unwrap_err();
    s.client.unlink(key, SpecialKeyring::Process).unwrap();
    assert!(err.is_not_found());

    // Still alive through the holder keyring.
    assert_eq!(s.client.read_to_string(key).unwrap(), "data");
}

#[test]
fn test_link_and_unlink() {
    let Some(s) = scratch("link") else { return };
    let other = s.client.new_keyring("other", s.ring).unwrap();
    let key = s.client.add_str(&KeyType::USER, "shared", "x", s.ring).unwrap();

    s.client.link(key, other).unwrap();
    assert_eq!(s.client.member_serials(other).unwrap(), vec![key]);

    s.client.unlink(key, other).unwrap();
    assert!(s.client.member_serials(other).unwrap().is_empty());
}
