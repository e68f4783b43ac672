//! Tests for AttributeMap and Changes
//!
//! These tests verify:
//! - Multi-value accumulation per key in call order
//! - Key count and insertion-ordered iteration
//! - The single key cursor (reset, advance, removal, clone)
//! - Deep-copy isolation of clones

use rrp_client::{AttributeMap, Changes, RrpError};

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_map() -> AttributeMap {
    let mut map = AttributeMap::new();
    map.put("DomainName", "example.com");
    map.put("NameServer", "ns1.example.net");
    map.put("Status", "ACTIVE");
    map.put("NameServer", "ns2.example.net");
    map
}

fn drain_keys(map: &mut AttributeMap) -> Vec<String> {
    let mut keys = Vec::new();
    while let Some(key) = map.next_key() {
        keys.push(key.to_string());
    }
    keys
}

// =============================================================================
// Put / Get Tests
// =============================================================================

#[test]
fn test_get_returns_values_in_call_order() {
    let map = sample_map();

    let servers = map.get("NameServer").unwrap();
    assert_eq!(servers.as_slice(), ["ns1.example.net", "ns2.example.net"]);
    assert_eq!(map.get("Status").unwrap().as_slice(), ["ACTIVE"]);
}

#[test]
fn test_len_counts_distinct_keys() {
    let map = sample_map();
    assert_eq!(map.len(), 3);
}

#[test]
fn test_put_sequences_accumulate() {
    let calls = [
        ("a", "1"),
        ("b", "2"),
        ("a", "3"),
        ("c", "4"),
        ("b", "5"),
        ("a", "6"),
    ];
    let mut map = AttributeMap::new();
    for (key, value) in calls {
        map.put(key, value);
    }

    for key in ["a", "b", "c"] {
        let expected: Vec<&str> = calls
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .collect();
        assert_eq!(map.get(key).unwrap().as_slice(), expected.as_slice());
    }
    assert_eq!(map.len(), 3);
}

#[test]
fn test_keys_are_case_sensitive() {
    let mut map = AttributeMap::new();
    map.put("status", "a");
    map.put("Status", "b");
    assert_eq!(map.len(), 2);
    assert!(map.get("STATUS").is_none());
}

#[test]
fn test_missing_key() {
    let map = sample_map();
    assert!(map.get("Registrar").is_none());
    assert!(!map.contains_key("Registrar"));
    assert!(map.contains_key("Status"));
}

#[test]
fn test_put_pair_splits_on_first_colon() {
    let mut map = AttributeMap::new();
    map.put_pair("RegistrationExpirationDate:2030-01-01 10:00:00.0").unwrap();
    map.put_pair("Empty:").unwrap();

    assert_eq!(
        map.get("RegistrationExpirationDate").unwrap().as_slice(),
        ["2030-01-01 10:00:00.0"]
    );
    assert_eq!(map.get("Empty").unwrap().as_slice(), [""]);
}

#[test]
fn test_put_pair_without_colon_fails() {
    let mut map = AttributeMap::new();
    assert!(matches!(
        map.put_pair("no separator"),
        Err(RrpError::BadParameter(_))
    ));
    assert!(map.is_empty());
}

#[test]
fn test_iter_is_insertion_ordered() {
    let map = sample_map();
    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, vec!["DomainName", "NameServer", "Status"]);

    let counts: Vec<usize> = map.iter().map(|(_, v)| v.len()).collect();
    assert_eq!(counts, vec![1, 2, 1]);
}

// =============================================================================
// Remove Tests
// =============================================================================

#[test]
fn test_remove_returns_values() {
    let mut map = sample_map();
    let removed = map.remove("NameServer").unwrap();

    assert_eq!(removed.len(), 2);
    assert_eq!(map.len(), 2);
    assert!(map.get("NameServer").is_none());
}

#[test]
fn test_remove_missing_key_fails() {
    let mut map = sample_map();
    match map.remove("Registrar") {
        Err(RrpError::NoSuchProperty(key)) => assert_eq!(key, "Registrar"),
        other => panic!("expected NoSuchProperty, got {:?}", other),
    }
    assert_eq!(map.len(), 3);
}

#[test]
fn test_clear_empties_map() {
    let mut map = sample_map();
    map.clear();
    assert!(map.is_empty());
    assert!(map.next_key().is_none());
}

// =============================================================================
// Cursor Tests
// =============================================================================

#[test]
fn test_cursor_walks_keys_once() {
    let mut map = sample_map();
    assert_eq!(drain_keys(&mut map), vec!["DomainName", "NameServer", "Status"]);
    assert!(map.next_key().is_none());
}

#[test]
fn test_reset_cursor_restarts_traversal() {
    let mut map = sample_map();
    map.next_key();
    map.next_key();
    map.reset_cursor();
    assert_eq!(map.next_key(), Some("DomainName"));
}

#[test]
fn test_cursor_on_empty_map() {
    let mut map = AttributeMap::new();
    map.reset_cursor();
    assert!(map.next_key().is_none());

    map.put("First", "1");
    assert_eq!(map.next_key(), Some("First"));
}

#[test]
fn test_iter_does_not_move_cursor() {
    let mut map = sample_map();
    map.next_key();
    let _: Vec<_> = map.iter().collect();
    assert_eq!(map.next_key(), Some("NameServer"));
}

#[test]
fn test_remove_before_cursor_keeps_position() {
    let mut map = sample_map();
    map.next_key();
    map.next_key();
    map.remove("DomainName").unwrap();
    assert_eq!(map.next_key(), Some("Status"));
}

#[test]
fn test_remove_at_cursor_falls_back_to_previous() {
    let mut map = sample_map();
    map.next_key();
    map.remove("NameServer").unwrap();
    assert_eq!(map.next_key(), Some("DomainName"));
}

#[test]
fn test_remove_head_at_cursor_moves_to_next() {
    let mut map = sample_map();
    map.remove("DomainName").unwrap();
    assert_eq!(map.next_key(), Some("NameServer"));
}

#[test]
fn test_clone_resumes_mid_traversal() {
    let mut original = sample_map();
    assert_eq!(original.next_key(), Some("DomainName"));

    let mut copy = original.clone();
    assert_eq!(copy.next_key(), Some("NameServer"));
    assert_eq!(copy.next_key(), Some("Status"));

    // The original cursor is unaffected by the clone's traversal
    assert_eq!(original.next_key(), Some("NameServer"));
}

// =============================================================================
// Clone Tests
// =============================================================================

#[test]
fn test_clone_is_deep() {
    let original = sample_map();
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.put("NameServer", "ns3.example.net");
    copy.put("Registrar", "acme");
    copy.remove("Status").unwrap();

    assert_eq!(original.len(), 3);
    assert_eq!(original.get("NameServer").unwrap().len(), 2);
    assert!(original.get("Status").is_some());
    assert_ne!(copy, original);
}

#[test]
fn test_equality_ignores_cursor() {
    let mut a = sample_map();
    let b = sample_map();
    a.next_key();
    assert_eq!(a, b);
}

#[test]
fn test_display_one_line_per_value() {
    let mut map = AttributeMap::new();
    map.put("NameServer", "ns1");
    map.put("NameServer", "ns2");
    assert_eq!(map.to_string(), "NameServer:ns1\nNameServer:ns2\n");
}

// =============================================================================
// Changes Tests
// =============================================================================

#[test]
fn test_changes_builder() {
    let changes = Changes::new()
        .add("ns3.example.net")
        .replace("ns1.example.net", "ns9.example.net")
        .delete("ns2.example.net");

    assert!(!changes.is_empty());
    assert_eq!(changes.added.as_slice(), ["ns3.example.net"]);
    assert_eq!(
        changes.replaced.get("ns1.example.net").unwrap().as_slice(),
        ["ns9.example.net"]
    );
    assert_eq!(changes.deleted.as_slice(), ["ns2.example.net"]);
    assert!(Changes::new().is_empty());
}
