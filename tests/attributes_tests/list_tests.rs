//! Tests for List
//!
//! These tests verify:
//! - Append order and duplicate retention
//! - Bounds checking for positional access and deletion
//! - Deep-copy isolation of clones

use rrp_client::{List, RrpError};

// =============================================================================
// Helper Functions
// =============================================================================

fn name_servers() -> List {
    ["ns1.example.net", "ns2.example.net", "ns3.example.net"]
        .into_iter()
        .collect()
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_list_is_empty() {
    let list: List = List::new();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert!(list.first().is_none());
}

#[test]
fn test_push_preserves_order_and_duplicates() {
    let mut list: List = List::new();
    list.push("b");
    list.push("a");
    list.push("b");

    assert_eq!(list.len(), 3);
    assert_eq!(list.as_slice(), ["b", "a", "b"]);
}

#[test]
fn test_get_returns_element_at_position() {
    let list = name_servers();
    assert_eq!(list.get(0).unwrap(), "ns1.example.net");
    assert_eq!(list.get(2).unwrap(), "ns3.example.net");
}

#[test]
fn test_delete_closes_gap() {
    let mut list = name_servers();
    let removed = list.delete_at(1).unwrap();

    assert_eq!(removed, "ns2.example.net");
    assert_eq!(list.len(), 2);
    assert_eq!(list.get(0).unwrap(), "ns1.example.net");
    assert_eq!(list.get(1).unwrap(), "ns3.example.net");
}

#[test]
fn test_delete_first_and_last() {
    let mut list = name_servers();
    list.delete_at(0).unwrap();
    list.delete_at(1).unwrap();
    assert_eq!(list.as_slice(), ["ns2.example.net"]);
}

#[test]
fn test_clear() {
    let mut list = name_servers();
    list.clear();
    assert!(list.is_empty());
}

// =============================================================================
// Bounds Tests
// =============================================================================

#[test]
fn test_get_out_of_bounds_for_every_size() {
    for size in 0..4 {
        let list: List = (0..size).map(|i| i.to_string()).collect();
        for index in [size, size + 1, usize::MAX] {
            match list.get(index) {
                Err(RrpError::InvalidIndex { index: i, len }) => {
                    assert_eq!(i, index);
                    assert_eq!(len, size);
                }
                other => panic!("expected InvalidIndex, got {:?}", other),
            }
        }
    }
}

#[test]
fn test_delete_out_of_bounds_leaves_list_untouched() {
    for size in 0..4 {
        let mut list: List = (0..size).map(|i| i.to_string()).collect();
        let before = list.clone();

        assert!(matches!(
            list.delete_at(size),
            Err(RrpError::InvalidIndex { .. })
        ));
        assert_eq!(list, before);
    }
}

#[test]
fn test_invalid_index_maps_to_taxonomy() {
    let list: List = List::new();
    let err = list.get(0).unwrap_err();
    assert_eq!(err.kind(), rrp_client::ErrorKind::InvalidIndex);
    assert_eq!(err.kind().description(), "Vector index is out of bounds");
}

// =============================================================================
// Clone Tests
// =============================================================================

#[test]
fn test_clone_is_independent() {
    let original = name_servers();
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.push("ns4.example.net");
    copy.delete_at(0).unwrap();

    assert_eq!(original.len(), 3);
    assert_eq!(original.get(0).unwrap(), "ns1.example.net");
    assert_ne!(copy, original);
}

#[test]
fn test_generic_element_type() {
    let mut years: List<i32> = List::new();
    years.push(2024);
    years.push(2025);
    assert_eq!(*years.get(1).unwrap(), 2025);
    assert_eq!(years.iter().sum::<i32>(), 4049);
}

#[test]
fn test_display_joins_values() {
    assert_eq!(
        name_servers().to_string(),
        "ns1.example.net, ns2.example.net, ns3.example.net"
    );
}
