//! Tests for RangeIterator
//!
//! These tests verify:
//! - Start/end bounds, including the unbounded end of a namespace
//! - Cursor state transitions
//! - Key decoding back to namespace-relative keys
//! - Release semantics

#[path = "../common/mod.rs"]
mod common;

use common::{collect_keys, TestEnv};
use nskv::namespace::CursorState;

// =============================================================================
// Helper Functions
// =============================================================================

/// Namespace "db2" holding key_000000 .. key_000019, next to "db1" and "db3"
fn populated_env() -> TestEnv {
    let env = TestEnv::new();
    let db1 = env.registry.get_namespace("db1").unwrap();
    let db2 = env.registry.get_namespace("db2").unwrap();
    let db3 = env.registry.get_namespace("db3").unwrap();

    for i in 0..20 {
        let key = format!("key_{:06}", i);
        let value = format!("value_{}", i);
        db2.put(key.as_bytes(), value.as_bytes()).unwrap();
    }
    db1.put(b"key_000010", b"other").unwrap();
    db3.put(b"key_000001", b"other").unwrap();
    env
}

fn expected_keys(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("key_{:06}", i)).collect()
}

// =============================================================================
// Bounds Tests
// =============================================================================

#[test]
fn test_bounded_range() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();

    let itr = db
        .get_iterator(Some(&b"key_000002"[..]), Some(&b"key_000004"[..]))
        .unwrap();

    assert_eq!(collect_keys(itr), expected_keys(2..4));
}

#[test]
fn test_open_end_range() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();

    let itr = db.get_iterator(Some(&b"key_000002"[..]), None).unwrap();

    assert_eq!(collect_keys(itr), expected_keys(2..20));
}

#[test]
fn test_fully_unbounded_range() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();

    let itr = db.get_iterator(None, None).unwrap();

    assert_eq!(collect_keys(itr), expected_keys(0..20));
}

#[test]
fn test_open_start_range() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();

    let itr = db.get_iterator(None, Some(&b"key_000003"[..])).unwrap();

    assert_eq!(collect_keys(itr), expected_keys(0..3));
}

#[test]
fn test_empty_ranges() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();

    let same = db
        .get_iterator(Some(&b"key_000005"[..]), Some(&b"key_000005"[..]))
        .unwrap();
    assert!(collect_keys(same).is_empty());

    let inverted = db
        .get_iterator(Some(&b"key_000009"[..]), Some(&b"key_000001"[..]))
        .unwrap();
    assert!(collect_keys(inverted).is_empty());

    let past_end = db.get_iterator(Some(&b"zzz"[..]), None).unwrap();
    assert!(collect_keys(past_end).is_empty());
}

#[test]
fn test_empty_namespace() {
    let env = populated_env();
    let db = env.registry.get_namespace("db4").unwrap();

    let mut itr = db.get_iterator(None, None).unwrap();
    itr.seek_to_first();

    assert_eq!(itr.state(), CursorState::Exhausted);
    assert!(!itr.valid());
    assert_eq!(itr.key(), None);
}

#[test]
fn test_values_returned_with_keys() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();

    let entries: Vec<(Vec<u8>, Vec<u8>)> = db
        .get_iterator(Some(&b"key_000007"[..]), Some(&b"key_000009"[..]))
        .unwrap()
        .collect();

    assert_eq!(
        entries,
        vec![
            (b"key_000007".to_vec(), b"value_7".to_vec()),
            (b"key_000008".to_vec(), b"value_8".to_vec()),
        ]
    );
}

// =============================================================================
// Cursor State Tests
// =============================================================================

#[test]
fn test_cursor_style_iteration() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();

    let mut itr = db
        .get_iterator(Some(&b"key_000017"[..]), None)
        .unwrap();
    assert_eq!(itr.state(), CursorState::BeforeFirst);
    assert!(!itr.valid());

    itr.seek_to_first();
    assert_eq!(itr.state(), CursorState::Positioned);

    let mut keys = Vec::new();
    while itr.valid() {
        keys.push(String::from_utf8(itr.key().unwrap().to_vec()).unwrap());
        itr.advance();
    }

    assert_eq!(keys, expected_keys(17..20));
    assert_eq!(itr.state(), CursorState::Exhausted);
    assert!(!itr.advance());
    itr.release();
}

#[test]
fn test_advance_before_seek_positions_on_first() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();

    let mut itr = db.get_iterator(None, None).unwrap();

    assert!(itr.advance());
    assert_eq!(itr.key(), Some(&b"key_000000"[..]));
    assert_eq!(itr.value(), Some(&b"value_0"[..]));
    assert!(itr.advance());
    assert_eq!(itr.key(), Some(&b"key_000001"[..]));
}

#[test]
fn test_seek_to_first_rewinds() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();

    let mut itr = db.get_iterator(None, Some(&b"key_000002"[..])).unwrap();
    let first_pass: Vec<_> = itr.by_ref().collect();
    assert_eq!(first_pass.len(), 2);
    assert!(itr.next().is_none());

    itr.seek_to_first();
    let second_pass: Vec<_> = itr.by_ref().collect();
    assert_eq!(first_pass, second_pass);
}

#[test]
fn test_iterator_sees_raw_keys_containing_separator() {
    let env = TestEnv::new();
    let db = env.registry.get_namespace("bin").unwrap();
    db.put(b"a\x00b", b"v").unwrap();

    let keys: Vec<Vec<u8>> = db.get_iterator(None, None).unwrap().map(|(k, _)| k).collect();

    assert_eq!(keys, vec![b"a\x00b".to_vec()]);
}

// =============================================================================
// Release Tests
// =============================================================================

#[test]
fn test_release_is_idempotent() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();

    let mut itr = db.get_iterator(None, None).unwrap();
    itr.seek_to_first();
    assert!(itr.valid());

    itr.release();
    itr.release();

    assert!(itr.is_released());
    assert!(!itr.valid());
    assert_eq!(itr.key(), None);
    assert!(itr.next().is_none());
}

#[test]
fn test_engine_usable_while_iterator_outstanding() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();

    let mut itr = db.get_iterator(None, None).unwrap();
    itr.seek_to_first();

    // The iterator does not hold the engine guard between calls
    db.put(b"key_000020", b"late").unwrap();
    db.delete(b"key_000001").unwrap();

    let rest = collect_keys(itr);
    assert_eq!(rest.first().map(String::as_str), Some("key_000000"));
    assert!(!rest.contains(&"key_000001".to_string()));
    assert_eq!(rest.last().map(String::as_str), Some("key_000020"));
}

#[test]
fn test_iterator_reads_nothing_after_registry_close() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();
    let mut itr = db.get_iterator(None, None).unwrap();

    env.registry.close();
    assert!(db.get(b"key_000000").is_err());

    itr.seek_to_first();
    assert_eq!(itr.state(), CursorState::Exhausted);
    assert_eq!(itr.key(), None);
    assert!(collect_keys(itr).is_empty());
}

#[test]
fn test_positioned_iterator_stops_after_registry_close() {
    let env = populated_env();
    let db = env.registry.get_namespace("db2").unwrap();
    let mut itr = db.get_iterator(None, None).unwrap();
    itr.seek_to_first();
    assert_eq!(itr.key(), Some(&b"key_000000"[..]));

    env.registry.close();

    assert!(!itr.advance());
    assert_eq!(itr.state(), CursorState::Exhausted);
}
