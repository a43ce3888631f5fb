//! Tests for Scanner
//!
//! These tests verify:
//! - Occupied / unoccupied searches
//! - String end detection (terminator, empty byte, region end)
//! - Exact key matching (no prefix matches)
//! - Record walks in find_key / get_value

use avpdb::region::MemRegion;
use avpdb::storage::{Layout, Scanner};

// =============================================================================
// Helper Functions
// =============================================================================

/// "ab" -> "cd", a 2-byte hole, "xy" -> "z", one trailing empty byte
fn sample_region() -> MemRegion {
    MemRegion::from_bytes(b"ab\0cd\0\xFF\xFFxy\0z\0\xFF".to_vec())
}

fn full_layout(region: &MemRegion) -> Layout {
    Layout::new(0, region.as_bytes().len())
}

// =============================================================================
// Primitive Scans
// =============================================================================

#[test]
fn test_find_occupied() {
    let region = sample_region();
    let scanner = Scanner::new(&region, full_layout(&region));

    assert_eq!(scanner.find_occupied(0), Some(0));
    assert_eq!(scanner.find_occupied(6), Some(8));
    assert_eq!(scanner.find_occupied(13), None);
}

#[test]
fn test_find_unoccupied() {
    let region = sample_region();
    let scanner = Scanner::new(&region, full_layout(&region));

    assert_eq!(scanner.find_unoccupied(0), Some(6));
    assert_eq!(scanner.find_unoccupied(8), Some(13));
}

#[test]
fn test_find_unoccupied_full_region() {
    let region = MemRegion::from_bytes(b"a\0b\0".to_vec());
    let scanner = Scanner::new(&region, Layout::new(0, 4));

    assert_eq!(scanner.find_unoccupied(0), None);
}

#[test]
fn test_find_end_past_terminator() {
    let region = sample_region();
    let scanner = Scanner::new(&region, full_layout(&region));

    // Key "ab" ends at 2, so the value starts at 3
    assert_eq!(scanner.find_end(0), 3);
    // Value "cd" ends at 5
    assert_eq!(scanner.find_end(3), 6);
}

#[test]
fn test_find_end_stops_at_empty_byte() {
    let region = MemRegion::from_bytes(b"abc\xFFd\0".to_vec());
    let scanner = Scanner::new(&region, Layout::new(0, 6));

    assert_eq!(scanner.find_end(0), 3);
}

#[test]
fn test_find_end_runs_to_region_end() {
    let region = MemRegion::from_bytes(b"abcd".to_vec());
    let scanner = Scanner::new(&region, Layout::new(0, 4));

    assert_eq!(scanner.find_end(0), 4);
}

#[test]
fn test_skip_field_handles_empty_field() {
    let region = MemRegion::from_bytes(b"a\0\0b\0c\0".to_vec());
    let scanner = Scanner::new(&region, Layout::new(0, 7));

    // Key "a"
    assert_eq!(scanner.skip_field(0), 2);
    // Empty value: only its terminator
    assert_eq!(scanner.skip_field(2), 3);
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn test_matches_exact() {
    let region = sample_region();
    let scanner = Scanner::new(&region, full_layout(&region));

    assert!(scanner.matches(0, b"ab"));
    assert!(scanner.matches(8, b"xy"));
}

#[test]
fn test_matches_rejects_prefix_and_longer() {
    let region = sample_region();
    let scanner = Scanner::new(&region, full_layout(&region));

    assert!(!scanner.matches(0, b"a"));
    assert!(!scanner.matches(0, b"abc"));
    assert!(!scanner.matches(0, b"xy"));
}

#[test]
fn test_matches_at_region_end() {
    // "ab" with no room for a terminator
    let region = MemRegion::from_bytes(b"ab".to_vec());
    let scanner = Scanner::new(&region, Layout::new(0, 2));

    assert!(!scanner.matches(0, b"ab"));
}

#[test]
fn test_read_string() {
    let region = sample_region();
    let scanner = Scanner::new(&region, full_layout(&region));

    assert_eq!(&scanner.read_string(0)[..], b"ab");
    assert_eq!(&scanner.read_string(3)[..], b"cd");
    assert_eq!(&scanner.read_string(6)[..], b"");
}

// =============================================================================
// Record Walks
// =============================================================================

#[test]
fn test_find_key() {
    let region = sample_region();
    let scanner = Scanner::new(&region, full_layout(&region));

    assert_eq!(scanner.find_key(b"ab"), Some(0));
    assert_eq!(scanner.find_key(b"xy"), Some(8));
    assert_eq!(scanner.find_key(b"zz"), None);
}

#[test]
fn test_find_key_ignores_values() {
    let region = sample_region();
    let scanner = Scanner::new(&region, full_layout(&region));

    // "cd" and "z" are values, not keys
    assert_eq!(scanner.find_key(b"cd"), None);
    assert_eq!(scanner.find_key(b"z"), None);
}

#[test]
fn test_find_key_after_empty_value() {
    let region = MemRegion::from_bytes(b"a\0\0b\0c\0".to_vec());
    let scanner = Scanner::new(&region, Layout::new(0, 7));

    assert_eq!(scanner.find_key(b"b"), Some(3));
    assert_eq!(&scanner.value_of(b"a").unwrap()[..], b"");
    assert_eq!(&scanner.value_of(b"b").unwrap()[..], b"c");
}

#[test]
fn test_find_key_smallest_record_at_region_end() {
    // "k" -> "" occupies the last 3 bytes
    let region = MemRegion::from_bytes(b"ab\0c\0k\0\0".to_vec());
    let scanner = Scanner::new(&region, Layout::new(0, 8));

    assert_eq!(scanner.find_key(b"k"), Some(5));
    assert_eq!(&scanner.value_of(b"k").unwrap()[..], b"");
    assert_eq!(scanner.record_span(5), 3);
}

#[test]
fn test_find_key_respects_layout_start() {
    let region = MemRegion::from_bytes(b"ab\0cd\0xy\0z\0".to_vec());
    let scanner = Scanner::new(&region, Layout::new(6, 11));

    assert_eq!(scanner.find_key(b"ab"), None);
    assert_eq!(scanner.find_key(b"xy"), Some(6));
}

#[test]
fn test_find_key_on_blank_region() {
    let region = MemRegion::new(64);
    let scanner = Scanner::new(&region, Layout::new(0, 64));

    assert_eq!(scanner.find_key(b"anything"), None);
}

#[test]
fn test_get_value() {
    let region = sample_region();
    let scanner = Scanner::new(&region, full_layout(&region));

    assert_eq!(scanner.get_value(b"ab"), Some(3));
    assert_eq!(scanner.get_value(b"xy"), Some(11));
    assert_eq!(scanner.get_value(b"nope"), None);
    assert_eq!(&scanner.value_of(b"xy").unwrap()[..], b"z");
}

#[test]
fn test_record_at_and_span() {
    let region = sample_region();
    let scanner = Scanner::new(&region, full_layout(&region));

    let record = scanner.record_at(8);
    assert_eq!(record.addr, 8);
    assert_eq!(&record.key[..], b"xy");
    assert_eq!(&record.value[..], b"z");
    assert_eq!(record.span(), 5);
    assert_eq!(scanner.record_span(8), 5);
}
