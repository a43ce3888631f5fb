//! Tests for the hole allocator
//!
//! These tests verify:
//! - First-fit placement
//! - Holes bounded by records and by the region end
//! - Overflow when no single hole is large enough
//! - Hole enumeration

use avpdb::region::MemRegion;
use avpdb::storage::{find_hole, largest_hole, Hole, Holes, Layout, Scanner, EMPTY};
use avpdb::AvpError;

// =============================================================================
// Helper Functions
// =============================================================================

/// Build a region from segments; `None` is a run of `n` empty bytes
fn region_of(segments: &[(Option<&[u8]>, usize)]) -> MemRegion {
    let mut bytes = Vec::new();
    for (data, n) in segments {
        match data {
            Some(data) => bytes.extend_from_slice(data),
            None => bytes.extend(std::iter::repeat(EMPTY).take(*n)),
        }
    }
    MemRegion::from_bytes(bytes)
}

fn layout_of(region: &MemRegion) -> Layout {
    Layout::new(0, region.as_bytes().len())
}

// =============================================================================
// Placement Tests
// =============================================================================

#[test]
fn test_blank_region_allocates_at_start() {
    let region = MemRegion::new(500);
    let scanner = Scanner::new(&region, Layout::new(0, 500));

    assert_eq!(find_hole(&scanner, 10).unwrap(), 0);
    assert_eq!(find_hole(&scanner, 500).unwrap(), 0);
}

#[test]
fn test_allocates_after_record() {
    let region = region_of(&[(Some(b"ab\0cd\0"), 0), (None, 20)]);
    let scanner = Scanner::new(&region, layout_of(&region));

    assert_eq!(find_hole(&scanner, 4).unwrap(), 6);
}

#[test]
fn test_first_fit_skips_small_hole() {
    // 2-byte hole, record, 5-byte hole, record, 10-byte hole
    let region = region_of(&[
        (None, 2),
        (Some(b"a\0b\0"), 0),
        (None, 5),
        (Some(b"c\0d\0"), 0),
        (None, 10),
    ]);
    let scanner = Scanner::new(&region, layout_of(&region));

    assert_eq!(find_hole(&scanner, 2).unwrap(), 0);
    assert_eq!(find_hole(&scanner, 4).unwrap(), 6);
    assert_eq!(find_hole(&scanner, 5).unwrap(), 6);
    assert_eq!(find_hole(&scanner, 6).unwrap(), 15);
}

#[test]
fn test_exact_fit_at_region_end() {
    let region = region_of(&[(Some(b"a\0b\0"), 0), (None, 6)]);
    let scanner = Scanner::new(&region, layout_of(&region));

    assert_eq!(find_hole(&scanner, 6).unwrap(), 4);
}

#[test]
fn test_respects_layout_start() {
    let region = MemRegion::new(100);
    let scanner = Scanner::new(&region, Layout::new(40, 100));

    assert_eq!(find_hole(&scanner, 8).unwrap(), 40);
}

// =============================================================================
// Overflow Tests
// =============================================================================

#[test]
fn test_fragmented_space_overflows() {
    // Three 3-byte holes: 9 free bytes, but no 4-byte hole
    let region = region_of(&[
        (None, 3),
        (Some(b"a\0b\0"), 0),
        (None, 3),
        (Some(b"c\0d\0"), 0),
        (None, 3),
    ]);
    let scanner = Scanner::new(&region, layout_of(&region));

    assert_eq!(find_hole(&scanner, 3).unwrap(), 0);
    match find_hole(&scanner, 4) {
        Err(AvpError::Overflow { requested }) => assert_eq!(requested, 4),
        other => panic!("Expected Overflow, got {:?}", other),
    }
}

#[test]
fn test_request_larger_than_region_overflows() {
    let region = MemRegion::new(16);
    let scanner = Scanner::new(&region, Layout::new(0, 16));

    assert!(matches!(
        find_hole(&scanner, 17),
        Err(AvpError::Overflow { requested: 17 })
    ));
}

#[test]
fn test_full_region_overflows() {
    let region = MemRegion::from_bytes(b"ab\0cd\0".to_vec());
    let scanner = Scanner::new(&region, Layout::new(0, 6));

    assert!(matches!(
        find_hole(&scanner, 1),
        Err(AvpError::Overflow { .. })
    ));
}

#[test]
fn test_zero_size_rejected() {
    let region = MemRegion::new(16);
    let scanner = Scanner::new(&region, Layout::new(0, 16));

    assert!(matches!(
        find_hole(&scanner, 0),
        Err(AvpError::InvalidArgument(_))
    ));
}

#[test]
fn test_hole_never_overlaps_occupied_bytes() {
    let region = region_of(&[
        (None, 1),
        (Some(b"a\0bb\0"), 0),
        (None, 4),
        (Some(b"c\0d\0"), 0),
        (None, 2),
        (Some(b"e\0f\0"), 0),
        (None, 7),
    ]);
    let scanner = Scanner::new(&region, layout_of(&region));

    for size in 1..=7 {
        let addr = find_hole(&scanner, size).unwrap();
        for a in addr..addr + size {
            assert_eq!(
                region.as_bytes()[a],
                EMPTY,
                "size {} placed at {} overlaps byte {}",
                size,
                addr,
                a
            );
        }
    }
}

// =============================================================================
// Hole Enumeration Tests
// =============================================================================

#[test]
fn test_holes_iterator() {
    let region = region_of(&[
        (None, 2),
        (Some(b"a\0b\0"), 0),
        (None, 5),
        (Some(b"c\0d\0"), 0),
    ]);
    let scanner = Scanner::new(&region, layout_of(&region));

    let holes: Vec<Hole> = Holes::new(scanner).collect();
    assert_eq!(
        holes,
        vec![Hole { addr: 0, len: 2 }, Hole { addr: 6, len: 5 }]
    );
    assert_eq!(largest_hole(&scanner), 5);
}

#[test]
fn test_largest_hole_full_region() {
    let region = MemRegion::from_bytes(b"a\0b\0".to_vec());
    let scanner = Scanner::new(&region, Layout::new(0, 4));

    assert_eq!(largest_hole(&scanner), 0);
}
