//! Tests for byte regions
//!
//! These tests verify:
//! - Blank regions read as EMPTY
//! - File-backed images load, pad and persist
//! - Backend naming and selection

use std::fs;

use avpdb::region::{Backend, ByteRegion, FileRegion, MemRegion};
use avpdb::storage::EMPTY;
use tempfile::TempDir;

// =============================================================================
// MemRegion Tests
// =============================================================================

#[test]
fn test_mem_region_starts_blank() {
    let region = MemRegion::new(32);

    assert_eq!(region.len(), 32);
    assert!((0..32).all(|a| region.read(a) == EMPTY));
}

#[test]
fn test_mem_region_read_write() {
    let mut region = MemRegion::new(8);

    region.write(3, b'x');

    assert_eq!(region.read(3), b'x');
    assert_eq!(region.as_bytes(), b"\xFF\xFF\xFFx\xFF\xFF\xFF\xFF");
}

// =============================================================================
// FileRegion Tests
// =============================================================================

#[test]
fn test_file_region_missing_file_is_blank() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("eeprom.bin");

    let region = FileRegion::open(&path, 64).unwrap();

    assert_eq!(region.len(), 64);
    assert!((0..64).all(|a| region.read(a) == EMPTY));
    assert!(region.is_dirty());
    assert!(!path.exists());
}

#[test]
fn test_file_region_flush_creates_image() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("eeprom.bin");

    let mut region = FileRegion::open(&path, 64).unwrap();
    region.write(0, b'a');
    region.flush().unwrap();

    let image = fs::read(&path).unwrap();
    assert_eq!(image.len(), 64);
    assert_eq!(image[0], b'a');
    assert_eq!(image[1], EMPTY);
    assert!(!region.is_dirty());
}

#[test]
fn test_file_region_persists_across_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("eeprom.bin");

    {
        let mut region = FileRegion::open(&path, 16).unwrap();
        for (i, &b) in b"ab\0cd\0".iter().enumerate() {
            region.write(i, b);
        }
        region.flush().unwrap();
    }

    let region = FileRegion::open(&path, 16).unwrap();
    let bytes: Vec<u8> = (0..6).map(|a| region.read(a)).collect();
    assert_eq!(bytes, b"ab\0cd\0");
    assert!(!region.is_dirty());
}

#[test]
fn test_file_region_pads_short_image() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("eeprom.bin");
    fs::write(&path, b"xy").unwrap();

    let region = FileRegion::open(&path, 8).unwrap();

    assert_eq!(region.read(0), b'x');
    assert_eq!(region.read(1), b'y');
    assert_eq!(region.read(7), EMPTY);
    assert!(region.is_dirty());
}

#[test]
fn test_file_region_unchanged_write_stays_clean() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("eeprom.bin");
    fs::write(&path, [EMPTY; 8]).unwrap();

    let mut region = FileRegion::open(&path, 8).unwrap();
    region.write(2, EMPTY);

    assert!(!region.is_dirty());
    assert_eq!(region.path(), path.as_path());
}

// =============================================================================
// Backend Tests
// =============================================================================

#[test]
fn test_backend_names() {
    assert_eq!(Backend::Eeprom.name(), "EEPROM");
    assert_eq!(Backend::Ram.name(), "RAM");
    assert_eq!(Backend::Ram.to_string(), "RAM");
}

#[test]
fn test_backend_other() {
    assert_eq!(Backend::Eeprom.other(), Backend::Ram);
    assert_eq!(Backend::Ram.other(), Backend::Eeprom);
}

#[test]
fn test_backend_from_arg_first_letter() {
    assert_eq!(Backend::from_arg("e"), Some(Backend::Eeprom));
    assert_eq!(Backend::from_arg("eeprom"), Some(Backend::Eeprom));
    assert_eq!(Backend::from_arg("r"), Some(Backend::Ram));
    assert_eq!(Backend::from_arg("rom"), Some(Backend::Ram));
    assert_eq!(Backend::from_arg("flash"), None);
    assert_eq!(Backend::from_arg(""), None);
}
