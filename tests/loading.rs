//! Integration tests for loading modules that cannot be inspected.
//!
//! Every failure here is a resolution error: nothing about a member was decided.

use serialscope::{metadata::typesystem::TypeRegistry, Error};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Missing.dll");

    let error = TypeRegistry::from_file(&path).unwrap_err();
    assert!(matches!(error, Error::FileError(_)));
    assert!(error.is_resolution());
}

#[test]
fn empty_file() {
    let file = NamedTempFile::new().unwrap();

    let error = TypeRegistry::from_file(file.path()).unwrap_err();
    assert!(matches!(error, Error::Empty));
    assert!(error.is_resolution());
}

#[test]
fn not_a_pe_image() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"this is not a module, just some text").unwrap();
    file.flush().unwrap();

    let error = TypeRegistry::from_file(file.path()).unwrap_err();
    assert!(error.is_resolution());
    assert!(!error.is_integrity());
}

#[test]
fn in_memory_garbage() {
    assert!(matches!(TypeRegistry::from_mem(Vec::new()), Err(Error::Empty)));

    let error = TypeRegistry::from_mem(vec![0x4D, 0x5A, 0x00, 0x00]).unwrap_err();
    assert!(error.is_resolution() || error.is_integrity());
}
