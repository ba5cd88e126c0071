//! Tests for storage devices
//!
//! These tests verify:
//! - Creating, flushing and reloading image files
//! - Corruption detection on load
//! - Databases surviving a restart on a file image
//! - Sync strategies controlling when the image is written

mod persistence_tests;

use std::path::PathBuf;

use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

pub fn setup_temp_image() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("device.eep");
    (temp_dir, path)
}
