#![cfg(unix)]

use assert_fs::prelude::*;
use ext_sort::{Config, sort_tree};
use std::fs;
use std::os::unix::fs::PermissionsExt;

#[test]
fn preserve_metadata_keeps_permission_bits() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    src.create_dir_all().unwrap();
    let script = src.child("run.sh");
    script.write_str("#!/bin/sh\n").unwrap();
    fs::set_permissions(script.path(), fs::Permissions::from_mode(0o755)).unwrap();
    let dst = temp.child("dest");

    let mut cfg = Config::new(src.path(), dst.path());
    cfg.preserve_metadata = true;
    cfg.validate_and_prepare().unwrap();
    sort_tree(&cfg).unwrap();

    let mode = fs::metadata(dst.path().join("sh/run.sh"))
        .unwrap()
        .permissions()
        .mode()
        & 0o777;
    assert_eq!(mode, 0o755);
}

#[test]
fn default_run_does_not_carry_modes() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src");
    src.create_dir_all().unwrap();
    let script = src.child("run.sh");
    script.write_str("#!/bin/sh\n").unwrap();
    fs::set_permissions(script.path(), fs::Permissions::from_mode(0o700)).unwrap();
    let dst = temp.child("dest");

    let cfg = Config::new(src.path(), dst.path());
    cfg.validate_and_prepare().unwrap();
    sort_tree(&cfg).unwrap();

    // Copy succeeded; the mode is whatever the process umask produced.
    assert!(dst.path().join("sh/run.sh").exists());
}
