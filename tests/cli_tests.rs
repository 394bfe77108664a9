use clap::Parser;
use ext_sort::cli::Args;
use ext_sort::config::{Config, LogLevel};
use std::path::PathBuf;

#[test]
fn resolved_source_precedence_flag_over_positional() {
    let args = Args::parse_from(["ext_sort", "--source", "/tmp/flag_path", "/tmp/pos_path"]);
    let src = args.resolved_source().unwrap();
    assert_eq!(src, PathBuf::from("/tmp/flag_path"));
}

#[test]
fn resolved_source_uses_positional_when_flag_absent() {
    let args = Args::parse_from(["ext_sort", "/tmp/pos_path"]);
    let src = args.resolved_source().unwrap();
    assert_eq!(src, PathBuf::from("/tmp/pos_path"));
}

#[test]
fn resolved_source_none_when_nothing_given() {
    let args = Args::parse_from(["ext_sort"]);
    assert!(args.resolved_source().is_none());
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["ext_sort", "--debug", "--log-level", "quiet"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Debug); // --debug wins

    let args = Args::parse_from(["ext_sort", "--log-level", "info"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Info);
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "ext_sort",
        "--source",
        "/in",
        "--destination",
        "/out",
        "--log-level",
        "info",
        "--dry-run",
        "--preserve-metadata",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source_base, PathBuf::from("/in"));
    assert_eq!(cfg.sorted_base, PathBuf::from("/out"));
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert!(cfg.dry_run);
    assert!(cfg.preserve_metadata);
}

#[test]
fn apply_overrides_noop_when_unset() {
    let args = Args::parse_from(["ext_sort", "/in"]);
    let mut cfg = Config::default();
    let default_dest = cfg.sorted_base.clone();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.sorted_base, default_dest);
    assert!(!cfg.dry_run);
    assert!(!cfg.preserve_metadata);
}
