//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! validates the source, prepares the destination, and runs the sort.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};

use ext_sort::cli::Args;
use ext_sort::config::paths::CONFIG_ENV;
use ext_sort::config::xml::{apply_xml_settings, load_config_from_xml};
use ext_sort::output as out;
use ext_sort::{Config, LoadResult, default_config_path, shutdown, sort_tree};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
            out::print_info(&format!("Using EXT_SORT_CONFIG (explicit):\n  {}\n", cfg_env));
            out::print_info("To override, unset EXT_SORT_CONFIG or set it to another file.");
            return Ok(());
        }
        match default_config_path() {
            Ok(p) => {
                out::print_info(&format!("Default ext_sort config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info("No config file exists there yet. Run without --print-config to create a template.");
                }
            }
            Err(e) => {
                out::print_error(&format!("Could not determine a default config path: {e}"));
            }
        }
        return Ok(());
    }

    // Create template config if none exists (before logging init)
    if let LoadResult::CreatedTemplate(path) = ext_sort::config::load_or_init()? {
        out::print_success(&format!(
            "A template ext_sort config was written to: {}",
            path.display()
        ));
        out::print_info("Edit the file to set `sorted_base` and optionally `log_level` and `log_file`. Example:\n\n<config>\n  <sorted_base>/path/to/sorted</sorted_base>\n  <log_level>normal</log_level>\n  <log_file>/path/to/ext_sort.log</log_file>\n</config>\n");
        out::print_info("Then re-run this command. To use a different location set EXT_SORT_CONFIG.");
        return Ok(());
    }

    // Build config: defaults, then config file, then CLI (CLI wins).
    let mut cfg = Config::default();
    if let Some(xml) = load_config_from_xml() {
        apply_xml_settings(&mut cfg, xml);
    }
    args.apply_overrides(&mut cfg);

    if cfg.source_base.as_os_str().is_empty() {
        out::print_error("No source directory given. Pass one as SOURCE or with --source.");
        anyhow::bail!("missing source directory");
    }

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt: Option<tracing_appender::non_blocking::WorkerGuard> =
        init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .expect("failed to install signal handler");
    }

    if shutdown::is_requested() {
        return Ok(());
    }

    debug!("Starting ext_sort: {:?}", args);

    // Main run (so we can drop guard after)
    let result = (|| -> Result<()> {
        cfg.validate_and_prepare()?;
        let report = sort_tree(&cfg)?;

        if cfg.dry_run {
            out::print_info(&format!(
                "Dry-run: would copy {} file(s) into {} bucket(s) under '{}'",
                report.copied,
                report.buckets,
                cfg.sorted_base.display()
            ));
        } else {
            out::print_user(&format!(
                "Sorted {} file(s) into {} bucket(s) under '{}'",
                report.copied,
                report.buckets,
                cfg.sorted_base.display()
            ));
        }
        if report.failed > 0 {
            out::print_warn(&format!(
                "{} file(s) could not be copied; each failure was reported above",
                report.failed
            ));
            warn!(failed = report.failed, "Run completed with per-file failures");
        }
        info!(
            copied = report.copied,
            failed = report.failed,
            buckets = report.buckets,
            "Sort completed"
        );
        Ok(())
    })();

    if let Err(e) = &result {
        error!(error = ?e, "Run failed");
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}
