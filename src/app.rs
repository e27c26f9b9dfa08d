//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! validates paths and runs the slicer.

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use dirslice::cli::Args;
use dirslice::output as out;
use dirslice::{
    default_config_path, load_config_from_xml, shutdown, slice_dir_with, Config, DirSliceError,
    SliceOptions, SliceReport, CONFIG_ENV,
};

use crate::logging::init_tracing;

fn print_config_location() {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}\n",
            std::path::Path::new(&explicit).display()
        ));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default dirslice config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info(
                    "No config file exists there; built-in defaults apply. Example:\n\n<config>\n  <slice_size>1024</slice_size>\n  <log_level>normal</log_level>\n  <log_file>/path/to/dirslice.log</log_file>\n</config>\n",
                );
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}

/// Emit one structured error event for a failed run.
fn log_failure(e: &anyhow::Error) {
    match e.downcast_ref::<DirSliceError>() {
        Some(de) => {
            let code = de.code();
            match de {
                DirSliceError::SourceNotFound(path) => {
                    error!(code, kind = "source_not_found", path = %path.display(), "Slice failed")
                }
                DirSliceError::SourceNotDirectory(path) => {
                    error!(code, kind = "source_not_directory", path = %path.display(), "Slice failed")
                }
                DirSliceError::TargetNotEmpty(path) => {
                    error!(code, kind = "target_not_empty", path = %path.display(), "Slice failed")
                }
                DirSliceError::TargetInsideSource { target, source_dir } => {
                    error!(code, kind = "target_inside_source", target = %target.display(), source = %source_dir.display(), "Slice failed")
                }
                DirSliceError::InvalidSliceSize(size) => {
                    error!(code, kind = "invalid_slice_size", size = *size, "Slice failed")
                }
                DirSliceError::Interrupted => {
                    error!(code, kind = "interrupted", "Slice aborted by user")
                }
                DirSliceError::PartialMove { failed, total } => {
                    error!(code, kind = "partial_move", failed = *failed, total = *total, "Slice incomplete")
                }
            }
        }
        None => error!(error = %format!("{e:#}"), "Slice failed"),
    }
}

fn report_outcome(cfg: &Config, report: &SliceReport) -> Result<()> {
    if cfg.dry_run {
        for m in &report.moves.moved {
            out::print_user(&format!("{} -> {}", m.from.display(), m.to.display()));
        }
        out::print_info(&format!(
            "Dry-run: {} files would be moved into {} directories",
            report.total,
            report.group_dirs.len().max(1)
        ));
        return Ok(());
    }

    for f in &report.moves.failed {
        out::print_warn(&format!("Could not move {}: {:#}", f.from.display(), f.error));
    }
    if !report.moves.failed.is_empty() {
        return Err(DirSliceError::PartialMove {
            failed: report.moves.failed.len(),
            total: report.total,
        }
        .into());
    }

    out::print_success(&format!(
        "Moved {} files into {}",
        report.moves.moved.len(),
        cfg.target.display()
    ));
    Ok(())
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // Config file first, CLI flags win.
    let mut cfg = Config::default();
    if let Some(settings) = load_config_from_xml()? {
        settings.apply_to(&mut cfg);
    }
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json)
        .inspect_err(|e| out::print_error(&format!("Failed to initialize logging: {e}")))?;

    // Guard is dropped on SIGINT as well so buffered file logs are flushed.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install signal handler")?;
    }

    debug!("Starting dirslice: {:?}", args);

    let result = (|| -> Result<()> {
        cfg.validate()?;
        cfg.prepare_target()?;
        let opts = SliceOptions {
            group_size: cfg.slice_size,
            dry_run: cfg.dry_run,
        };
        let report = slice_dir_with(&cfg.source, &cfg.target, opts)?;
        info!(source = %cfg.source.display(), target = %cfg.target.display(), "Slice completed");
        report_outcome(&cfg, &report)
    })();

    if let Err(e) = &result {
        log_failure(e);
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}
