//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! validates run paths, assembles the immutable plan, and runs the driver.

use anyhow::{Result, anyhow};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::cli::{Args, Command};
use crate::config::{self, CONFIG_ENV_VAR, validate_run_paths};
use crate::flatten::{self, FlattenPlan};
use crate::logging::init_tracing;
use crate::organize::{self, LogSink, OrganizePlan};
use crate::output::{self as out, StdoutSink, TracingSink};
use crate::rules::ClassificationMode;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle print-config before logging init
    if matches!(args.command, Command::PrintConfig) {
        print_config_location();
        return Ok(());
    }

    // First-run convenience: write a commented template config. Unlike the
    // source/dest flags this is never required, so the run continues.
    if let Some(path) = config::ensure_default_config_exists() {
        out::print_info(&format!(
            "A template filesort config was written to: {}",
            path.display()
        ));
    }

    // Build config (may read XML). CLI args override config values.
    let mut cfg = config::load_effective_config()?;
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so it can be flushed on exit
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(
        |e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        },
    )?;

    // The guard must be dropped on SIGINT to flush tracing_appender. There
    // is no cooperative mid-run cancellation; the handler flushes and exits.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            out::print_warn("Received interrupt; flushing logs...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
            std::process::exit(130);
        })
        .expect("failed to install signal handler");
    }

    debug!("Starting filesort: {:?}", args);

    // Assemble the rule before touching the filesystem so configuration
    // errors abort with no partial work.
    let mode = match &args.command {
        Command::Extension(opts) => Some(ClassificationMode::ByExtension(opts.to_rule())),
        Command::Size(opts) => Some(ClassificationMode::BySize(opts.to_rule()?)),
        Command::Date(opts) => Some(ClassificationMode::ByDate(opts.to_rule()?)),
        Command::Name(opts) => Some(ClassificationMode::ByName(opts.to_rule()?)),
        Command::Flatten(_) | Command::PrintConfig => None,
    };

    let source = cfg
        .source_base
        .clone()
        .ok_or_else(|| anyhow!("no source folder; pass --source or set <source_base> in the config file"))?;
    let dest = cfg
        .dest_base
        .clone()
        .ok_or_else(|| anyhow!("no destination folder; pass --dest or set <dest_base> in the config file"))?;
    validate_run_paths(&source, &dest)?;

    let mut sink: Box<dyn LogSink> = if args.json {
        Box::new(TracingSink)
    } else {
        Box::new(StdoutSink)
    };

    let result = (|| -> Result<organize::OperationResult> {
        match &args.command {
            Command::Flatten(opts) => {
                let extensions = opts
                    .types
                    .as_deref()
                    .map(parse_extension_set)
                    .filter(|set| !set.is_empty());
                let plan = FlattenPlan {
                    source_root: source.clone(),
                    dest_root: dest.clone(),
                    extensions,
                    on_duplicate: cfg.on_duplicate,
                    operation: cfg.operation,
                    preview: cfg.preview,
                };
                info!(source = %source.display(), dest = %dest.display(), operation = %cfg.operation, preview = cfg.preview, "flatten starting");
                flatten::run(&plan, sink.as_mut())
            }
            _ => {
                let mode = mode.expect("rule subcommands always carry a ruleset");
                let plan = OrganizePlan {
                    source_root: source.clone(),
                    dest_root: dest.clone(),
                    mode,
                    on_duplicate: cfg.on_duplicate,
                    operation: cfg.operation,
                    preview: cfg.preview,
                };
                info!(source = %source.display(), dest = %dest.display(), mode = plan.mode.label(), operation = %cfg.operation, preview = cfg.preview, "organize starting");
                organize::run(&plan, sink.as_mut())
            }
        }
    })();

    // Ensure logs are flushed before reporting/exit
    let report = match result {
        Ok(result) => {
            if cfg.preview {
                out::print_info(&format!(
                    "Preview complete: {} files would be processed ({} skipped, {} errors)",
                    result.processed, result.skipped, result.errors
                ));
            } else {
                out::print_success(&format!("Operation complete: {}", result.summary()));
            }
            Ok(())
        }
        Err(e) => Err(e),
    };

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    report
}

/// "pdf, .JPG,txt" -> {"pdf", "jpg", "txt"}
fn parse_extension_set(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV_VAR) {
        out::print_info(&format!("Using {CONFIG_ENV_VAR} (explicit):\n  {}\n", cfg_env));
        out::print_info(&format!(
            "To override, unset {CONFIG_ENV_VAR} or set it to another file."
        ));
        return;
    }
    match config::default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default filesort config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info(
                    "No config file exists there yet. Run any sort command to create a template.",
                );
            }
        }
        None => {
            out::print_error("Could not determine a default config path.");
        }
    }
}
