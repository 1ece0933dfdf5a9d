use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, warn};

use corel::ast;
use corel::config::{self as cfg, RunOptions};
use corel::executor::{Interpreter, ReportingEffector};
use corel::sources;

/// Corel CLI
#[derive(Debug, Parser)]
#[command(
    name = corel::PKG_NAME,
    version = corel::PKG_VERSION,
    about = "Load a JSON-encoded Corel macro and run it, reporting each action"
)]
struct Args {
    /// Path to the JSON program (`-` reads standard input)
    #[arg(short = 'f', long = "file", default_value = "ast.json")]
    file: PathBuf,

    /// Reject magnitudes, directions and buttons a real backend could not use
    #[arg(long = "strict")]
    strict: bool,

    /// Print the built tree to stdout before running it
    #[arg(long = "print-ast")]
    print_ast: bool,

    /// Print the canonical JSON form of the built program to stdout
    #[arg(long = "emit-json")]
    emit_json: bool,

    /// Build (and print) only; do not execute
    #[arg(long = "no-run")]
    no_run: bool,

    /// Set log level (e.g., trace, debug, info, warn, error). Overrides RUST_LOG.
    #[arg(long = "log-level")]
    log_level: Option<String>,

    /// Print the JSON Schema for the program format and exit
    #[arg(long = "print-schema")]
    print_schema: bool,
}

impl Args {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            strict: self.strict,
            print_ast: self.print_ast,
            emit_json: self.emit_json,
            no_run: self.no_run,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    corel::init_tracing(args.log_level.as_deref());
    if let Some(level) = args.log_level.as_deref().filter(|l| corel::parse_level(l).is_none()) {
        warn!(%level, "Unknown log level; using default");
    }

    if args.print_schema {
        let schema = cfg::generate_schema();
        let json = serde_json::to_string_pretty(&schema)?;
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }

    let options = args.run_options();
    info!(
        version = corel::PKG_VERSION,
        file = %args.file.display(),
        strict = options.strict,
        "Starting Corel"
    );

    // Decode and build; either failing means there is nothing to run.
    let source = sources::source_for_path(&args.file);
    let forest = cfg::load_forest_from_source(source.as_ref())
        .with_context(|| format!("Failed to load program from {}", source.location()))?;
    debug!(target: "corel", roots = forest.len(), "Program built successfully");

    if options.print_ast {
        println!("AST:");
        print!("{}", ast::render_forest(&forest));
    }
    if options.emit_json {
        println!("{}", cfg::forest_to_json_pretty(&forest)?);
    }
    if options.no_run {
        info!("Skipping execution (--no-run)");
        return Ok(ExitCode::SUCCESS);
    }

    let mut interpreter = Interpreter::new(&forest, ReportingEffector::new(options.strict));
    let report = interpreter.run();

    if report.is_success() {
        info!(roots = report.roots, "Corel exited");
        Ok(ExitCode::SUCCESS)
    } else {
        // Each failure was already logged by the interpreter.
        warn!(
            roots = report.roots,
            failed = report.failures.len(),
            "Corel exited with failed statements"
        );
        Ok(ExitCode::FAILURE)
    }
}
