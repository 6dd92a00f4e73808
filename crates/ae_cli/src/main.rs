// crates/ae_cli/src/main.rs
//
// Exit codes, typed error mapping, logging setup, the validate-only
// short-circuit, and the run path (load → evaluate → write dashboard.json).

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const VALIDATION: u8 = 2;
    pub const IO: u8 = 4;
}

use std::io::Write;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use ae_io::canonical_json;
use ae_pipeline::{run_from_paths, validate_inputs, PipelineError};
use args::{parse_and_validate as parse_cli, Args};

/// Log filter env var; falls back to `info` (or `warn` with --quiet).
const LOG_ENV: &str = "AE_LOG";

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Shape / config domain failures in the inputs.
    Validation(String),
    /// Read/write/path failures, or failure to build the output.
    Io(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("ae: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION);
        }
    };
    init_tracing(args.quiet);

    let res = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    match res {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(e) => {
            eprintln!("ae: error: {e}");
            ExitCode::from(map_error(&e))
        }
    }
}

fn init_tracing(quiet: bool) {
    let fallback = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    // A second init (tests, embedding) is not an error worth failing over.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Validate-only path (no evaluation, no artifacts).
fn validate_only(args: &Args) -> Result<(), MainError> {
    validate_inputs(&args.snapshot, args.config.as_deref()).map_err(map_pipeline_err)?;
    if !args.quiet {
        eprintln!("validate-only: inputs OK");
    }
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let dash = run_from_paths(&args.snapshot, args.config.as_deref()).map_err(map_pipeline_err)?;

    let path = args.out.join("dashboard.json");
    canonical_json::write_canonical_file(&path, &dash)
        .map_err(|e| MainError::Io(format!("write dashboard.json: {e}")))?;

    if args.print {
        let bytes = canonical_json::to_canonical_bytes(&dash)
            .map_err(|e| MainError::Io(format!("serialize dashboard: {e}")))?;
        let mut out = std::io::stdout().lock();
        out.write_all(&bytes)
            .and_then(|_| out.write_all(b"\n"))
            .map_err(|e| MainError::Io(format!("stdout: {e}")))?;
    }

    if !args.quiet {
        eprintln!("run: {} written to {}", dash.id, path.display());
    }
    Ok(())
}

fn map_error(e: &MainError) -> u8 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) => exitcodes::IO,
    }
}

/// Translate pipeline errors into exit-code buckets.
fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Input(m) | PipelineError::Config(m) => MainError::Validation(m),
        PipelineError::Io(m) | PipelineError::Build(m) => MainError::Io(m),
    }
}
