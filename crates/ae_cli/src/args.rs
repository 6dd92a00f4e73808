// crates/ae_cli/src/args.rs
//
// Offline CLI argument surface.
// - No networked paths (reject any scheme:// like http/https/file)
// - --snapshot is required and must be a local file; --config is optional
// - Output: --out dir receives dashboard.json
// - --validate-only loads and checks inputs without evaluating

use clap::Parser;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ae",
    disable_help_subcommand = true,
    about = "Offline, deterministic assessment scoring: project snapshot in, dashboard.json out"
)]
pub struct Args {
    /// Project snapshot JSON (project, risks, assessments, questionnaire, scans).
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Engine config JSON (weights, bands, scan penalty). Defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Validate inputs only (load + shape + config domain), do not evaluate.
    #[arg(long)]
    pub validate_only: bool,

    /// Only warnings and errors on stderr.
    #[arg(long)]
    pub quiet: bool,

    /// Also print the canonical dashboard JSON to stdout.
    #[arg(long)]
    pub print: bool,
}

/// Errors surfaced by argument validation. Messages are short and stable.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    ae_io::looks_like_url_strict(&lower)
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

/// Ensure a path is local (no scheme) and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    match fs::metadata(p) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(CliError::NotFound(format!("{label} {}", p.display()))),
    }
}

/// Best-effort normalization to an absolute path.
/// If canonicalize fails (e.g., path doesn't exist yet), join onto the CWD.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

/// Scheme/existence checks and path normalization on already-parsed args.
pub fn validate(mut args: Args) -> Result<Args, CliError> {
    ensure_local_path(&args.out)?;
    ensure_local_exists(&args.snapshot, "--snapshot")?;
    if let Some(cfg) = &args.config {
        ensure_local_exists(cfg, "--config")?;
    }

    args.snapshot = normalize_path(&args.snapshot);
    args.config = args.config.take().map(|p| normalize_path(&p));
    args.out = normalize_path(&args.out);
    Ok(args)
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(snapshot: &Path) -> Args {
        Args {
            snapshot: snapshot.to_path_buf(),
            config: None,
            out: PathBuf::from("out"),
            validate_only: false,
            quiet: false,
            print: false,
        }
    }

    #[test]
    fn flags_parse() {
        let a = Args::try_parse_from(["ae", "--snapshot", "s.json", "--validate-only", "--quiet"]).unwrap();
        assert_eq!(a.snapshot, PathBuf::from("s.json"));
        assert!(a.validate_only && a.quiet && !a.print);
        assert_eq!(a.out, PathBuf::from("."));
        assert!(Args::try_parse_from(["ae"]).is_err(), "--snapshot is required");
    }

    #[test]
    fn ensure_local_path_rejects_schemes() {
        assert!(ensure_local_path(Path::new("http://x")).is_err());
        assert!(ensure_local_path(Path::new("file://C:/x.json")).is_err());
        assert!(ensure_local_path(Path::new("HTTPS://x/y.json")).is_err());
        assert!(ensure_local_path(Path::new(r"C:\local\file.json")).is_ok());
        assert!(ensure_local_path(Path::new("/tmp/file.json")).is_ok());
    }

    #[test]
    fn validate_requires_existing_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let snap = dir.path().join("snap.json");
        assert!(matches!(validate(args(&snap)), Err(CliError::NotFound(_))));

        fs::write(&snap, "{}").unwrap();
        let ok = validate(args(&snap)).unwrap();
        assert!(ok.snapshot.is_absolute());
        assert!(ok.out.is_absolute());

        let mut with_cfg = args(&snap);
        with_cfg.config = Some(dir.path().join("nope.json"));
        assert!(matches!(validate(with_cfg), Err(CliError::NotFound(_))));

        let mut remote_out = args(&snap);
        remote_out.out = PathBuf::from("https://example.org/out");
        assert!(matches!(validate(remote_out), Err(CliError::NonLocalPath(_))));
    }

    #[test]
    fn normalize_path_returns_absolute() {
        assert!(normalize_path(Path::new("does/not/exist.txt")).is_absolute());
    }
}
