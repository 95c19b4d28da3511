//! `snow` — the Snowball-to-Rust compiler CLI.
//!
//! `snow [INFILE] [OUTFILE] [-d|--debug]`: reads Snowball source from
//! `INFILE` (stdin if omitted), writes generated Rust source to `OUTFILE`
//! (stdout if omitted). Everything else here — `-v`/`--verbose` logging,
//! `--config`, exit-code plumbing — is the ambient CLI shell around
//! that one-shot contract, not part of the translation itself.

mod config;
mod error;

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;

/// Compiles a Snowball program into Rust source.
#[derive(Parser, Debug)]
#[command(name = "snow")]
#[command(author = "Snowc Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles Snowball stemming programs to Rust", long_about = None)]
struct Cli {
    /// Snowball source file to read (stdin if omitted).
    infile: Option<PathBuf>,

    /// Rust source file to write (stdout if omitted).
    outfile: Option<PathBuf>,

    /// Emit `externals` entry points that return `(String, Program)` instead
    /// of just `String`, for test introspection.
    #[arg(short, long, env = "SNOW_DEBUG")]
    debug: bool,

    /// Raise log verbosity.
    #[arg(short, long, env = "SNOW_VERBOSE")]
    verbose: bool,

    /// Path to a config file (overrides the search path).
    #[arg(long, env = "SNOW_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let debug = cli.debug || config.debug;

    let source = read_input(cli.infile.as_deref()).context("reading Snowball source")?;
    tracing::debug!(bytes = source.len(), "read source");

    let code = snowc_drv::translate_str(&source, debug).context("compiling Snowball source")?;
    tracing::info!("compiled successfully");

    write_output(cli.outfile.as_deref(), &config, &code).context("writing Rust source")?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = fmt::layer().with_target(false).with_writer(std::io::stderr);
    // Best-effort: a second `main` in the same process (tests) would fail to
    // re-register a global subscriber; that isn't a reason to abort the CLI.
    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}

fn read_input(infile: Option<&std::path::Path>) -> anyhow::Result<String> {
    match infile {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(outfile: Option<&std::path::Path>, config: &Config, code: &str) -> anyhow::Result<()> {
    match outfile {
        Some(path) => {
            let resolved = config.resolve_output(path);
            if let Some(parent) = resolved.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
            }
            std::fs::write(&resolved, code)
                .with_context(|| format!("failed to write {}", resolved.display()))
        }
        None => {
            std::io::stdout()
                .write_all(code.as_bytes())
                .context("failed to write stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_infile_and_outfile() {
        let cli = Cli::parse_from(["snow", "in.sbl", "out.rs"]);
        assert_eq!(cli.infile, Some(PathBuf::from("in.sbl")));
        assert_eq!(cli.outfile, Some(PathBuf::from("out.rs")));
        assert!(!cli.debug);
    }

    #[test]
    fn parses_with_no_positionals() {
        let cli = Cli::parse_from(["snow"]);
        assert_eq!(cli.infile, None);
        assert_eq!(cli.outfile, None);
    }

    #[test]
    fn parses_debug_and_verbose_flags() {
        let cli = Cli::parse_from(["snow", "-d", "-v", "in.sbl"]);
        assert!(cli.debug);
        assert!(cli.verbose);
        assert_eq!(cli.infile, Some(PathBuf::from("in.sbl")));
    }

    #[test]
    fn parses_long_flags_and_config_path() {
        let cli = Cli::parse_from(["snow", "--debug", "--config", "/tmp/snow.toml"]);
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/snow.toml")));
    }
}
