//! snowc-drv — drives the lex→parse→generate pipeline for one Snowball
//! source unit.
//!
//! There is no separate analysis/optimization stage: `snowc-parse` already
//! resolves every reference as it parses, and `snowc-gen` lowers
//! structurally in one pass, so this crate's whole job is wiring those two
//! together and turning their errors into one umbrella type the CLI can
//! report.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use snowc_gen::CodeGenError;
use snowc_parse::ParseError;

/// Errors from any stage of translating one Snowball source unit.
#[derive(Debug, Error)]
pub enum DriveError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    CodeGen(#[from] CodeGenError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DriveResult<T> = Result<T, DriveError>;

/// Translates Snowball source text into a complete Rust source string.
/// `debug` controls whether the generated `externals (...)` functions
/// return just the transformed string or the string paired with the
/// `Program` instance that produced it.
pub fn translate_str(source: &str, debug: bool) -> DriveResult<String> {
    let (program, session) = snowc_parse::parse(source)?;
    let (code, _session) = snowc_gen::generate(&program, session, debug)?;
    Ok(code)
}

/// Reads `input`, translates it, and writes the result to `output`. The
/// output is only written once translation fully succeeds — a failing
/// compile never leaves a partial or truncated file at `output`.
pub fn translate_file(input: &Path, output: &Path, debug: bool) -> DriveResult<()> {
    let source = fs::read_to_string(input).map_err(|source| DriveError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let code = translate_str(&source, debug)?;
    fs::write(output, code).map_err(|source| DriveError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_a_minimal_program_to_rust_source() {
        let source = "externals (stem) routines (stem) define stem as (true)";
        let code = translate_str(source, false).unwrap();
        assert!(code.contains("pub fn stem(input: &str) -> String"));
        assert!(code.contains("fn r_stem(&mut self, s: &mut SnowString) -> bool"));
    }

    #[test]
    fn propagates_parse_errors() {
        let err = translate_str("routines (r) define r as (nope)", false).unwrap_err();
        assert!(matches!(err, DriveError::Parse(ParseError::UnresolvedCommandReference { .. })));
    }

    #[test]
    fn translate_file_writes_only_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.sbl");
        let output = dir.path().join("out.rs");
        fs::write(&input, "externals (stem) routines (stem) define stem as (true)").unwrap();

        translate_file(&input, &output, false).unwrap();
        assert!(output.exists());
        assert!(fs::read_to_string(&output).unwrap().contains("pub fn stem"));
    }

    #[test]
    fn translate_file_leaves_no_output_on_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.sbl");
        let output = dir.path().join("out.rs");
        fs::write(&input, "routines (r) define r as (nope)").unwrap();

        assert!(translate_file(&input, &output, false).is_err());
        assert!(!output.exists());
    }
}
