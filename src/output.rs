use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::errors::OmpsweepError;
use crate::types::ConfigurationResult;

pub const FALLBACK_OUTPUT_NAME: &str = "benchmark_results";
pub const CSV_HEADER: &str = "Threads,Avg Time (s)";

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

/// Split each quoted `--pass-args` string with POSIX shell rules and
/// concatenate the results into one argv.
pub fn split_pass_args(pass_args: &[String]) -> Result<Vec<String>, OmpsweepError> {
    let mut argv = Vec::new();
    for s in pass_args {
        let words = shlex::split(s).ok_or_else(|| OmpsweepError::PassArgs { input: s.clone() })?;
        argv.extend(words);
    }
    Ok(argv)
}

/// Human-readable output name from the script stem and forwarded tokens.
///
/// `bench.py` with `-A "--size=1000 --mode fast"` becomes
/// `bench_size_1000_mode_fast`.
pub fn make_output_name(script: &Path, pass_args: &[String]) -> Result<String, OmpsweepError> {
    let base = script
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut tokens = Vec::new();
    for word in split_pass_args(pass_args)? {
        let t = word.trim_start_matches('-').replace('=', "-");
        let t = NON_WORD.replace_all(&t, "_");
        if !t.is_empty() {
            tokens.push(t.into_owned());
        }
    }

    let suffix = tokens.join("_");
    Ok(match (base.is_empty(), suffix.is_empty()) {
        (false, false) => format!("{}_{}", base, suffix),
        (false, true) => base,
        (true, false) => format!("_{}", suffix),
        (true, true) => FALLBACK_OUTPUT_NAME.to_string(),
    })
}

/// `<base>.<ext>` without touching any extension already inside `base`.
pub fn artifact_path(base: &str, ext: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", base, ext))
}

/// Render the results table: one header line, then one row per configuration.
pub fn format_csv(results: &[ConfigurationResult]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for r in results {
        let _ = writeln!(out, "{},{:?}", r.threads, r.average);
    }
    out
}

/// Write `contents` to `path`, creating missing parent directories.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
