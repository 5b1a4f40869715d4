use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::errors::OmpsweepError;

/// Interpreter used for `.py` targets when none is configured.
pub const DEFAULT_PYTHON: &str = "python3";

static FLOAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?").expect("float pattern is valid")
});

/// Runs the target once for a given thread count and returns its elapsed time.
pub trait Invoker {
    fn invoke(&mut self, threads: u32) -> Result<f64, OmpsweepError>;
}

/// Invokes the target script as a child process with the thread-count
/// variable set in a copy of the current environment.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    program: OsString,
    leading_args: Vec<OsString>,
    script_args: Vec<String>,
    env_var: String,
}

impl ProcessInvoker {
    /// Resolve how `script` is launched.
    ///
    /// An explicit `interpreter` wins, `.py` files fall back to
    /// [`DEFAULT_PYTHON`], and anything else is executed directly.
    pub fn new(
        script: &Path,
        interpreter: Option<&str>,
        script_args: Vec<String>,
        env_var: impl Into<String>,
    ) -> Self {
        let interpreter = interpreter.map(str::to_string).or_else(|| {
            (script.extension().and_then(|e| e.to_str()) == Some("py"))
                .then(|| DEFAULT_PYTHON.to_string())
        });

        let (program, leading_args) = match interpreter {
            Some(interp) => (OsString::from(interp), vec![script.as_os_str().to_owned()]),
            None => (executable_path(script).into_os_string(), Vec::new()),
        };

        Self {
            program,
            leading_args,
            script_args,
            env_var: env_var.into(),
        }
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    fn command(&self, threads: u32) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .args(&self.script_args)
            .env(&self.env_var, threads.to_string());
        cmd
    }
}

impl Invoker for ProcessInvoker {
    fn invoke(&mut self, threads: u32) -> Result<f64, OmpsweepError> {
        let program = self.program.to_string_lossy().into_owned();
        debug!(threads, program = %program, env_var = %self.env_var, "spawning target");

        let output = self
            .command(threads)
            .output()
            .map_err(|source| OmpsweepError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OmpsweepError::Execution {
                threads,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        trace!(threads, stdout = %stdout, "target finished");

        let elapsed = parse_elapsed(&stdout)?;
        debug!(threads, elapsed, "sample collected");
        Ok(elapsed)
    }
}

/// A bare file name would be looked up on `PATH`; anchor it to the cwd.
fn executable_path(script: &Path) -> PathBuf {
    if script.is_relative() && script.parent().is_none_or(|p| p.as_os_str().is_empty()) {
        Path::new(".").join(script)
    } else {
        script.to_path_buf()
    }
}

/// Extract the elapsed time from a target's stdout.
///
/// The last non-empty line is tried as a float first. Only when that line is
/// not a number at all is the whole output searched for the first
/// float-looking substring. A last line that parses to `nan` or an overflow
/// is an error rather than a reason to look elsewhere.
pub fn parse_elapsed(stdout: &str) -> Result<f64, OmpsweepError> {
    let parse_error = || OmpsweepError::Parse {
        stdout: stdout.to_string(),
    };

    match parse_last_line(stdout) {
        LastLine::Finite(value) => return Ok(value),
        LastLine::NonFinite => return Err(parse_error()),
        LastLine::NotNumeric => {}
    }
    find_first_float(stdout).ok_or_else(parse_error)
}

enum LastLine {
    Finite(f64),
    NonFinite,
    NotNumeric,
}

fn parse_last_line(stdout: &str) -> LastLine {
    // Progress output rewrites the line with `\r`; treat it as a break too.
    let line = stdout
        .split(['\n', '\r'])
        .map(str::trim)
        .rev()
        .find(|l| !l.is_empty());
    match line.map(str::parse::<f64>) {
        Some(Ok(v)) if v.is_finite() => LastLine::Finite(v),
        Some(Ok(_)) => LastLine::NonFinite,
        _ => LastLine::NotNumeric,
    }
}

fn find_first_float(stdout: &str) -> Option<f64> {
    let m = FLOAT_PATTERN.find(stdout)?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}
