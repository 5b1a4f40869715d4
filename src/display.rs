use owo_colors::{OwoColorize, Stream, Style};

use crate::types::{ConfigurationResult, SweepReport};

fn style_threads() -> Style {
    Style::new().cyan().bold()
}

/// `"<threads> threads: <avg> s"`, printed as each configuration completes.
///
/// `stream` is where the line will be written; colour is only used when that
/// stream supports it.
pub fn format_progress(result: &ConfigurationResult, stream: Stream) -> String {
    let threads = result.threads.to_string();
    let avg = format!("{:.6}", result.average);
    format!(
        "{} threads: {} s",
        threads.if_supports_color(stream, |s| s.style(style_threads())),
        avg.if_supports_color(stream, |s| s.yellow()),
    )
}

fn min_max(samples: &[f64]) -> (f64, f64) {
    samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
            (lo.min(s), hi.max(s))
        })
}

/// Aligned end-of-run table with the spread of each configuration's samples.
pub fn format_summary(results: &[ConfigurationResult]) -> String {
    let mut out = String::new();
    if results.is_empty() {
        return out;
    }

    let threads_width = results
        .iter()
        .map(|r| r.threads.to_string().len())
        .max()
        .unwrap_or(0)
        .max("Threads".len());

    let header = format!(
        "{:>tw$}  {:>12}  {:>10}  {:>10}  {:>11}",
        "Threads",
        "Avg Time (s)",
        "Min (s)",
        "Max (s)",
        "Speed (1/s)",
        tw = threads_width
    );
    out.push_str(
        &header
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string(),
    );
    out.push('\n');

    for r in results {
        let (lo, hi) = min_max(&r.samples);
        let threads = format!("{:>tw$}", r.threads, tw = threads_width);
        out.push_str(&format!(
            "{}  {:>12.6}  {:>10.6}  {:>10.6}  {:>11.3}\n",
            threads.if_supports_color(Stream::Stdout, |s| s.style(style_threads())),
            r.average,
            lo,
            hi,
            r.speed()
        ));
    }

    out
}

pub fn format_json(report: &SweepReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn result(threads: u32, samples: &[f64]) -> ConfigurationResult {
        ConfigurationResult::from_samples(threads, samples.to_vec()).unwrap()
    }

    // Tests run without a tty, so owo-colors emits no escape codes.

    #[test]
    fn progress_line() {
        assert_eq!(
            format_progress(&result(4, &[0.5, 1.5]), Stream::Stdout),
            "4 threads: 1.000000 s"
        );
    }

    #[test]
    fn progress_rounds_to_microseconds() {
        assert_eq!(
            format_progress(&result(16, &[0.1234567]), Stream::Stdout),
            "16 threads: 0.123457 s"
        );
    }

    #[test]
    fn progress_for_stderr_has_no_escapes_when_redirected() {
        let line = format_progress(&result(2, &[0.25]), Stream::Stderr);
        assert_eq!(line, "2 threads: 0.250000 s");
        assert!(!line.contains('\u{1b}'));
    }

    #[test]
    fn summary_empty() {
        assert_eq!(format_summary(&[]), "");
    }

    #[test]
    fn summary_has_row_per_configuration() {
        let out = format_summary(&[result(8, &[1.0, 3.0]), result(2, &[0.5])]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Avg Time (s)"));
        assert!(lines[1].trim_start().starts_with('8'));
        assert!(lines[1].contains("2.000000"));
        assert!(lines[1].contains("1.000000"));
        assert!(lines[1].contains("3.000000"));
        assert!(lines[2].trim_start().starts_with('2'));
        assert!(lines[2].contains("2.000"));
    }

    #[test]
    fn summary_columns_align() {
        let out = format_summary(&[result(2, &[1.0]), result(128, &[0.25])]);
        let widths: Vec<usize> = out.lines().map(|l| l.len()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn json_schema() {
        let started = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let report = SweepReport {
            script: PathBuf::from("bench.py"),
            script_args: vec!["--size".to_string(), "10".to_string()],
            env_var: "OMP_NUM_THREADS".to_string(),
            repeat: 2,
            started_at: started,
            finished_at: started,
            results: vec![result(2, &[1.0, 2.0])],
        };

        let parsed: serde_json::Value = serde_json::from_str(&format_json(&report)).unwrap();
        assert_eq!(parsed["script"], "bench.py");
        assert_eq!(parsed["env_var"], "OMP_NUM_THREADS");
        assert_eq!(parsed["repeat"], 2);
        assert_eq!(parsed["script_args"][1], "10");
        assert_eq!(parsed["started_at"], "2026-01-02T03:04:05Z");
        assert_eq!(parsed["results"][0]["threads"], 2);
        assert_eq!(parsed["results"][0]["average"], 1.5);
        assert_eq!(parsed["results"][0]["samples"].as_array().unwrap().len(), 2);
    }
}
