use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use owo_colors::Stream;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ompsweep::config::Config;
use ompsweep::display;
use ompsweep::invoke::ProcessInvoker;
use ompsweep::output;
use ompsweep::plot;
use ompsweep::sweep::sweep;
use ompsweep::threads::{self, DEFAULT_MAX_THREADS, DEFAULT_MIN_THREADS, DEFAULT_STEP_THREADS};
use ompsweep::types::{DEFAULT_ENV_VAR, SweepReport};

const DEFAULT_REPEAT: usize = 3;

const EXAMPLES: &str = r#"Options given with --pass-args (or after `--`) are forwarded to the target script.

Examples:
  ompsweep myscript.py --min-threads 1 --max-threads 8 --repeat 5
  ompsweep myscript.py --pass-args "--size 1000000 --mode fast"
  ompsweep myscript.py --min-threads 2 --max-threads 16 --output results/run1 -A "--method fast"
  ompsweep ./bench --thread-list 1,2,4,8 -- --iterations 10"#;

#[derive(Parser)]
#[command(
    name = "ompsweep",
    version,
    about = "Benchmark a script across OMP_NUM_THREADS settings",
    arg_required_else_help = true,
    after_help = EXAMPLES
)]
struct Cli {
    /// Path to the script that prints its compute time
    script: PathBuf,

    /// Comma separated thread counts; overrides the min/max/step range
    #[arg(long)]
    thread_list: Option<String>,

    /// Minimum thread count to test [default: 2]
    #[arg(long)]
    min_threads: Option<u32>,

    /// Maximum thread count to test [default: 20]
    #[arg(long)]
    max_threads: Option<u32>,

    /// Thread counts to step by [default: 2]
    #[arg(long)]
    step_threads: Option<u32>,

    /// Repetitions per thread count, averaged to reduce noise [default: 3]
    #[arg(long)]
    repeat: Option<usize>,

    /// Output base name for the CSV and SVG files
    #[arg(long)]
    output: Option<String>,

    /// Skip plotting results
    #[arg(long)]
    no_plot: bool,

    /// Quoted string of args for the target script; may be repeated
    #[arg(short = 'A', long = "pass-args", value_name = "\"ARGS\"", allow_hyphen_values = true)]
    pass_args: Vec<String>,

    /// Program used to run the script (default: python3 for .py, else run directly)
    #[arg(long)]
    interpreter: Option<String>,

    /// Environment variable that carries the thread count [default: OMP_NUM_THREADS]
    #[arg(long)]
    env_var: Option<String>,

    /// Print the full report as JSON instead of the summary table
    #[arg(long)]
    json: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Config file to use instead of discovering ompsweep.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Arguments forwarded verbatim to the target script
    #[arg(last = true)]
    script_args: Vec<String>,
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "ompsweep=debug" } else { "ompsweep=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn load_config(explicit: Option<&PathBuf>) -> Result<Config> {
    if let Some(path) = explicit {
        return Ok(Config::load(path)?);
    }
    let cwd = std::env::current_dir()?;
    let found = Config::discover(&cwd, dirs::config_dir().as_deref())?;
    Ok(match found {
        Some((path, config)) => {
            debug!(path = %path.display(), "using config");
            config
        }
        None => Config::default(),
    })
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;

    if !cli.script.is_file() {
        anyhow::bail!("Script not found: {}", cli.script.display());
    }

    let repeat = cli.repeat.or(config.repeat).unwrap_or(DEFAULT_REPEAT);
    let env_var = cli
        .env_var
        .or(config.env_var)
        .unwrap_or_else(|| DEFAULT_ENV_VAR.to_string());
    let interpreter = cli.interpreter.or(config.interpreter);
    let plot_enabled = !cli.no_plot && config.plot.unwrap_or(true);

    let thread_counts = threads::thread_plan(
        cli.thread_list.as_deref().or(config.thread_list.as_deref()),
        cli.min_threads.or(config.min_threads).unwrap_or(DEFAULT_MIN_THREADS),
        cli.max_threads.or(config.max_threads).unwrap_or(DEFAULT_MAX_THREADS),
        cli.step_threads.or(config.step_threads).unwrap_or(DEFAULT_STEP_THREADS),
    )?;

    let mut script_args = output::split_pass_args(&cli.pass_args)?;
    script_args.extend(cli.script_args.iter().cloned());

    let output_name = match cli.output {
        Some(name) => name,
        None => output::make_output_name(&cli.script, &cli.pass_args)?,
    };

    // Keep stdout clean for the JSON document.
    let json = cli.json;
    let human_stream = if json { Stream::Stderr } else { Stream::Stdout };
    let say = |msg: &str| {
        if json {
            eprintln!("{}", msg);
        } else {
            println!("{}", msg);
        }
    };

    say(&format!("Benchmarking with output name {}...", output_name));
    debug!(threads = ?thread_counts, repeat, env_var = %env_var, "sweep plan");

    let mut invoker = ProcessInvoker::new(
        &cli.script,
        interpreter.as_deref(),
        script_args.clone(),
        env_var.clone(),
    );

    let started_at = Utc::now();
    let results = sweep(&mut invoker, &thread_counts, repeat, |r| {
        say(&display::format_progress(r, human_stream))
    })?;
    let finished_at = Utc::now();

    let csv_path = output::artifact_path(&output_name, "csv");
    output::write_artifact(&csv_path, &output::format_csv(&results))?;
    say(&format!("\nSaved results to {}", csv_path.display()));

    if plot_enabled {
        let svg_path = output::artifact_path(&output_name, "svg");
        output::write_artifact(&svg_path, &plot::render_svg(&results, &output_name))?;
        say(&format!("Saved plot to {}", svg_path.display()));
    }

    if json {
        let report = SweepReport {
            script: cli.script,
            script_args,
            env_var,
            repeat,
            started_at,
            finished_at,
            results,
        };
        println!("{}", display::format_json(&report));
    } else {
        print!("\n{}", display::format_summary(&results));
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}
