// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::{DateTime, Utc};
use facloc_core::prelude::Cost;
use facloc_model::prelude::{Problem, ProblemLoader, Solution, SolutionValidator};
use facloc_solver::prelude::{
    ExactSearch, InstanceModel, LnsConfig, LnsSearch, Optimizer, SearchError,
};
use serde::Serialize;
use std::{
    error::Error,
    fs::File,
    fmt::Write as _,
    io::Write,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: facloc [<instance> | --instances-dir <dir>] [--time <secs>] \
[--subproblem-time <secs>] [--k <n>] [--seed <n>] [--max-iterations <n>] \
[--exact] [--out <path>] [--report <path>]";

#[derive(Debug, Default)]
struct Args {
    instance: Option<PathBuf>,
    instances_dir: Option<PathBuf>,
    out: Option<PathBuf>,
    report: Option<PathBuf>,
    exact: bool,
    config: LnsConfig,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    let raw = value.ok_or_else(|| format!("{flag} expects a value"))?;
    raw.parse::<T>()
        .map_err(|e| format!("invalid value {raw:?} for {flag}: {e}"))
}

fn parse_secs(flag: &str, value: Option<String>) -> Result<Duration, String> {
    let secs: f64 = parse_value(flag, value)?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid duration for {flag}: {e}"))
}

fn parse_args() -> Result<Args, String> {
    let mut out = Args::default();
    if let Ok(seed) = std::env::var("RUST_SEED") {
        out.config.seed = parse_value("RUST_SEED", Some(seed))?;
    }

    let mut args = std::env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--instances-dir" => out.instances_dir = args.next().map(PathBuf::from),
            "--time" => out.config.time_limit = parse_secs(&a, args.next())?,
            "--subproblem-time" => out.config.subproblem_time_limit = parse_secs(&a, args.next())?,
            "--k" => out.config.neighborhood_size = parse_value(&a, args.next())?,
            "--seed" => out.config.seed = parse_value(&a, args.next())?,
            "--max-iterations" => out.config.max_iterations = Some(parse_value(&a, args.next())?),
            "--exact" => out.exact = true,
            "--out" => out.out = args.next().map(PathBuf::from),
            "--report" => out.report = args.next().map(PathBuf::from),
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}\n{USAGE}")),
            _ if out.instance.is_none() => out.instance = Some(PathBuf::from(&a)),
            _ => return Err(format!("unexpected argument {a:?}\n{USAGE}")),
        }
    }

    if out.instance.is_none() && out.instances_dir.is_none() {
        out.instances_dir = find_instances_dir();
    }
    if out.instance.is_none() && out.instances_dir.is_none() {
        return Err(USAGE.to_string());
    }
    Ok(out)
}

fn find_instances_dir() -> Option<PathBuf> {
    let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
    while let Some(p) = cur {
        let cand = p.join("instances");
        if cand.is_dir() {
            return Some(cand);
        }
        cur = p.parent();
    }
    None
}

fn instance_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|x| x == "txt"))
        .collect();
    files.sort();
    Ok(files)
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "highs")]
fn make_optimizer() -> Box<dyn Optimizer> {
    Box::new(facloc_solver::prelude::HighsOptimizer::new())
}

#[cfg(not(feature = "highs"))]
fn make_optimizer() -> Box<dyn Optimizer> {
    Box::new(facloc_solver::prelude::EnumerationOptimizer::new())
}

#[derive(Serialize)]
struct RunRecord {
    instance: String,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    mode: &'static str,
    initial_value: Option<Cost>,
    final_value: Cost,
    iterations: u64,
    accepted: u64,
    optimal: bool,
}

fn solve(
    problem: &Problem,
    name: &str,
    args: &Args,
    optimizer: &mut dyn Optimizer,
) -> Result<(Solution, RunRecord), Box<dyn Error>> {
    tracing::info!(
        instance = name,
        facilities = problem.facility_count(),
        customers = problem.customer_count(),
        exact = args.exact,
        "Solving"
    );

    let start_ts = Utc::now();
    let t0 = Instant::now();

    let model = InstanceModel::from_problem(problem)?;
    let exact = ExactSearch::new(args.config.time_limit);
    let (solution, mode, initial_value, iterations, accepted) = if args.exact {
        (exact.run(&model, optimizer)?, "exact", None, 0, 0)
    } else {
        match LnsSearch::new(args.config).run_seeded(&model, optimizer) {
            Ok(outcome) => {
                tracing::info!(instance = name, "{}", outcome.stats);
                let stats = outcome.stats;
                let initial = Some(stats.initial_value);
                (outcome.solution, "lns", initial, stats.iterations, stats.accepted)
            }
            Err(SearchError::Opening(err)) => {
                tracing::warn!(instance = name, %err, "Falling back to the whole-instance program");
                (exact.run(&model, optimizer)?, "exact", None, 0, 0)
            }
            Err(err) => return Err(err.into()),
        }
    };

    let runtime = t0.elapsed();
    let end_ts = Utc::now();

    let recomputed = SolutionValidator::validate(problem, &solution, 1e-6)?;
    tracing::info!(instance = name, mode, value = recomputed, runtime = ?runtime, "Finished");

    let record = RunRecord {
        instance: name.to_string(),
        start_ts,
        end_ts,
        runtime_ms: runtime.as_millis(),
        mode,
        initial_value,
        final_value: solution.value(),
        iterations,
        accepted,
        optimal: solution.is_optimal(),
    };
    Ok((solution, record))
}

/// One answer block per solution. Several blocks are each preceded by a
/// `# <instance>` line.
fn render_answers(solved: &[(String, Solution)]) -> String {
    let mut out = String::new();
    for (name, solution) in solved {
        if solved.len() > 1 {
            let _ = writeln!(out, "# {name}");
        }
        let _ = writeln!(out, "{solution}");
    }
    out
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };
    enable_tracing();
    tracing::info!("{}", args.config);

    let files = match (&args.instance, &args.instances_dir) {
        (Some(path), _) => vec![path.clone()],
        (None, Some(dir)) => instance_files(dir)?,
        (None, None) => Vec::new(),
    };

    let mut optimizer = make_optimizer();
    let loader = ProblemLoader::new();
    let mut solved: Vec<(String, Solution)> = Vec::new();
    let mut results: Vec<RunRecord> = Vec::new();

    for path in &files {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let problem = loader.from_path(path)?;

        let (solution, record) = solve(&problem, &name, &args, optimizer.as_mut())?;
        solved.push((name, solution));
        results.push(record);
    }

    let answers = render_answers(&solved);
    match &args.out {
        Some(path) => {
            File::create(path)?.write_all(answers.as_bytes())?;
            tracing::info!("Wrote solution(s) to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(answers.as_bytes())?;
            lock.flush()?;
        }
    }

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&results)?;
        File::create(path)?.write_all(json.as_bytes())?;
        tracing::info!("Wrote {} run record(s) to {}", results.len(), path.display());
    }
    Ok(())
}
